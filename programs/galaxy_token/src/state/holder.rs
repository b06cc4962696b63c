/**
 * Holder State
 *
 * Per-owner balance plus the lock grants covering it.
 * Every outbound movement goes through the balance guard first.
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::{
    state::Grant,
    utils::{guard, vesting},
    GalaxyError,
    HolderQuote,
    MAX_GRANTS_PER_HOLDER,
};

/// Holder account
/// One per (token state, owner)
#[account]
pub struct Holder {
    /// Token state this holder belongs to
    pub token_state: Pubkey,

    /// Wallet that may spend from this holder
    pub owner: Pubkey,

    /// Token balance (18 implied decimals)
    pub balance: u128,

    /// Lock grants in creation order
    pub grants: Vec<Grant>,

    /// Bump seed for PDA
    pub bump: u8,

    /// Reserved for future use
    pub reserved: [u8; 32],
}

impl Holder {
    pub const LEN: usize = 8 + // discriminator
        32 + // token_state
        32 + // owner
        16 + // balance
        4 + MAX_GRANTS_PER_HOLDER * Grant::LEN + // grants
        1 +  // bump
        32;  // reserved

    /// Empty holder for `owner` under `token_state`
    pub fn open(&mut self, token_state: Pubkey, owner: Pubkey, bump: u8) {
        self.token_state = token_state;
        self.owner = owner;
        self.balance = 0;
        self.grants = Vec::new();
        self.bump = bump;
    }

    /// Amount still locked across all grants
    pub fn locked_amount(&self, now: i64, period_seconds: i64) -> u128 {
        guard::locked_total(&self.grants, now, period_seconds)
    }

    /// Amount released by vesting so far (spent or not)
    pub fn vested_amount(&self, now: i64, period_seconds: i64) -> u128 {
        guard::vested_total(&self.grants, now, period_seconds)
    }

    /// What a transfer may move right now
    pub fn transferable_amount(&self, now: i64, period_seconds: i64) -> u128 {
        guard::free_balance(self.balance, &self.grants, now, period_seconds)
    }

    /// Grants with nothing left locked
    pub fn completed_grants(&self, now: i64, period_seconds: i64) -> usize {
        self.grants
            .iter()
            .filter(|grant| vesting::is_fully_vested(grant, now, period_seconds))
            .count()
    }

    /// Snapshot of balance and lock state at `now`
    pub fn quote(&self, now: i64, period_seconds: i64) -> HolderQuote {
        HolderQuote {
            owner: self.owner,
            balance: self.balance,
            locked: self.locked_amount(now, period_seconds),
            vested: self.vested_amount(now, period_seconds),
            transferable: self.transferable_amount(now, period_seconds),
            grant_count: self.grants.len() as u32,
            completed_grants: self.completed_grants(now, period_seconds) as u32,
        }
    }

    /// Check a spend without applying it
    pub fn authorize_spend(&self, amount: u128, now: i64, period_seconds: i64) -> Result<()> {
        guard::authorize_transfer(self.balance, &self.grants, amount, now, period_seconds)
    }

    /// Guarded move of `amount` into `to`. No mutation on failure.
    /// A holder cannot be passed as both sides; self-transfers use `authorize_spend`.
    pub fn transfer_to(
        &mut self,
        to: &mut Holder,
        amount: u128,
        now: i64,
        period_seconds: i64,
    ) -> Result<()> {
        require_keys_eq!(self.token_state, to.token_state, GalaxyError::HolderMismatch);
        // receiving side first so a failure leaves both untouched
        let to_balance = to
            .balance
            .checked_add(amount)
            .ok_or(GalaxyError::MathOverflow)?;
        self.debit(amount, now, period_seconds)?;
        to.balance = to_balance;
        Ok(())
    }

    /// Guarded withdrawal. No mutation on failure.
    pub fn debit(&mut self, amount: u128, now: i64, period_seconds: i64) -> Result<()> {
        self.authorize_spend(amount, now, period_seconds)?;
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(GalaxyError::MathOverflow)?;
        Ok(())
    }

    pub fn credit(&mut self, amount: u128) -> Result<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(GalaxyError::MathOverflow)?;
        Ok(())
    }

    /// Append a grant; the account has fixed space for MAX_GRANTS_PER_HOLDER
    pub fn push_grant(&mut self, grant: Grant) -> Result<()> {
        require!(
            self.grants.len() < MAX_GRANTS_PER_HOLDER,
            GalaxyError::GrantCapacityExceeded
        );
        self.grants.push(grant);
        Ok(())
    }
}
