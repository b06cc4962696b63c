/**
 * Token State
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::{
    state::{Grant, Holder},
    GalaxyError,
    MAX_GRANTS_PER_HOLDER,
    TOKEN_DECIMALS,
};

/// Token state account
/// Supply bookkeeping, lock period length and the privileged authority
#[account]
pub struct TokenState {
    /// SPL mint this ledger is keyed to
    pub mint: Pubkey,

    /// Authority allowed to mint and create lock grants (transferable)
    pub authority: Pubkey,

    /// Implied decimals of every balance (must be TOKEN_DECIMALS)
    pub decimals: u8,

    /// Length of one vesting period in seconds
    pub period_seconds: i64,

    /// Sum of all holder balances
    pub total_supply: u128,

    /// Grants created so far; also the next grant id
    pub grant_count: u64,

    /// Holder accounts opened
    pub holder_count: u32,

    /// Bump seed for PDA
    pub bump: u8,

    /// Reserved for future use
    pub reserved: [u8; 64],
}

impl TokenState {
    pub const LEN: usize = 8 + // discriminator
        32 + // mint
        32 + // authority
        1 +  // decimals
        8 +  // period_seconds
        16 + // total_supply
        8 +  // grant_count
        4 +  // holder_count
        1 +  // bump
        64;  // reserved

    /// Fresh state for `mint`. Rejects a non-positive period and any mint
    /// whose decimals differ from TOKEN_DECIMALS.
    pub fn configure(
        &mut self,
        mint: Pubkey,
        authority: Pubkey,
        decimals: u8,
        period_seconds: i64,
        bump: u8,
    ) -> Result<()> {
        require!(period_seconds > 0, GalaxyError::InvalidConfig);
        require!(decimals == TOKEN_DECIMALS, GalaxyError::InvalidConfig);

        self.mint = mint;
        self.authority = authority;
        self.decimals = decimals;
        self.period_seconds = period_seconds;
        self.total_supply = 0;
        self.grant_count = 0;
        self.holder_count = 0;
        self.bump = bump;
        Ok(())
    }

    /// Swap in a new authority, returning the old one
    pub fn set_authority(&mut self, new_authority: Pubkey) -> Pubkey {
        std::mem::replace(&mut self.authority, new_authority)
    }

    pub fn record_holder(&mut self) -> Result<()> {
        self.holder_count = self
            .holder_count
            .checked_add(1)
            .ok_or(GalaxyError::MathOverflow)?;
        Ok(())
    }

    /// Unguarded issuance into `holder`. No mutation on failure.
    pub fn mint_to(&mut self, holder: &mut Holder, amount: u128) -> Result<()> {
        // supply first: it bounds every balance
        let total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(GalaxyError::MathOverflow)?;
        holder.credit(amount)?;
        self.total_supply = total_supply;
        Ok(())
    }

    /// Lock `amount` of what `beneficiary` holds (or will hold) under a new
    /// grant. Moves nothing. Ids are only consumed by grants that land.
    pub fn register_grant(
        &mut self,
        beneficiary: &mut Holder,
        cliff_periods: u32,
        vesting_periods: u32,
        amount: u128,
        now: i64,
    ) -> Result<Grant> {
        let next_count = self
            .grant_count
            .checked_add(1)
            .ok_or(GalaxyError::MathOverflow)?;
        let grant = Grant::new(
            self.grant_count,
            beneficiary.owner,
            cliff_periods,
            vesting_periods,
            amount,
            now,
        )?;

        beneficiary.push_grant(grant)?;
        self.grant_count = next_count;
        Ok(grant)
    }

    /// Move `amount` from the authority's holder to `beneficiary` and lock it
    /// there, all or nothing.
    pub fn register_funded_grant(
        &mut self,
        funder: &mut Holder,
        beneficiary: &mut Holder,
        cliff_periods: u32,
        vesting_periods: u32,
        amount: u128,
        now: i64,
    ) -> Result<Grant> {
        require_keys_eq!(funder.owner, self.authority, GalaxyError::Unauthorized);
        require_keys_eq!(
            funder.token_state,
            beneficiary.token_state,
            GalaxyError::HolderMismatch
        );
        require_keys_neq!(funder.owner, beneficiary.owner, GalaxyError::SelfFunding);
        require!(
            beneficiary.grants.len() < MAX_GRANTS_PER_HOLDER,
            GalaxyError::GrantCapacityExceeded
        );

        let next_count = self
            .grant_count
            .checked_add(1)
            .ok_or(GalaxyError::MathOverflow)?;
        let grant = Grant::new(
            self.grant_count,
            beneficiary.owner,
            cliff_periods,
            vesting_periods,
            amount,
            now,
        )?;

        funder.transfer_to(beneficiary, amount, now, self.period_seconds)?;
        beneficiary.push_grant(grant)?;
        self.grant_count = next_count;
        Ok(grant)
    }
}
