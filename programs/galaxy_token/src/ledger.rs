/**
 * In-Memory Lock Ledger
 *
 * Self-contained store holding balances and lock grants for any number of
 * accounts. Applies the same guard and vesting math as the on-chain program,
 * one call at a time, with `now` supplied by the caller.
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::{
    state::{Grant, GrantId},
    utils::guard,
    GalaxyError,
    PERIOD_SECONDS,
};

/// Ledger configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Length of one vesting period in seconds
    pub period_seconds: i64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            period_seconds: PERIOD_SECONDS,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct AccountBook {
    balance: u128,
    grant_ids: Vec<GrantId>,
}

/// Balances plus an append-only grant arena indexed by `GrantId`
#[derive(Clone, Debug)]
pub struct Ledger {
    config: LedgerConfig,
    total_supply: u128,
    books: BTreeMap<Pubkey, AccountBook>,
    grants: Vec<Grant>,
}

impl Ledger {
    pub fn new(config: LedgerConfig) -> Result<Self> {
        require!(config.period_seconds > 0, GalaxyError::InvalidConfig);
        Ok(Self {
            config,
            total_supply: 0,
            books: BTreeMap::new(),
            grants: Vec::new(),
        })
    }

    pub fn config(&self) -> LedgerConfig {
        self.config
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn balance_of(&self, account: &Pubkey) -> u128 {
        self.books.get(account).map_or(0, |book| book.balance)
    }

    /// Grants of `account` in creation order
    pub fn grants_of<'a>(&'a self, account: &Pubkey) -> impl Iterator<Item = &'a Grant> + 'a {
        let ids: &'a [GrantId] = self
            .books
            .get(account)
            .map(|book| book.grant_ids.as_slice())
            .unwrap_or(&[]);
        ids.iter()
            .filter_map(move |id| usize::try_from(*id).ok().and_then(|i| self.grants.get(i)))
    }

    pub fn grant(&self, id: GrantId) -> Option<&Grant> {
        usize::try_from(id).ok().and_then(|i| self.grants.get(i))
    }

    pub fn grant_count(&self) -> usize {
        self.grants.len()
    }

    /// Amount still locked across the account's grants
    pub fn locked_amount(&self, account: &Pubkey, now: i64) -> u128 {
        guard::locked_total(self.grants_of(account), now, self.config.period_seconds)
    }

    /// Amount the account's grants have released so far
    pub fn vested_amount(&self, account: &Pubkey, now: i64) -> u128 {
        guard::vested_total(self.grants_of(account), now, self.config.period_seconds)
    }

    /// Spendable balance: balance minus everything still locked, floored at zero
    pub fn transferable_locked_amount(&self, account: &Pubkey, now: i64) -> u128 {
        guard::free_balance(
            self.balance_of(account),
            self.grants_of(account),
            now,
            self.config.period_seconds,
        )
    }

    /// Check a spend without applying it
    pub fn authorize_transfer(&self, account: &Pubkey, amount: u128, now: i64) -> Result<()> {
        guard::authorize_transfer(
            self.balance_of(account),
            self.grants_of(account),
            amount,
            now,
            self.config.period_seconds,
        )
    }

    /// Unguarded issuance
    pub fn mint(&mut self, account: &Pubkey, amount: u128) -> Result<()> {
        let total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(GalaxyError::MathOverflow)?;
        // total_supply bounds every balance, so this cannot fail once the line above passed
        let book = self.books.entry(*account).or_default();
        book.balance = book
            .balance
            .checked_add(amount)
            .ok_or(GalaxyError::MathOverflow)?;
        self.total_supply = total_supply;
        Ok(())
    }

    /// Guarded move of `amount` from `from` to `to`. No mutation on failure.
    pub fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u128, now: i64) -> Result<()> {
        self.authorize_transfer(from, amount, now)?;
        if from == to {
            return Ok(());
        }
        self.move_balance(from, to, amount)
    }

    /// Register a lock over tokens the beneficiary already holds (or will hold).
    /// Moves nothing.
    pub fn create_grant(
        &mut self,
        beneficiary: &Pubkey,
        cliff_periods: u32,
        vesting_periods: u32,
        amount: u128,
        now: i64,
    ) -> Result<GrantId> {
        let id = self.grants.len() as GrantId;
        let grant = Grant::new(id, *beneficiary, cliff_periods, vesting_periods, amount, now)?;

        self.grants.push(grant);
        self.books
            .entry(*beneficiary)
            .or_default()
            .grant_ids
            .push(id);
        Ok(id)
    }

    /// Move `amount` from `funder` to `beneficiary` and lock it in one step
    pub fn grant_with_funding(
        &mut self,
        funder: &Pubkey,
        beneficiary: &Pubkey,
        cliff_periods: u32,
        vesting_periods: u32,
        amount: u128,
        now: i64,
    ) -> Result<GrantId> {
        // validate everything before touching state
        Grant::new(0, *beneficiary, cliff_periods, vesting_periods, amount, now)?;
        self.authorize_transfer(funder, amount, now)?;

        if funder != beneficiary {
            self.move_balance(funder, beneficiary, amount)?;
        }
        self.create_grant(beneficiary, cliff_periods, vesting_periods, amount, now)
    }

    fn move_balance(&mut self, from: &Pubkey, to: &Pubkey, amount: u128) -> Result<()> {
        let from_balance = self
            .balance_of(from)
            .checked_sub(amount)
            .ok_or(GalaxyError::InsufficientUnlockedBalance)?;
        let to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(GalaxyError::MathOverflow)?;

        self.books.entry(*from).or_default().balance = from_balance;
        self.books.entry(*to).or_default().balance = to_balance;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_700_000_000;

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn ledger() -> Ledger {
        Ledger::new(LedgerConfig::default()).unwrap()
    }

    #[test]
    fn default_config_uses_thirty_day_periods() {
        let l = ledger();
        assert_eq!(l.config(), LedgerConfig { period_seconds: 30 * 24 * 60 * 60 });

        let weekly = Ledger::new(LedgerConfig { period_seconds: 7 * 24 * 60 * 60 }).unwrap();
        assert_eq!(weekly.config().period_seconds, 604_800);
    }

    #[test]
    fn rejects_zero_period() {
        assert_eq!(
            Ledger::new(LedgerConfig { period_seconds: 0 }).unwrap_err(),
            GalaxyError::InvalidConfig.into()
        );
    }

    #[test]
    fn mint_and_transfer_conserve_supply() {
        let mut l = ledger();
        let (a, b) = (key(1), key(2));

        l.mint(&a, 500).unwrap();
        l.transfer(&a, &b, 200, T0).unwrap();

        assert_eq!(l.balance_of(&a), 300);
        assert_eq!(l.balance_of(&b), 200);
        assert_eq!(l.total_supply(), 500);
    }

    #[test]
    fn overspend_leaves_balances_untouched() {
        let mut l = ledger();
        let (a, b) = (key(1), key(2));
        l.mint(&a, 100).unwrap();

        assert_eq!(
            l.transfer(&a, &b, 101, T0).unwrap_err(),
            GalaxyError::InsufficientUnlockedBalance.into()
        );
        assert_eq!(l.balance_of(&a), 100);
        assert_eq!(l.balance_of(&b), 0);
    }

    #[test]
    fn self_transfer_is_guarded_noop() {
        let mut l = ledger();
        let a = key(1);
        l.mint(&a, 1_000).unwrap();
        l.create_grant(&a, 0, 4, 1_000, T0).unwrap();

        l.transfer(&a, &a, 250, T0).unwrap();
        assert_eq!(l.balance_of(&a), 1_000);
        assert!(l.transfer(&a, &a, 251, T0).is_err());
    }

    #[test]
    fn invalid_schedule_changes_nothing() {
        let mut l = ledger();
        let a = key(1);

        assert_eq!(
            l.create_grant(&a, 0, 0, 1_000, T0).unwrap_err(),
            GalaxyError::InvalidSchedule.into()
        );
        assert_eq!(
            l.create_grant(&a, 0, 4, 0, T0).unwrap_err(),
            GalaxyError::InvalidSchedule.into()
        );
        assert_eq!(l.grant_count(), 0);
        assert_eq!(l.grants_of(&a).count(), 0);
    }

    #[test]
    fn grant_ids_are_stable_and_ordered() {
        let mut l = ledger();
        let (a, b) = (key(1), key(2));

        let first = l.create_grant(&a, 0, 4, 100, T0).unwrap();
        let other = l.create_grant(&b, 1, 2, 50, T0).unwrap();
        let second = l.create_grant(&a, 2, 6, 300, T0 + 10).unwrap();

        assert_eq!((first, other, second), (0, 1, 2));
        let ids: Vec<GrantId> = l.grants_of(&a).map(|g| g.id).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(l.grant(1).map(|g| g.beneficiary), Some(b));
        assert!(l.grant(3).is_none());
    }

    #[test]
    fn unfunded_grant_is_debt_not_error() {
        let mut l = ledger();
        let a = key(1);
        l.mint(&a, 100).unwrap();
        l.create_grant(&a, 1, 4, 1_000, T0).unwrap();

        assert_eq!(l.locked_amount(&a, T0), 1_000);
        assert_eq!(l.transferable_locked_amount(&a, T0), 0);
    }

    #[test]
    fn funded_grant_moves_and_locks_atomically() {
        let mut l = ledger();
        let (owner, a) = (key(1), key(2));
        l.mint(&owner, 1_000).unwrap();

        let id = l.grant_with_funding(&owner, &a, 0, 4, 400, T0).unwrap();

        assert_eq!(l.balance_of(&owner), 600);
        assert_eq!(l.balance_of(&a), 400);
        assert_eq!(l.grant(id).map(|g| g.total_amount), Some(400));
        assert_eq!(l.transferable_locked_amount(&a, T0), 100);
    }

    #[test]
    fn failed_funded_grant_changes_nothing() {
        let mut l = ledger();
        let (owner, a) = (key(1), key(2));
        l.mint(&owner, 100).unwrap();

        assert_eq!(
            l.grant_with_funding(&owner, &a, 0, 4, 101, T0).unwrap_err(),
            GalaxyError::InsufficientUnlockedBalance.into()
        );
        assert_eq!(
            l.grant_with_funding(&owner, &a, 0, 0, 50, T0).unwrap_err(),
            GalaxyError::InvalidSchedule.into()
        );
        assert_eq!(l.balance_of(&owner), 100);
        assert_eq!(l.balance_of(&a), 0);
        assert_eq!(l.grant_count(), 0);
    }

    #[test]
    fn funding_own_grant_locks_in_place() {
        let mut l = ledger();
        let owner = key(1);
        l.mint(&owner, 1_000).unwrap();

        l.grant_with_funding(&owner, &owner, 2, 4, 800, T0).unwrap();
        assert_eq!(l.balance_of(&owner), 1_000);
        assert_eq!(l.transferable_locked_amount(&owner, T0), 200);
    }

    #[test]
    fn mint_overflow_is_rejected_without_mutation() {
        let mut l = ledger();
        let a = key(1);
        l.mint(&a, u128::MAX).unwrap();

        assert_eq!(l.mint(&a, 1).unwrap_err(), GalaxyError::MathOverflow.into());
        assert_eq!(l.total_supply(), u128::MAX);
        assert_eq!(l.balance_of(&a), u128::MAX);
    }
}
