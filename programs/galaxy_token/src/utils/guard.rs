/**
 * Balance Guard
 *
 * Aggregates an account's grants and gates outbound transfers.
 * Callers hand in the balance and the grants; nothing here reads state on its
 * own or mutates anything.
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::state::Grant;
use crate::utils::vesting;
use crate::GalaxyError;

/// Sum of the locked remainders of `grants` at `now`.
pub fn locked_total<'a, I>(grants: I, now: i64, period_seconds: i64) -> u128
where
    I: IntoIterator<Item = &'a Grant>,
{
    grants.into_iter().fold(0u128, |acc, grant| {
        acc.saturating_add(vesting::locked_remainder(grant, now, period_seconds))
    })
}

/// Sum of what `grants` have released so far.
pub fn vested_total<'a, I>(grants: I, now: i64, period_seconds: i64) -> u128
where
    I: IntoIterator<Item = &'a Grant>,
{
    grants.into_iter().fold(0u128, |acc, grant| {
        acc.saturating_add(vesting::vested_amount(grant, now, period_seconds))
    })
}

/// Balance not encumbered by any locked remainder. Floors at zero when the
/// grants cover more than the account holds.
pub fn free_balance<'a, I>(balance: u128, grants: I, now: i64, period_seconds: i64) -> u128
where
    I: IntoIterator<Item = &'a Grant>,
{
    balance.saturating_sub(locked_total(grants, now, period_seconds))
}

/// Accept a spend of `amount` only if it fits in the free balance.
pub fn authorize_transfer<'a, I>(
    balance: u128,
    grants: I,
    amount: u128,
    now: i64,
    period_seconds: i64,
) -> Result<()>
where
    I: IntoIterator<Item = &'a Grant>,
{
    let spendable = free_balance(balance, grants, now, period_seconds);
    require!(amount <= spendable, GalaxyError::InsufficientUnlockedBalance);
    Ok(())
}
