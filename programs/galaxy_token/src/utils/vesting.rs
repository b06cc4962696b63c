/**
 * Vesting Math
 *
 * Period-based unlock schedule for lock grants:
 *   cliff_end      = start_time + cliff_periods * period
 *   elapsed        = floor((now - start_time) / period), counted from start_time
 *   vested_periods = 0 before cliff_end, else min(elapsed + 1, vesting_periods)
 *   locked         = total_amount - floor(total_amount * vested_periods / vesting_periods)
 *
 * The running period counts as vested ("vest-in-advance"): a zero-cliff,
 * 4-period grant is 1/4 unlocked the moment it is created.
 *
 * Every function here is total; timestamp math saturates and the amount math
 * cannot overflow.
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use crate::state::Grant;

/// Timestamp at which the cliff ends and vesting starts counting.
pub fn cliff_end(grant: &Grant, period_seconds: i64) -> i64 {
    let cliff_seconds = (grant.cliff_periods as i64).saturating_mul(period_seconds.max(1));
    grant.start_time.saturating_add(cliff_seconds)
}

pub fn cliff_passed(grant: &Grant, now: i64, period_seconds: i64) -> bool {
    now >= cliff_end(grant, period_seconds)
}

/// Whole periods elapsed since `start_time` (0 when `now` is before it).
pub fn elapsed_periods(grant: &Grant, now: i64, period_seconds: i64) -> u64 {
    if now <= grant.start_time {
        return 0;
    }
    let elapsed_seconds = now.saturating_sub(grant.start_time);
    (elapsed_seconds / period_seconds.max(1)) as u64
}

/// Periods counted as vested at `now`, including the running one.
pub fn vested_periods(grant: &Grant, now: i64, period_seconds: i64) -> u32 {
    if !cliff_passed(grant, now, period_seconds) {
        return 0;
    }
    let counted = elapsed_periods(grant, now, period_seconds).saturating_add(1);
    counted.min(grant.vesting_periods as u64) as u32
}

/// Portion of the grant unlocked at `now`.
pub fn vested_amount(grant: &Grant, now: i64, period_seconds: i64) -> u128 {
    if !cliff_passed(grant, now, period_seconds) {
        return 0;
    }

    let periods = grant.vesting_periods as u128;
    let vested = vested_periods(grant, now, period_seconds) as u128;
    if vested >= periods {
        return grant.total_amount;
    }

    // total = q * periods + r, so total * vested / periods = q * vested + r * vested / periods.
    // q * vested < total and r * vested < periods^2 <= 2^64: nothing overflows.
    let q = grant.total_amount / periods;
    let r = grant.total_amount % periods;
    q.saturating_mul(vested)
        .saturating_add(r.saturating_mul(vested) / periods)
}

/// Portion of the grant still locked at `now`.
pub fn locked_remainder(grant: &Grant, now: i64, period_seconds: i64) -> u128 {
    grant
        .total_amount
        .saturating_sub(vested_amount(grant, now, period_seconds))
}

pub fn is_fully_vested(grant: &Grant, now: i64, period_seconds: i64) -> bool {
    locked_remainder(grant, now, period_seconds) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ONE_TOKEN, PERIOD_SECONDS};
    use anchor_lang::prelude::Pubkey;

    const T0: i64 = 1_700_000_000;

    fn grant(cliff_periods: u32, vesting_periods: u32, total_amount: u128) -> Grant {
        Grant {
            id: 0,
            beneficiary: Pubkey::new_from_array([1u8; 32]),
            total_amount,
            cliff_periods,
            vesting_periods,
            start_time: T0,
        }
    }

    #[test]
    fn running_period_counts_as_vested() {
        let g = grant(0, 4, 1_000);

        assert_eq!(vested_periods(&g, T0, PERIOD_SECONDS), 1);
        assert_eq!(locked_remainder(&g, T0, PERIOD_SECONDS), 750);

        // one second before the first boundary is still period 0
        assert_eq!(locked_remainder(&g, T0 + PERIOD_SECONDS - 1, PERIOD_SECONDS), 750);
        assert_eq!(locked_remainder(&g, T0 + PERIOD_SECONDS, PERIOD_SECONDS), 500);
        assert_eq!(locked_remainder(&g, T0 + 2 * PERIOD_SECONDS, PERIOD_SECONDS), 250);
        assert_eq!(locked_remainder(&g, T0 + 3 * PERIOD_SECONDS, PERIOD_SECONDS), 0);
        assert!(is_fully_vested(&g, T0 + 3 * PERIOD_SECONDS, PERIOD_SECONDS));
    }

    #[test]
    fn cliff_holds_everything_then_catches_up() {
        // team allocation: 6 period cliff, 12 period vesting
        let g = grant(6, 12, 1_200);

        assert_eq!(locked_remainder(&g, T0, PERIOD_SECONDS), 1_200);
        let before_cliff = cliff_end(&g, PERIOD_SECONDS) - 1;
        assert_eq!(locked_remainder(&g, before_cliff, PERIOD_SECONDS), 1_200);

        // vesting clock started at creation: 6 elapsed + running period
        let at_cliff = cliff_end(&g, PERIOD_SECONDS);
        assert_eq!(vested_periods(&g, at_cliff, PERIOD_SECONDS), 7);
        assert_eq!(locked_remainder(&g, at_cliff, PERIOD_SECONDS), 500);

        assert_eq!(locked_remainder(&g, T0 + 11 * PERIOD_SECONDS, PERIOD_SECONDS), 0);
    }

    #[test]
    fn cliff_longer_than_vesting_releases_all_at_once() {
        let g = grant(8, 4, 1_000);

        assert_eq!(locked_remainder(&g, T0 + 8 * PERIOD_SECONDS - 1, PERIOD_SECONDS), 1_000);
        assert_eq!(locked_remainder(&g, T0 + 8 * PERIOD_SECONDS, PERIOD_SECONDS), 0);
    }

    #[test]
    fn truncating_division_keeps_remainder_locked() {
        let g = grant(0, 3, 1_000);

        assert_eq!(vested_amount(&g, T0, PERIOD_SECONDS), 333);
        assert_eq!(vested_amount(&g, T0 + PERIOD_SECONDS, PERIOD_SECONDS), 666);
        assert_eq!(vested_amount(&g, T0 + 2 * PERIOD_SECONDS, PERIOD_SECONDS), 1_000);
    }

    #[test]
    fn before_start_is_fully_locked() {
        let g = grant(0, 4, 1_000);
        assert_eq!(elapsed_periods(&g, T0 - 10, PERIOD_SECONDS), 0);
        assert_eq!(locked_remainder(&g, T0 - 10, PERIOD_SECONDS), 1_000);
    }

    #[test]
    fn monotonic_and_bounded() {
        let g = grant(2, 7, 1_000_003);
        let mut previous = g.total_amount;

        for step in 0..(12 * 4) {
            let now = T0 + step * PERIOD_SECONDS / 4;
            let locked = locked_remainder(&g, now, PERIOD_SECONDS);
            assert!(locked <= previous);
            assert!(locked <= g.total_amount);
            previous = locked;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn large_supplies_do_not_overflow() {
        let total = 100_000_000 * ONE_TOKEN;
        let g = grant(0, u32::MAX, total);

        let vested = vested_amount(&g, T0 + 5 * PERIOD_SECONDS, PERIOD_SECONDS);
        assert_eq!(vested, total * 6 / u32::MAX as u128);
        assert_eq!(locked_remainder(&g, i64::MAX, PERIOD_SECONDS), 0);
    }

    #[test]
    fn degenerate_period_length_is_clamped() {
        let g = grant(0, 4, 1_000);
        // period of 0 behaves as one second
        assert_eq!(locked_remainder(&g, T0 + 1, 0), 500);
    }
}
