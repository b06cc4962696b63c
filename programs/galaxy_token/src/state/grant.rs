/**
 * Lock Grant State
 *
 * One cliff + linear vesting commitment held by a beneficiary.
 * Grants are append-only: never mutated, never removed.
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::GalaxyError;

/// Stable grant identifier, assigned in creation order
pub type GrantId = u64;

/// Vesting grant
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grant {
    /// Creation-order id (never reused)
    pub id: GrantId,

    /// Account the locked tokens belong to
    pub beneficiary: Pubkey,

    /// Amount covered by the schedule (immutable)
    pub total_amount: u128,

    /// Whole periods before anything unlocks
    pub cliff_periods: u32,

    /// Periods over which total_amount unlocks linearly, counted from start_time
    pub vesting_periods: u32,

    /// Unix timestamp of creation
    pub start_time: i64,
}

impl Grant {
    pub const LEN: usize =
        8 +  // id
        32 + // beneficiary
        16 + // total_amount
        4 +  // cliff_periods
        4 +  // vesting_periods
        8;   // start_time

    /// Build a grant starting at `now`.
    /// Fails with `InvalidSchedule` on a zero amount or zero vesting periods.
    pub fn new(
        id: GrantId,
        beneficiary: Pubkey,
        cliff_periods: u32,
        vesting_periods: u32,
        total_amount: u128,
        now: i64,
    ) -> Result<Self> {
        require!(total_amount > 0, GalaxyError::InvalidSchedule);
        require!(vesting_periods > 0, GalaxyError::InvalidSchedule);

        Ok(Self {
            id,
            beneficiary,
            total_amount,
            cliff_periods,
            vesting_periods,
            start_time: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_schedules() {
        let who = Pubkey::new_from_array([7u8; 32]);

        assert_eq!(
            Grant::new(0, who, 0, 4, 0, 100).unwrap_err(),
            GalaxyError::InvalidSchedule.into()
        );
        assert_eq!(
            Grant::new(0, who, 2, 0, 1_000, 100).unwrap_err(),
            GalaxyError::InvalidSchedule.into()
        );
    }

    #[test]
    fn starts_at_creation_time() {
        let who = Pubkey::new_from_array([7u8; 32]);
        let grant = Grant::new(3, who, 6, 12, 1_000, 1_700_000_000).unwrap();

        assert_eq!(grant.id, 3);
        assert_eq!(grant.start_time, 1_700_000_000);
        assert_eq!(grant.beneficiary, who);
        assert_eq!(grant.total_amount, 1_000);
    }
}
