/**
 * Lock Math Helpers
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

pub mod guard;
pub mod vesting;
