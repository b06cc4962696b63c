/**
 * Open Galaxy Token
 *
 * Fungible token ledger with cliff + linear lock-up grants.
 * Every transfer is checked against the sender's still-locked amount.
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 *
 * License: BSL 1.1 (converts to MIT after Dec 2028)
 */

use anchor_lang::prelude::*;

pub mod state;
pub mod instructions;
pub mod utils;
pub mod ledger;

use instructions::*;

declare_id!("GaLaxyTokenLock1111111111111111111111111111");

// =============================================================================
// SEEDS
// =============================================================================

pub const TOKEN_STATE_SEED: &[u8] = b"token_state";
pub const HOLDER_SEED: &[u8] = b"holder";

// =============================================================================
// CONSTANTS
// =============================================================================

/// Seconds per day (UTC)
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Default vesting period: 30 days
pub const PERIOD_SECONDS: i64 = 30 * SECONDS_PER_DAY;

/// Implied decimals of every balance
pub const TOKEN_DECIMALS: u8 = 18;

/// One whole token in base units
pub const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Supply minted to the deployer at launch: 100M tokens
pub const INITIAL_SUPPLY: u128 = 100_000_000 * ONE_TOKEN;

/// Grant slots per holder account (fixed account space)
pub const MAX_GRANTS_PER_HOLDER: usize = 16;

// =============================================================================
// PROGRAM
// =============================================================================

#[program]
pub mod galaxy_token {
    use super::*;

    // =========================================================================
    // TOKEN STATE
    // =========================================================================

    /// Initialize token state for a mint (must use TOKEN_DECIMALS)
    /// `period_seconds` is the length of one vesting period
    pub fn initialize(ctx: Context<Initialize>, period_seconds: i64) -> Result<()> {
        instructions::initialize::initialize_handler(ctx, period_seconds)
    }

    /// Hand mint/lock authority to a new key
    pub fn transfer_authority(ctx: Context<TransferAuthority>) -> Result<()> {
        instructions::authority::transfer_authority_handler(ctx)
    }

    // =========================================================================
    // BALANCES
    // =========================================================================

    /// Open an empty holder account for `owner`
    pub fn open_holder(ctx: Context<OpenHolder>, owner: Pubkey) -> Result<()> {
        instructions::holder::open_handler(ctx, owner)
    }

    /// Mint new tokens to a holder (authority only, unguarded)
    pub fn mint_tokens(ctx: Context<MintTokens>, amount: u128) -> Result<()> {
        instructions::mint::mint_handler(ctx, amount)
    }

    /// Transfer tokens between holders
    /// Fails if the amount exceeds what is currently unlocked
    pub fn transfer_tokens(ctx: Context<TransferTokens>, amount: u128) -> Result<()> {
        instructions::transfer::transfer_handler(ctx, amount)
    }

    /// Spendable amount of a holder right now
    pub fn get_transferable_locked_amount(
        ctx: Context<GetTransferableLockedAmount>,
    ) -> Result<u128> {
        instructions::holder::quote_handler(ctx)
    }

    // =========================================================================
    // LOCK GRANTS
    // =========================================================================

    /// Register a lock grant over tokens the beneficiary already holds
    pub fn lock_tokens(
        ctx: Context<LockTokens>,
        cliff_periods: u32,
        vesting_periods: u32,
        amount: u128,
    ) -> Result<()> {
        instructions::lock::lock_handler(ctx, cliff_periods, vesting_periods, amount)
    }

    /// Fund and lock a grant in one step
    /// Moves `amount` from the authority's holder to the beneficiary
    pub fn lock_with_funding(
        ctx: Context<LockWithFunding>,
        cliff_periods: u32,
        vesting_periods: u32,
        amount: u128,
    ) -> Result<()> {
        instructions::lock::lock_with_funding_handler(ctx, cliff_periods, vesting_periods, amount)
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[error_code]
pub enum GalaxyError {
    #[msg("Invalid lock schedule (amount and vesting periods must be > 0)")]
    InvalidSchedule,

    #[msg("Transfer exceeds unlocked balance")]
    InsufficientUnlockedBalance,

    #[msg("Invalid configuration")]
    InvalidConfig,

    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Holder does not belong to this token state")]
    HolderMismatch,

    #[msg("Holder grant list is full")]
    GrantCapacityExceeded,

    #[msg("Funder and beneficiary must be different holders")]
    SelfFunding,

    #[msg("Math overflow")]
    MathOverflow,
}

// =============================================================================
// EVENTS
// =============================================================================

#[event]
pub struct TokenStateInitialized {
    pub mint: Pubkey,
    pub authority: Pubkey,
    pub decimals: u8,
    pub period_seconds: i64,
}

#[event]
pub struct AuthorityTransferred {
    pub token_state: Pubkey,
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
}

#[event]
pub struct HolderOpened {
    pub token_state: Pubkey,
    pub holder: Pubkey,
    pub owner: Pubkey,
}

#[event]
pub struct TokensMinted {
    pub token_state: Pubkey,
    pub owner: Pubkey,
    pub amount: u128,
    pub total_supply: u128,
}

#[event]
pub struct TokensTransferred {
    pub token_state: Pubkey,
    pub from: Pubkey,
    pub to: Pubkey,
    pub amount: u128,
    pub remaining_transferable: u128,
}

#[event]
pub struct TokensLocked {
    pub token_state: Pubkey,
    pub grant_id: u64,
    pub beneficiary: Pubkey,
    pub amount: u128,
    pub cliff_periods: u32,
    pub vesting_periods: u32,
    pub start_time: i64,
    pub funded: bool,
}

#[event]
pub struct HolderQuote {
    pub owner: Pubkey,
    pub balance: u128,
    pub locked: u128,
    pub vested: u128,
    pub transferable: u128,
    pub grant_count: u32,
    pub completed_grants: u32,
}
