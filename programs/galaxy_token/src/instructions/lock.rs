/**
 * Lock Grant Instructions
 *
 * lock_tokens registers a schedule over tokens the beneficiary already holds
 * (fund with transfer_tokens first). lock_with_funding does both in one
 * instruction.
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::{
    state::{Grant, Holder, TokenState},
    GalaxyError,
    HOLDER_SEED,
    TOKEN_STATE_SEED,
    TokensLocked,
};

// =============================================================================
// LOCK TOKENS
// =============================================================================

#[derive(Accounts)]
pub struct LockTokens<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [TOKEN_STATE_SEED, token_state.mint.as_ref()],
        bump = token_state.bump,
        has_one = authority @ GalaxyError::Unauthorized,
    )]
    pub token_state: Account<'info, TokenState>,

    #[account(
        mut,
        seeds = [HOLDER_SEED, token_state.key().as_ref(), beneficiary.owner.as_ref()],
        bump = beneficiary.bump,
        has_one = token_state @ GalaxyError::HolderMismatch,
    )]
    pub beneficiary: Account<'info, Holder>,
}

pub fn lock_handler(
    ctx: Context<LockTokens>,
    cliff_periods: u32,
    vesting_periods: u32,
    amount: u128,
) -> Result<()> {
    let state = &mut ctx.accounts.token_state;
    let beneficiary = &mut ctx.accounts.beneficiary;
    let now = Clock::get()?.unix_timestamp;

    let grant = state.register_grant(beneficiary, cliff_periods, vesting_periods, amount, now)?;

    if beneficiary.balance < beneficiary.locked_amount(now, state.period_seconds) {
        msg!("⚠️  Grant #{} exceeds the balance of {}; excess stays non-transferable",
             grant.id, beneficiary.owner);
    }

    emit_locked(state.key(), &grant, false);

    Ok(())
}

// =============================================================================
// LOCK WITH FUNDING
// =============================================================================

#[derive(Accounts)]
pub struct LockWithFunding<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [TOKEN_STATE_SEED, token_state.mint.as_ref()],
        bump = token_state.bump,
        has_one = authority @ GalaxyError::Unauthorized,
    )]
    pub token_state: Account<'info, TokenState>,

    #[account(
        mut,
        seeds = [HOLDER_SEED, token_state.key().as_ref(), authority.key().as_ref()],
        bump = funder.bump,
        has_one = token_state @ GalaxyError::HolderMismatch,
    )]
    pub funder: Account<'info, Holder>,

    #[account(
        mut,
        seeds = [HOLDER_SEED, token_state.key().as_ref(), beneficiary.owner.as_ref()],
        bump = beneficiary.bump,
        has_one = token_state @ GalaxyError::HolderMismatch,
    )]
    pub beneficiary: Account<'info, Holder>,
}

pub fn lock_with_funding_handler(
    ctx: Context<LockWithFunding>,
    cliff_periods: u32,
    vesting_periods: u32,
    amount: u128,
) -> Result<()> {
    let state = &mut ctx.accounts.token_state;
    let funder = &mut ctx.accounts.funder;
    let beneficiary = &mut ctx.accounts.beneficiary;
    let now = Clock::get()?.unix_timestamp;

    let grant = state.register_funded_grant(
        funder,
        beneficiary,
        cliff_periods,
        vesting_periods,
        amount,
        now,
    )?;

    msg!("Funded lock #{}: {} → {} ({} cliff / {} vesting periods)",
         grant.id, funder.owner, beneficiary.owner, cliff_periods, vesting_periods);

    emit_locked(state.key(), &grant, true);

    Ok(())
}

fn emit_locked(token_state: Pubkey, grant: &Grant, funded: bool) {
    emit!(TokensLocked {
        token_state,
        grant_id: grant.id,
        beneficiary: grant.beneficiary,
        amount: grant.total_amount,
        cliff_periods: grant.cliff_periods,
        vesting_periods: grant.vesting_periods,
        start_time: grant.start_time,
        funded,
    });
}
