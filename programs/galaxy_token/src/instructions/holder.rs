/**
 * Holder Instructions
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::{
    state::{Holder, TokenState},
    GalaxyError,
    HOLDER_SEED,
    TOKEN_STATE_SEED,
    HolderOpened,
};

// =============================================================================
// OPEN HOLDER
// =============================================================================

#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct OpenHolder<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [TOKEN_STATE_SEED, token_state.mint.as_ref()],
        bump = token_state.bump,
    )]
    pub token_state: Account<'info, TokenState>,

    #[account(
        init,
        payer = payer,
        space = Holder::LEN,
        seeds = [HOLDER_SEED, token_state.key().as_ref(), owner.as_ref()],
        bump,
    )]
    pub holder: Account<'info, Holder>,

    pub system_program: Program<'info, System>,
}

pub fn open_handler(ctx: Context<OpenHolder>, owner: Pubkey) -> Result<()> {
    let token_state_key = ctx.accounts.token_state.key();
    ctx.accounts.token_state.record_holder()?;

    let holder = &mut ctx.accounts.holder;
    holder.open(token_state_key, owner, ctx.bumps.holder);

    emit!(HolderOpened {
        token_state: token_state_key,
        holder: holder.key(),
        owner,
    });

    Ok(())
}

// =============================================================================
// GET TRANSFERABLE LOCKED AMOUNT
// =============================================================================

#[derive(Accounts)]
pub struct GetTransferableLockedAmount<'info> {
    #[account(
        seeds = [TOKEN_STATE_SEED, token_state.mint.as_ref()],
        bump = token_state.bump,
    )]
    pub token_state: Account<'info, TokenState>,

    #[account(
        seeds = [HOLDER_SEED, token_state.key().as_ref(), holder.owner.as_ref()],
        bump = holder.bump,
        has_one = token_state @ GalaxyError::HolderMismatch,
    )]
    pub holder: Account<'info, Holder>,
}

/// Read-only quote: spendable amount now, plus the lock breakdown as an event
pub fn quote_handler(ctx: Context<GetTransferableLockedAmount>) -> Result<u128> {
    let holder = &ctx.accounts.holder;
    let period = ctx.accounts.token_state.period_seconds;
    let now = Clock::get()?.unix_timestamp;

    let quote = holder.quote(now, period);
    let transferable = quote.transferable;

    msg!("Holder {}: balance {}, locked {}, transferable {}",
         quote.owner, quote.balance, quote.locked, transferable);

    emit!(quote);

    Ok(transferable)
}
