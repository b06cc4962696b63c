/**
 * Transfer Instruction
 *
 * The sender's grants are re-evaluated at the current timestamp and the
 * transfer is rejected if it would dip into still-locked tokens.
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
    TokensTransferred,
};

#[derive(Accounts)]
pub struct TransferTokens<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [TOKEN_STATE_SEED, token_state.mint.as_ref()],
        bump = token_state.bump,
    )]
    pub token_state: Account<'info, TokenState>,

    #[account(
        mut,
        seeds = [HOLDER_SEED, token_state.key().as_ref(), owner.key().as_ref()],
        bump = from_holder.bump,
        has_one = owner @ GalaxyError::Unauthorized,
        has_one = token_state @ GalaxyError::HolderMismatch,
    )]
    pub from_holder: Account<'info, Holder>,

    #[account(
        mut,
        seeds = [HOLDER_SEED, token_state.key().as_ref(), to_holder.owner.as_ref()],
        bump = to_holder.bump,
        has_one = token_state @ GalaxyError::HolderMismatch,
    )]
    pub to_holder: Account<'info, Holder>,
}

pub fn transfer_handler(ctx: Context<TransferTokens>, amount: u128) -> Result<()> {
    let period = ctx.accounts.token_state.period_seconds;
    let token_state_key = ctx.accounts.token_state.key();
    let now = Clock::get()?.unix_timestamp;

    let from_key = ctx.accounts.from_holder.key();
    let to_key = ctx.accounts.to_holder.key();

    if from_key == to_key {
        // same account loaded twice: check the spend, move nothing
        ctx.accounts.from_holder.authorize_spend(amount, now, period)?;
    } else {
        let to = &mut ctx.accounts.to_holder;
        ctx.accounts.from_holder.transfer_to(to, amount, now, period)?;
    }

    let from = &ctx.accounts.from_holder;
    let remaining_transferable = from.transferable_amount(now, period);

    emit!(TokensTransferred {
        token_state: token_state_key,
        from: from.owner,
        to: ctx.accounts.to_holder.owner,
        amount,
        remaining_transferable,
    });

    msg!("Transfer {} → {}: {} (sender can still move {})",
         from.owner, ctx.accounts.to_holder.owner, amount, remaining_transferable);

    Ok(())
}
