/**
 * Initialize Token State Instruction
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::{
    state::TokenState,
    TOKEN_STATE_SEED,
    TokenStateInitialized,
};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    pub mint: Account<'info, Mint>,

    #[account(
        init,
        payer = authority,
        space = TokenState::LEN,
        seeds = [TOKEN_STATE_SEED, mint.key().as_ref()],
        bump,
    )]
    pub token_state: Account<'info, TokenState>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_handler(ctx: Context<Initialize>, period_seconds: i64) -> Result<()> {
    let mint = &ctx.accounts.mint;
    let state = &mut ctx.accounts.token_state;

    state.configure(
        mint.key(),
        ctx.accounts.authority.key(),
        mint.decimals,
        period_seconds,
        ctx.bumps.token_state,
    )?;

    emit!(TokenStateInitialized {
        mint: state.mint,
        authority: state.authority,
        decimals: state.decimals,
        period_seconds,
    });

    msg!("Token state initialized: period {}s, {} decimals", period_seconds, state.decimals);

    Ok(())
}
