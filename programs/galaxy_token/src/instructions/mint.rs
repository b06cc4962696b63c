/**
 * Mint Instruction
 *
 * Privileged and unguarded: used at launch to establish the supply.
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
    TokensMinted,
};

#[derive(Accounts)]
pub struct MintTokens<'info> {
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
        seeds = [HOLDER_SEED, token_state.key().as_ref(), holder.owner.as_ref()],
        bump = holder.bump,
        has_one = token_state @ GalaxyError::HolderMismatch,
    )]
    pub holder: Account<'info, Holder>,
}

pub fn mint_handler(ctx: Context<MintTokens>, amount: u128) -> Result<()> {
    let state = &mut ctx.accounts.token_state;
    let holder = &mut ctx.accounts.holder;

    state.mint_to(holder, amount)?;

    emit!(TokensMinted {
        token_state: state.key(),
        owner: holder.owner,
        amount,
        total_supply: state.total_supply,
    });

    msg!("Minted {} to {} (supply {})", amount, holder.owner, state.total_supply);

    Ok(())
}
