/**
 * Authority Instructions
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::{
    state::TokenState,
    GalaxyError,
    TOKEN_STATE_SEED,
    AuthorityTransferred,
};

// =============================================================================
// TRANSFER AUTHORITY
// =============================================================================

#[derive(Accounts)]
pub struct TransferAuthority<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [TOKEN_STATE_SEED, token_state.mint.as_ref()],
        bump = token_state.bump,
        has_one = authority @ GalaxyError::Unauthorized,
    )]
    pub token_state: Account<'info, TokenState>,

    /// CHECK: New authority address
    pub new_authority: UncheckedAccount<'info>,
}

pub fn transfer_authority_handler(ctx: Context<TransferAuthority>) -> Result<()> {
    let state = &mut ctx.accounts.token_state;
    let new_authority = ctx.accounts.new_authority.key();
    let old_authority = state.set_authority(new_authority);

    emit!(AuthorityTransferred {
        token_state: state.key(),
        old_authority,
        new_authority,
    });

    msg!("Authority transferred: {} → {}", old_authority, new_authority);

    Ok(())
}
