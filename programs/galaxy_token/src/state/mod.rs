/**
 * State Accounts for Open Galaxy Token
 * 
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

pub mod token_state;
pub mod holder;
pub mod grant;

pub use token_state::*;
pub use holder::*;
pub use grant::*;
