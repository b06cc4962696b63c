/**
 * Instructions for Open Galaxy Token
 * 
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

pub mod initialize;
pub mod authority;
pub mod holder;
pub mod mint;
pub mod transfer;
pub mod lock;

pub use initialize::*;
pub use authority::*;
pub use holder::*;
pub use mint::*;
pub use transfer::*;
pub use lock::*;
