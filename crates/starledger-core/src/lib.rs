//! # starledger core
//!
//! Pure primitives for starledger: blocks, hashing, wallet signatures and
//! ownership challenges.
//!
//! This crate contains no I/O, no async, no shared state. The [`Block`] type
//! is the collaborator the ledger builds on: it knows how to hash itself,
//! validate its stored hash and decode its payload, but knows nothing about
//! its neighbours.
//!
//! ## Key Types
//!
//! - [`Block`] - One ledger entry
//! - [`Payload`] - Genesis marker or [`StarClaim`]
//! - [`BlockHash`] - Blake3 digest identifying a block
//! - [`WalletAddress`] / [`Keypair`] - Ed25519 wallet identity and signing

pub mod block;
pub mod canonical;
pub mod challenge;
pub mod crypto;
pub mod error;

pub use block::{Block, Payload, Star, StarClaim};
pub use canonical::{canonical_header_bytes, HASH_DOMAIN};
pub use challenge::{challenge_message, issued_at, DEFAULT_CHALLENGE_TAG};
pub use crypto::{
    signed_message_bytes, verify_message, BlockHash, Keypair, WalletAddress, WalletSignature,
    MESSAGE_SIGN_DOMAIN,
};
pub use error::{CoreError, Result};
