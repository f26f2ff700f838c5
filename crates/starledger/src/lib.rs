//! # starledger
//!
//! A single-process, append-only, hash-linked ledger of star ownership claims.
//!
//! ## Overview
//!
//! Each block links to its predecessor by hash. A client may register a star
//! only after proving control of a wallet address:
//!
//! 1. [`Ledger::request_challenge`] issues `<address>:<time>:<tag>`.
//! 2. The client signs it with its wallet, off-system.
//! 3. [`Ledger::submit_proof`] checks the validation window, that the
//!    challenge was issued here, and the signature, then appends the claim.
//!
//! The chain lives in memory only and starts from a fresh genesis block on
//! every process start.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use starledger::{Ledger, LedgerConfig};
//! use starledger::core::{Keypair, Star};
//!
//! async fn example() {
//!     let ledger = Ledger::open(LedgerConfig::default()).await.unwrap();
//!
//!     let wallet = Keypair::generate();
//!     let address = wallet.address();
//!     let message = ledger.request_challenge(&address).await;
//!     let signature = wallet.sign_message(&message).to_hex();
//!
//!     let block = ledger
//!         .submit_proof(&address, &message, &signature, Star::new("16h 29m", "-26° 29'", "mine"))
//!         .await
//!         .unwrap();
//!     assert_eq!(block.height, 1);
//!     assert!(ledger.validate_chain().await.is_empty());
//! }
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod tamper;
pub mod validation;
pub mod verifier;

pub use starledger_core as core;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::LedgerConfig;
pub use error::{LedgerError, Rejection, Result};
pub use ledger::Ledger;
pub use tamper::TamperOutcome;
pub use validation::{validate_blocks, ChainFault};
pub use verifier::{Ed25519Verifier, MessageVerifier};

pub use starledger_core::{Block, BlockHash, Keypair, Payload, Star, StarClaim, WalletAddress};
