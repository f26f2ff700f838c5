//! # starledger testkit
//!
//! Testing utilities for starledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: wallets that answer challenges like a real client, and a
//!   ledger wired to a manual clock
//! - **Generators**: proptest strategies for stars, keys and claim plans
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use starledger_testkit::fixtures::{star, LedgerFixture, TestWallet};
//!
//! async fn example() {
//!     let fixture = LedgerFixture::new().await.unwrap();
//!     let wallet = TestWallet::new();
//!     let block = wallet.claim(&fixture.ledger, star("first light")).await.unwrap();
//!     assert_eq!(block.height, 1);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use starledger_testkit::generators::claim_plan;
//!
//! proptest! {
//!     #[test]
//!     fn owners_partition_claims(plan in claim_plan(3, 10)) {
//!         let total: usize = (0..3).map(|i| plan.stories_of(i).len()).sum();
//!         prop_assert_eq!(total, plan.claims.len());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{multi_wallet_fixtures, star, LedgerFixture, TestWallet, FIXTURE_EPOCH};
pub use generators::{claim_plan, ClaimPlan};
