//! Tamper helpers for exercising chain validation.
//!
//! These overwrite a block field with a hash of the block's current content,
//! producing a value validation must flag. Nothing in the ownership workflow
//! calls them. Genesis is never touched.

use tracing::warn;

use crate::ledger::Ledger;
use crate::verifier::MessageVerifier;

/// Result of a tamper request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TamperOutcome {
    /// The field was overwritten.
    Applied,
    /// No block at that height.
    NotFound,
    /// Height 0 was requested; genesis is left alone.
    GenesisProtected,
}

impl<V: MessageVerifier> Ledger<V> {
    /// Overwrite the stored hash of the block at `height`.
    pub async fn corrupt_hash(&self, height: u64) -> TamperOutcome {
        if height == 0 {
            return TamperOutcome::GenesisProtected;
        }
        let mut chain = self.chain.write().await;
        let Some(block) = chain.blocks.iter_mut().find(|b| b.height == height) else {
            return TamperOutcome::NotFound;
        };
        block.hash = block.full_content_hash();
        warn!(height, "corrupted block hash");
        TamperOutcome::Applied
    }

    /// Overwrite the previous hash of the block at `height`.
    pub async fn corrupt_previous_hash(&self, height: u64) -> TamperOutcome {
        if height == 0 {
            return TamperOutcome::GenesisProtected;
        }
        let mut chain = self.chain.write().await;
        let Some(block) = chain.blocks.iter_mut().find(|b| b.height == height) else {
            return TamperOutcome::NotFound;
        };
        block.previous_hash = Some(block.full_content_hash());
        warn!(height, "corrupted previous hash");
        TamperOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use starledger_core::{Keypair, Star};

    use crate::clock::ManualClock;
    use crate::config::LedgerConfig;
    use crate::validation::ChainFault;
    use crate::verifier::Ed25519Verifier;

    async fn ledger_with_claims(count: usize) -> Ledger {
        let clock = Arc::new(ManualClock::new(1_700_000_000));
        let ledger = Ledger::with_parts(LedgerConfig::default(), Ed25519Verifier, clock);
        ledger.initialize().await.unwrap();

        let keypair = Keypair::from_seed(&[0x11; 32]);
        let address = keypair.address();
        for i in 0..count {
            let message = ledger.request_challenge(&address).await;
            let signature = keypair.sign_message(&message).to_hex();
            ledger
                .submit_proof(
                    &address,
                    &message,
                    &signature,
                    Star::new("1", "2", format!("star {i}")),
                )
                .await
                .unwrap();
        }
        ledger
    }

    #[tokio::test]
    async fn test_corrupt_hash_mid_chain() {
        let ledger = ledger_with_claims(3).await;
        assert_eq!(ledger.corrupt_hash(2).await, TamperOutcome::Applied);

        assert_eq!(
            ledger.validate_chain().await,
            vec![
                ChainFault::HashMismatch { height: 2 },
                ChainFault::LinkMismatch { height: 3 },
            ]
        );
    }

    #[tokio::test]
    async fn test_corrupt_hash_tip() {
        let ledger = ledger_with_claims(3).await;
        assert_eq!(ledger.corrupt_hash(3).await, TamperOutcome::Applied);
        assert_eq!(
            ledger.validate_chain().await,
            vec![ChainFault::HashMismatch { height: 3 }]
        );
    }

    #[tokio::test]
    async fn test_corrupt_previous_hash() {
        let ledger = ledger_with_claims(2).await;
        assert_eq!(ledger.corrupt_previous_hash(1).await, TamperOutcome::Applied);
        assert_eq!(
            ledger.validate_chain().await,
            vec![
                ChainFault::HashMismatch { height: 1 },
                ChainFault::LinkMismatch { height: 1 },
            ]
        );
    }

    #[tokio::test]
    async fn test_genesis_and_missing_heights() {
        let ledger = ledger_with_claims(1).await;
        let before = ledger.blocks().await;

        assert_eq!(ledger.corrupt_hash(0).await, TamperOutcome::GenesisProtected);
        assert_eq!(
            ledger.corrupt_previous_hash(0).await,
            TamperOutcome::GenesisProtected
        );
        assert_eq!(ledger.corrupt_hash(9).await, TamperOutcome::NotFound);
        assert_eq!(ledger.corrupt_previous_hash(9).await, TamperOutcome::NotFound);

        assert_eq!(ledger.blocks().await, before);
        assert!(ledger.validate_chain().await.is_empty());
    }
}
