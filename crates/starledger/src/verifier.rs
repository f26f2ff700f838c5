//! Signature verification seam.
//!
//! The ledger never signs. It asks a [`MessageVerifier`] whether a wallet
//! signed a message, and treats any error as a failed verification.

use async_trait::async_trait;
use starledger_core::{verify_message, CoreError, WalletAddress};

/// Checks wallet signatures over text messages.
#[async_trait]
pub trait MessageVerifier: Send + Sync {
    /// Verify `signature` over `message` for `address`.
    ///
    /// Malformed addresses or signatures are reported as errors, not panics.
    async fn verify(
        &self,
        address: &WalletAddress,
        message: &str,
        signature: &str,
    ) -> Result<(), CoreError>;
}

/// Ed25519 wallet signatures, hex-encoded, under the starledger message domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

#[async_trait]
impl MessageVerifier for Ed25519Verifier {
    async fn verify(
        &self,
        address: &WalletAddress,
        message: &str,
        signature: &str,
    ) -> Result<(), CoreError> {
        verify_message(address, message, signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starledger_core::Keypair;

    #[tokio::test]
    async fn test_ed25519_verifier() {
        let keypair = Keypair::from_seed(&[0x07; 32]);
        let sig = keypair.sign_message("hello").to_hex();

        let verifier = Ed25519Verifier;
        assert!(verifier.verify(&keypair.address(), "hello", &sig).await.is_ok());
        assert!(verifier.verify(&keypair.address(), "bye", &sig).await.is_err());
        assert!(verifier
            .verify(&keypair.address(), "hello", "###")
            .await
            .is_err());
    }
}
