//! Cryptographic primitives for starledger.
//!
//! Wraps Blake3 hashing and Ed25519 message signing with strong types.
//! A wallet address is the lowercase hex of an Ed25519 public key.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};

/// Domain separation prefix for wallet-signed messages.
pub const MESSAGE_SIGN_DOMAIN: &[u8] = b"starledger/signed-message/v1\n";

/// A 32-byte Blake3 hash identifying a block.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockHash(pub [u8; 32]);

impl BlockHash {
    /// Compute the Blake3 hash of the given data.
    pub fn hash(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| CoreError::InvalidHex(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CoreError::InvalidHex("block hash must be 32 bytes".into()))?;
        Ok(Self(arr))
    }

    /// The zero hash, carried by candidates before they are hashed.
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for BlockHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for BlockHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A wallet address as submitted by a client.
///
/// Any string is accepted here. Whether it names a usable key is only
/// decided when a signature is checked against it.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Wrap an address string.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Render the address for an Ed25519 public key.
    pub fn from_public_key(key: &VerifyingKey) -> Self {
        Self(hex::encode(key.to_bytes()))
    }

    /// The address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn verifying_key(&self) -> Result<VerifyingKey> {
        let bytes =
            hex::decode(&self.0).map_err(|e| CoreError::InvalidAddress(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CoreError::InvalidAddress("address must be 32 bytes".into()))?;
        VerifyingKey::from_bytes(&arr).map_err(|e| CoreError::InvalidAddress(e.to_string()))
    }
}

impl fmt::Debug for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletAddress({})", self.0)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WalletAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for WalletAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A 64-byte Ed25519 signature over a wallet message.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WalletSignature(pub [u8; 64]);

impl WalletSignature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| CoreError::MalformedSignature(e.to_string()))?;
        let arr: [u8; 64] = bytes
            .try_into()
            .map_err(|_| CoreError::MalformedSignature("signature must be 64 bytes".into()))?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for WalletSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletSig({}...)", &self.to_hex()[..16])
    }
}

/// The bytes a wallet actually signs for a text message.
pub fn signed_message_bytes(message: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(MESSAGE_SIGN_DOMAIN.len() + message.len());
    buf.extend_from_slice(MESSAGE_SIGN_DOMAIN);
    buf.extend_from_slice(message.as_bytes());
    buf
}

/// Verify a hex-encoded wallet signature over `message` for `address`.
pub fn verify_message(address: &WalletAddress, message: &str, signature: &str) -> Result<()> {
    let key = address.verifying_key()?;
    let sig = WalletSignature::from_hex(signature)?;
    key.verify(&signed_message_bytes(message), &Signature::from_bytes(&sig.0))
        .map_err(|_| CoreError::SignatureFailed)
}

/// A wallet keypair.
///
/// The ledger only verifies; this exists for clients and test fixtures.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// The wallet address of this keypair.
    pub fn address(&self) -> WalletAddress {
        WalletAddress::from_public_key(&self.signing_key.verifying_key())
    }

    /// Sign a text message under the wallet message domain.
    pub fn sign_message(&self, message: &str) -> WalletSignature {
        let sig = self.signing_key.sign(&signed_message_bytes(message));
        WalletSignature(sig.to_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({})", self.address())
    }
}
