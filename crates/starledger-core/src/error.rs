//! Error types for starledger core.

use thiserror::Error;

/// Core errors raised by hashing, signing and block encoding.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("signature verification failed")]
    SignatureFailed,

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("decoding error: {0}")]
    Decoding(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
