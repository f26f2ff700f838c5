//! Error types for the ledger.

use starledger_core::CoreError;
use thiserror::Error;

/// Why a proof submission was turned away.
///
/// A rejection leaves the ledger untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The challenge was presented after the validation window closed.
    #[error("challenge expired: {elapsed_secs}s since issue")]
    Expired { elapsed_secs: i64 },

    /// The message was never issued by this ledger (or was already consumed).
    #[error("unrecognized challenge")]
    UnrecognizedChallenge,

    /// The signature did not verify against the address, or could not be parsed.
    #[error("invalid signature")]
    InvalidSignature,
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Submission rejected.
    #[error("submission rejected: {0}")]
    Rejected(#[from] Rejection),

    /// Block encoding or decoding error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

impl LedgerError {
    /// The rejection cause, if this is a rejected submission.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            LedgerError::Rejected(r) => Some(r),
            LedgerError::Core(_) => None,
        }
    }
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
