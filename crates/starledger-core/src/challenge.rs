//! Ownership challenges.
//!
//! A challenge is the string `<address>:<issued_at>:<tag>` that a client signs
//! with its wallet to prove control of `address`.

use crate::crypto::WalletAddress;

/// Tag closing every challenge string issued by default.
pub const DEFAULT_CHALLENGE_TAG: &str = "starRegistry";

/// Separator between challenge fields.
pub const CHALLENGE_SEPARATOR: char = ':';

/// Render the challenge string for `address` issued at `issued_at` (Unix seconds).
pub fn challenge_message(address: &WalletAddress, issued_at: i64, tag: &str) -> String {
    format!(
        "{address}{sep}{issued_at}{sep}{tag}",
        sep = CHALLENGE_SEPARATOR
    )
}

/// Extract the issue time embedded in a challenge string.
///
/// Reads the second separator-delimited field. Returns `None` when the field
/// is missing or is not an integer.
pub fn issued_at(message: &str) -> Option<i64> {
    message
        .split(CHALLENGE_SEPARATOR)
        .nth(1)
        .and_then(|field| field.trim().parse::<i64>().ok())
}
