//! Ledger configuration.

use starledger_core::DEFAULT_CHALLENGE_TAG;

/// Default validation window for ownership challenges, in seconds.
pub const DEFAULT_VALIDATION_WINDOW_SECS: i64 = 300;

/// Default genesis marker text.
pub const DEFAULT_GENESIS_NOTE: &str = "Genesis Block";

/// Configuration for the Ledger.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Seconds a challenge stays valid after issue. Elapsed time equal to the
    /// window is still accepted.
    pub validation_window_secs: i64,
    /// Tag closing every issued challenge string.
    pub challenge_tag: String,
    /// Remove a challenge once a submission using it is accepted.
    pub consume_challenges: bool,
    /// Marker text stored in the genesis payload.
    pub genesis_note: String,
}

impl LedgerConfig {
    /// Set the validation window.
    pub fn validation_window_secs(mut self, secs: i64) -> Self {
        self.validation_window_secs = secs;
        self
    }

    /// Set the challenge tag.
    pub fn challenge_tag(mut self, tag: impl Into<String>) -> Self {
        self.challenge_tag = tag.into();
        self
    }

    /// Enable or disable challenge consumption.
    pub fn consume_challenges(mut self, consume: bool) -> Self {
        self.consume_challenges = consume;
        self
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            validation_window_secs: DEFAULT_VALIDATION_WINDOW_SECS,
            challenge_tag: DEFAULT_CHALLENGE_TAG.to_string(),
            consume_challenges: false,
            genesis_note: DEFAULT_GENESIS_NOTE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.validation_window_secs, 300);
        assert_eq!(config.challenge_tag, "starRegistry");
        assert!(!config.consume_challenges);
        assert_eq!(config.genesis_note, "Genesis Block");
    }

    #[test]
    fn test_builder_setters() {
        let config = LedgerConfig::default()
            .validation_window_secs(60)
            .challenge_tag("custom")
            .consume_challenges(true);
        assert_eq!(config.validation_window_secs, 60);
        assert_eq!(config.challenge_tag, "custom");
        assert!(config.consume_challenges);
    }
}
