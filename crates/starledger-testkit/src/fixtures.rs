//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: wallets that sign challenges the
//! way a client would, and a ledger driven by a manual clock.

use std::sync::Arc;

use rand::Rng;
use starledger::{Ed25519Verifier, Ledger, LedgerConfig, ManualClock, Result};
use starledger_core::{Block, Keypair, Star, WalletAddress};

/// Fixed start time for fixture clocks (2023-11-14T22:13:20Z).
pub const FIXTURE_EPOCH: i64 = 1_700_000_000;

/// A client-side wallet.
pub struct TestWallet {
    pub keypair: Keypair,
}

impl TestWallet {
    /// Create a wallet with a random key.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
        }
    }

    /// Create with a deterministic key from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
        }
    }

    /// The wallet address.
    pub fn address(&self) -> WalletAddress {
        self.keypair.address()
    }

    /// Sign a message, hex-encoded as the ledger expects.
    pub fn sign(&self, message: &str) -> String {
        self.keypair.sign_message(message).to_hex()
    }

    /// Run the full challenge/sign/submit round against `ledger`.
    pub async fn claim(&self, ledger: &Ledger, star: Star) -> Result<Block> {
        let address = self.address();
        let message = ledger.request_challenge(&address).await;
        let signature = self.sign(&message);
        ledger.submit_proof(&address, &message, &signature, star).await
    }
}

impl Default for TestWallet {
    fn default() -> Self {
        Self::new()
    }
}

/// A ledger with genesis in place and a clock the test controls.
pub struct LedgerFixture {
    pub ledger: Ledger,
    pub clock: Arc<ManualClock>,
}

impl LedgerFixture {
    /// Create an initialized ledger with the default configuration.
    pub async fn new() -> Result<Self> {
        Self::with_config(LedgerConfig::default()).await
    }

    /// Create an initialized ledger with `config`.
    pub async fn with_config(config: LedgerConfig) -> Result<Self> {
        let clock = Arc::new(ManualClock::new(FIXTURE_EPOCH));
        let ledger = Ledger::with_parts(config, Ed25519Verifier, clock.clone());
        ledger.initialize().await?;
        Ok(Self { ledger, clock })
    }

    /// Create a ledger that has not been initialized.
    pub fn uninitialized() -> Self {
        let clock = Arc::new(ManualClock::new(FIXTURE_EPOCH));
        let ledger = Ledger::with_parts(LedgerConfig::default(), Ed25519Verifier, clock.clone());
        Self { ledger, clock }
    }
}

/// Create multiple wallets with distinct deterministic keys.
pub fn multi_wallet_fixtures(count: usize) -> Vec<TestWallet> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[31] = 0x5a;
            TestWallet::with_seed(seed)
        })
        .collect()
}

/// A star with a fixed position and the given story.
pub fn star(story: &str) -> Star {
    Star::new("16h 29m 1.0s", "-26° 29' 24.9", story)
}

/// A star at a random position.
pub fn random_star() -> Star {
    let mut rng = rand::thread_rng();
    let ra = format!(
        "{}h {}m {:.1}s",
        rng.gen_range(0..24),
        rng.gen_range(0..60),
        rng.gen_range(0.0..60.0)
    );
    let dec = format!("{}° {}'", rng.gen_range(-90..=90), rng.gen_range(0..60));
    Star::new(ra, dec, "randomly placed")
}

/// Flip one bit of a hex-encoded signature, keeping it well-formed.
pub fn flip_signature_bit(signature: &str) -> String {
    let mut bytes = hex::decode(signature).unwrap_or_default();
    if let Some(first) = bytes.first_mut() {
        *first ^= 0x01;
    }
    hex::encode(bytes)
}
