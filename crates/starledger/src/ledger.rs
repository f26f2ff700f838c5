//! The Ledger: an append-only, hash-linked chain of star ownership claims.
//!
//! The chain and its cached height live behind a single `RwLock`. The append
//! primitive holds the write half from the height read through the push, so
//! at most one append is ever in flight.

use std::collections::HashSet;
use std::sync::Arc;

use starledger_core::{
    challenge_message, issued_at, Block, BlockHash, Payload, Star, StarClaim, WalletAddress,
};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::LedgerConfig;
use crate::error::{Rejection, Result};
use crate::validation::{validate_blocks, ChainFault};
use crate::verifier::{Ed25519Verifier, MessageVerifier};

/// The block sequence and its cached height.
pub(crate) struct Chain {
    pub(crate) blocks: Vec<Block>,
    /// `blocks.len() - 1`, or -1 before genesis.
    pub(crate) height: i64,
}

impl Chain {
    fn empty() -> Self {
        Self {
            blocks: Vec::new(),
            height: -1,
        }
    }

    /// Stamp `candidate` with height, time and link, hash it, and push it.
    fn seal(&mut self, mut candidate: Block, now: i64) -> Block {
        let h = self.height;
        candidate.height = (h + 1) as u64;
        candidate.time = now;
        if h != -1 {
            candidate.previous_hash = self.blocks.last().map(|b| b.hash);
        }
        candidate.hash = candidate.compute_hash();

        self.height = candidate.height as i64;
        self.blocks.push(candidate.clone());
        candidate
    }
}

/// The main Ledger struct.
///
/// Provides:
/// - Genesis bootstrap
/// - Two-phase ownership proofs (challenge, then signed submission)
/// - Queries by hash, height and owner
/// - Whole-chain validation
pub struct Ledger<V: MessageVerifier = Ed25519Verifier> {
    config: LedgerConfig,
    verifier: V,
    clock: Arc<dyn Clock>,
    pub(crate) chain: RwLock<Chain>,
    /// Issued challenge strings, matched exactly.
    challenges: Mutex<HashSet<String>>,
}

impl Ledger<Ed25519Verifier> {
    /// Create an empty ledger with Ed25519 verification and the system clock.
    ///
    /// The ledger has no genesis yet; call [`Ledger::initialize`] or use
    /// [`Ledger::open`].
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_parts(config, Ed25519Verifier, Arc::new(SystemClock))
    }

    /// Create a ledger and bootstrap its genesis block.
    pub async fn open(config: LedgerConfig) -> Result<Self> {
        let ledger = Self::new(config);
        ledger.initialize().await?;
        Ok(ledger)
    }
}

impl<V: MessageVerifier> Ledger<V> {
    /// Create an empty ledger from explicit parts.
    pub fn with_parts(config: LedgerConfig, verifier: V, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            verifier,
            clock,
            chain: RwLock::new(Chain::empty()),
            challenges: Mutex::new(HashSet::new()),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Bootstrap and append
    // ─────────────────────────────────────────────────────────────────────────

    /// Ensure the genesis block exists. Calling this again is a no-op.
    pub async fn initialize(&self) -> Result<()> {
        let mut chain = self.chain.write().await;
        if chain.height != -1 {
            return Ok(());
        }
        let genesis = self.seal_genesis(&mut chain)?;
        info!(hash = %genesis.hash, "created genesis block");
        Ok(())
    }

    /// Current chain height: -1 before genesis, 0 after.
    pub async fn current_height(&self) -> i64 {
        self.chain.read().await.height
    }

    /// The append primitive.
    ///
    /// Holds the chain write lock for the whole height-read-through-push
    /// sequence. A claim arriving before genesis bootstraps genesis first so
    /// index 0 always holds the genesis block.
    async fn append(&self, candidate: Block) -> Result<Block> {
        let mut chain = self.chain.write().await;
        if chain.height == -1 {
            let genesis = self.seal_genesis(&mut chain)?;
            info!(hash = %genesis.hash, "created genesis block ahead of first claim");
        }
        let block = chain.seal(candidate, self.clock.now_secs());
        debug!(height = block.height, hash = %block.hash, "appended block");
        Ok(block)
    }

    fn seal_genesis(&self, chain: &mut Chain) -> Result<Block> {
        let payload = Payload::Genesis {
            note: self.config.genesis_note.clone(),
        };
        let candidate = Block::new(&payload)?;
        Ok(chain.seal(candidate, self.clock.now_secs()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ownership proofs
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue a challenge for `address` and record it as pending.
    pub async fn request_challenge(&self, address: &WalletAddress) -> String {
        let message = challenge_message(address, self.clock.now_secs(), &self.config.challenge_tag);
        self.challenges.lock().await.insert(message.clone());
        debug!(%address, %message, "issued challenge");
        message
    }

    /// Submit a signed challenge together with the star being claimed.
    ///
    /// Rejection causes are checked in a fixed order: expiry, then whether the
    /// challenge was issued here, then the signature. A rejected submission
    /// leaves the ledger unchanged.
    pub async fn submit_proof(
        &self,
        address: &WalletAddress,
        message: &str,
        signature: &str,
        star: Star,
    ) -> Result<Block> {
        let now = self.clock.now_secs();
        let elapsed = issued_at(message).map(|at| now.saturating_sub(at));
        let verified = self.verifier.verify(address, message, signature).await;

        if let Some(elapsed_secs) = elapsed {
            if elapsed_secs > self.config.validation_window_secs {
                warn!(%address, elapsed_secs, "rejected expired challenge");
                return Err(Rejection::Expired { elapsed_secs }.into());
            }
        }

        let mut challenges = self.challenges.lock().await;
        if !challenges.contains(message) {
            warn!(%address, %message, "rejected unrecognized challenge");
            return Err(Rejection::UnrecognizedChallenge.into());
        }

        if let Err(e) = verified {
            warn!(%address, error = %e, "rejected invalid signature");
            return Err(Rejection::InvalidSignature.into());
        }

        let candidate = Block::new(&Payload::StarClaim(StarClaim {
            owner: address.clone(),
            star,
        }))?;

        let consumed = self.config.consume_challenges && challenges.remove(message);
        drop(challenges);

        match self.append(candidate).await {
            Ok(block) => {
                info!(%address, height = block.height, "registered star claim");
                Ok(block)
            }
            Err(e) => {
                if consumed {
                    self.challenges.lock().await.insert(message.to_string());
                }
                Err(e)
            }
        }
    }

    /// Number of challenges currently recorded as pending.
    pub async fn pending_challenges(&self) -> usize {
        self.challenges.lock().await.len()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a block by hash.
    pub async fn get_block_by_hash(&self, hash: &BlockHash) -> Option<Block> {
        let chain = self.chain.read().await;
        chain.blocks.iter().find(|b| &b.hash == hash).cloned()
    }

    /// Get a block by hex-encoded hash. Unparseable hex is simply not found.
    pub async fn get_block_by_hash_hex(&self, hash: &str) -> Option<Block> {
        let hash = BlockHash::from_hex(hash).ok()?;
        self.get_block_by_hash(&hash).await
    }

    /// Get a block by height. Negative or unassigned heights are not found.
    pub async fn get_block_by_height(&self, height: i64) -> Option<Block> {
        let height = u64::try_from(height).ok()?;
        let chain = self.chain.read().await;
        chain.blocks.iter().find(|b| b.height == height).cloned()
    }

    /// All claims registered by `owner`, in chain order.
    pub async fn get_blocks_by_owner(&self, owner: &WalletAddress) -> Result<Vec<StarClaim>> {
        let candidates: Vec<Block> = {
            let chain = self.chain.read().await;
            chain.blocks.iter().skip(1).cloned().collect()
        };

        let payloads = candidates
            .iter()
            .map(Block::decode_payload)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(payloads
            .into_iter()
            .filter_map(|payload| match payload {
                Payload::StarClaim(claim) if &claim.owner == owner => Some(claim),
                _ => None,
            })
            .collect())
    }

    /// Snapshot of the whole chain.
    pub async fn blocks(&self) -> Vec<Block> {
        self.chain.read().await.blocks.clone()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Check every non-genesis block's own hash and its link to its predecessor.
    ///
    /// Returns every fault found, in chain order; empty means consistent.
    pub async fn validate_chain(&self) -> Vec<ChainFault> {
        let chain = self.chain.read().await;
        let faults = validate_blocks(&chain.blocks);
        debug!(blocks = chain.blocks.len(), faults = faults.len(), "validated chain");
        faults
    }
}
