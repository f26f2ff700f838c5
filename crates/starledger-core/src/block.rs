//! Block: one entry in the ledger.
//!
//! A block carries structural metadata (height, time, previous hash, own hash)
//! plus a body holding the CBOR-encoded [`Payload`]. Once its hash has been
//! computed a block is treated as immutable.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::canonical::{decode_payload, encode_payload, full_content_preimage, hash_preimage};
use crate::crypto::{BlockHash, WalletAddress};
use crate::error::Result;

/// The star being registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Star {
    /// Right ascension, as given by the client.
    pub ra: String,
    /// Declination, as given by the client.
    pub dec: String,
    /// Free-text story attached to the star.
    pub story: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constellation: Option<String>,
}

impl Star {
    /// A star with coordinates and a story, no catalogue fields.
    pub fn new(ra: impl Into<String>, dec: impl Into<String>, story: impl Into<String>) -> Self {
        Self {
            ra: ra.into(),
            dec: dec.into(),
            story: story.into(),
            magnitude: None,
            constellation: None,
        }
    }
}

/// An ownership record: `owner` proved control of their wallet and claimed `star`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarClaim {
    pub owner: WalletAddress,
    pub star: Star,
}

/// The domain data carried by a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// The fixed marker of the first block.
    Genesis { note: String },
    /// A star ownership claim.
    StarClaim(StarClaim),
}

impl Payload {
    /// The owner of a claim payload.
    pub fn owner(&self) -> Option<&WalletAddress> {
        match self {
            Payload::Genesis { .. } => None,
            Payload::StarClaim(claim) => Some(&claim.owner),
        }
    }
}

/// A ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Position in the chain; 0 is genesis.
    pub height: u64,
    /// Append time, Unix seconds.
    pub time: i64,
    /// Hash of the block at `height - 1`; `None` for genesis.
    pub previous_hash: Option<BlockHash>,
    /// Hash over this block's own content, excluding this field.
    pub hash: BlockHash,
    /// CBOR-encoded payload.
    pub body: Bytes,
}

impl Block {
    /// Build a candidate block around `payload` with structural fields unset.
    pub fn new(payload: &Payload) -> Result<Self> {
        let body = encode_payload(payload)?;
        Ok(Self {
            height: 0,
            time: 0,
            previous_hash: None,
            hash: BlockHash::ZERO,
            body: Bytes::from(body),
        })
    }

    /// Compute the hash of the block's current fields (the stored hash is excluded).
    pub fn compute_hash(&self) -> BlockHash {
        BlockHash::hash(&hash_preimage(self))
    }

    /// Recompute the hash and compare with the stored one.
    pub fn validate(&self) -> bool {
        self.compute_hash() == self.hash
    }

    /// Decode the body back into its payload.
    pub fn decode_payload(&self) -> Result<Payload> {
        decode_payload(&self.body)
    }

    /// Hash over everything the block currently holds, stored hash included.
    ///
    /// Used by the tamper helpers; never equal to an honest [`Self::compute_hash`].
    pub fn full_content_hash(&self) -> BlockHash {
        BlockHash::hash(&full_content_preimage(self))
    }

    /// Check if this is the genesis block.
    pub fn is_genesis(&self) -> bool {
        self.height == 0 && self.previous_hash.is_none()
    }
}
