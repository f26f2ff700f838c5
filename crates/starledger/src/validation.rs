//! Chain validation: self-hash and link checks over a block sequence.

use starledger_core::Block;
use thiserror::Error;

/// An inconsistency found by chain validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChainFault {
    /// The stored hash does not match a recomputation over the block's fields.
    #[error("block {height}: stored hash does not match recomputed hash")]
    HashMismatch { height: u64 },

    /// The previous hash does not match the hash stored on the preceding block.
    #[error("block {height}: previous hash does not match hash of preceding block")]
    LinkMismatch { height: u64 },
}

impl ChainFault {
    /// Height of the offending block.
    pub fn height(&self) -> u64 {
        match self {
            ChainFault::HashMismatch { height } | ChainFault::LinkMismatch { height } => *height,
        }
    }
}

/// Validate every non-genesis block in `blocks`.
///
/// Both checks run for every block; faults accumulate in chain order,
/// self-hash fault before link fault for the same block.
pub fn validate_blocks(blocks: &[Block]) -> Vec<ChainFault> {
    let mut faults = Vec::new();

    for pair in blocks.windows(2) {
        let (prev, block) = (&pair[0], &pair[1]);

        if !block.validate() {
            faults.push(ChainFault::HashMismatch {
                height: block.height,
            });
        }

        if block.previous_hash != Some(prev.hash) {
            faults.push(ChainFault::LinkMismatch {
                height: block.height,
            });
        }
    }

    faults
}

#[cfg(test)]
mod tests {
    use super::*;
    use starledger_core::{BlockHash, Payload};

    fn chain(len: u64) -> Vec<Block> {
        let mut blocks: Vec<Block> = Vec::new();
        for height in 0..len {
            let payload = Payload::Genesis {
                note: format!("entry {height}"),
            };
            let mut block = Block::new(&payload).unwrap();
            block.height = height;
            block.time = 1_700_000_000 + height as i64;
            block.previous_hash = blocks.last().map(|b| b.hash);
            block.hash = block.compute_hash();
            blocks.push(block);
        }
        blocks
    }

    #[test]
    fn test_consistent_chain_has_no_faults() {
        assert!(validate_blocks(&chain(5)).is_empty());
        assert!(validate_blocks(&chain(1)).is_empty());
        assert!(validate_blocks(&[]).is_empty());
    }

    #[test]
    fn test_bad_hash_reports_both_faults() {
        let mut blocks = chain(4);
        blocks[2].hash = BlockHash::from_bytes([0xee; 32]);

        let faults = validate_blocks(&blocks);
        assert_eq!(
            faults,
            vec![
                ChainFault::HashMismatch { height: 2 },
                ChainFault::LinkMismatch { height: 3 },
            ]
        );
    }

    #[test]
    fn test_bad_previous_hash_reports_both_faults() {
        let mut blocks = chain(3);
        blocks[1].previous_hash = Some(BlockHash::from_bytes([0xee; 32]));

        let faults = validate_blocks(&blocks);
        assert_eq!(
            faults,
            vec![
                ChainFault::HashMismatch { height: 1 },
                ChainFault::LinkMismatch { height: 1 },
            ]
        );
    }

    #[test]
    fn test_genesis_is_not_checked() {
        let mut blocks = chain(1);
        blocks[0].hash = BlockHash::from_bytes([0xee; 32]);
        assert!(validate_blocks(&blocks).is_empty());
    }

    #[test]
    fn test_fault_messages() {
        let fault = ChainFault::LinkMismatch { height: 4 };
        assert_eq!(
            fault.to_string(),
            "block 4: previous hash does not match hash of preceding block"
        );
        assert_eq!(fault.height(), 4);

        let fault = ChainFault::HashMismatch { height: 2 };
        assert_eq!(
            fault.to_string(),
            "block 2: stored hash does not match recomputed hash"
        );
    }
}
