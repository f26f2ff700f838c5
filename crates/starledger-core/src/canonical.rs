//! Canonical CBOR encoding for block hashing.
//!
//! The block header is encoded following RFC 8949 Core Deterministic Encoding:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats (times are i64 seconds)
//!
//! The payload travels separately as the block body (plain CBOR via serde)
//! and is appended to the header bytes when hashing.

use crate::block::{Block, Payload};
use crate::crypto::BlockHash;
use crate::error::{CoreError, Result};

/// Domain separation prefix for block hashes.
pub const HASH_DOMAIN: &[u8] = b"starledger/block-hash/v1";

/// Header field keys. Keys 0-23 encode as single bytes in CBOR.
mod keys {
    pub const HEIGHT: u64 = 0;
    pub const TIME: u64 = 1;
    pub const PREVIOUS_HASH: u64 = 2;
    pub const HASH: u64 = 3;
}

/// Encode the structural fields of a block to canonical CBOR bytes.
pub fn canonical_header_bytes(
    height: u64,
    time: i64,
    previous_hash: Option<&BlockHash>,
) -> Vec<u8> {
    encode_header(height, time, previous_hash, None)
}

/// The bytes hashed to produce a block's own hash.
///
/// Format: HASH_DOMAIN || canonical_header || body
pub fn hash_preimage(block: &Block) -> Vec<u8> {
    let header = canonical_header_bytes(block.height, block.time, block.previous_hash.as_ref());
    with_domain_and_body(&header, block)
}

/// Like [`hash_preimage`] but with the stored hash included in the header.
///
/// Hashing this never reproduces the honest hash, which is what the tamper
/// helpers rely on.
pub fn full_content_preimage(block: &Block) -> Vec<u8> {
    let header = encode_header(
        block.height,
        block.time,
        block.previous_hash.as_ref(),
        Some(&block.hash),
    );
    with_domain_and_body(&header, block)
}

/// Encode a payload into block body bytes.
pub fn encode_payload(payload: &Payload) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::into_writer(payload, &mut buf).map_err(|e| CoreError::Encoding(e.to_string()))?;
    Ok(buf)
}

/// Decode block body bytes back into a payload.
pub fn decode_payload(bytes: &[u8]) -> Result<Payload> {
    ciborium::from_reader(bytes).map_err(|e| CoreError::Decoding(e.to_string()))
}

fn with_domain_and_body(header: &[u8], block: &Block) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HASH_DOMAIN.len() + header.len() + block.body.len());
    buf.extend_from_slice(HASH_DOMAIN);
    buf.extend_from_slice(header);
    buf.extend_from_slice(&block.body);
    buf
}

/// Encode the header map. Keys are emitted in ascending order, which for
/// single-byte integer keys is also encoded-byte order.
fn encode_header(
    height: u64,
    time: i64,
    previous_hash: Option<&BlockHash>,
    hash: Option<&BlockHash>,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(80);
    let entries = if hash.is_some() { 4 } else { 3 };
    encode_uint(&mut buf, 5, entries);

    encode_uint(&mut buf, 0, keys::HEIGHT);
    encode_uint(&mut buf, 0, height);

    encode_uint(&mut buf, 0, keys::TIME);
    encode_int(&mut buf, time);

    encode_uint(&mut buf, 0, keys::PREVIOUS_HASH);
    match previous_hash {
        Some(prev) => encode_bytes(&mut buf, prev.as_bytes()),
        None => buf.push(0xf6),
    }

    if let Some(hash) = hash {
        encode_uint(&mut buf, 0, keys::HASH);
        encode_bytes(&mut buf, hash.as_bytes());
    }
    buf
}

/// Encode a signed integer (major types 0 and 1).
fn encode_int(buf: &mut Vec<u8>, n: i64) {
    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        encode_uint(buf, 1, !(n as u64));
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genesis_header_encoding() {
        let bytes = canonical_header_bytes(0, 0, None);
        // map(3), 0 => 0, 1 => 0, 2 => null
        assert_eq!(bytes, vec![0xa3, 0x00, 0x00, 0x01, 0x00, 0x02, 0xf6]);
    }

    #[test]
    fn test_header_integer_widths() {
        let bytes = canonical_header_bytes(24, 1_700_000_000, None);
        assert_eq!(&bytes[..4], &[0xa3, 0x00, 0x18, 24]);
        assert_eq!(bytes[4], 0x01);
        assert_eq!(bytes[5], 0x1a);
        assert_eq!(&bytes[6..10], &1_700_000_000u32.to_be_bytes());
    }

    #[test]
    fn test_negative_time_encoding() {
        let bytes = canonical_header_bytes(0, -1, None);
        assert_eq!(bytes, vec![0xa3, 0x00, 0x00, 0x01, 0x20, 0x02, 0xf6]);
    }

    #[test]
    fn test_previous_hash_changes_header() {
        let prev = BlockHash::from_bytes([0xab; 32]);
        let with_prev = canonical_header_bytes(1, 100, Some(&prev));
        let without = canonical_header_bytes(1, 100, None);
        assert_ne!(with_prev, without);
        // bytes(32) header is 0x58 0x20
        assert!(with_prev.windows(2).any(|w| w == [0x58, 0x20]));
    }

    #[test]
    fn test_extreme_time_encoding() {
        let bytes = canonical_header_bytes(0, i64::MIN, None);
        assert_eq!(&bytes[3..5], &[0x01, 0x3b]);
        assert_eq!(&bytes[5..13], &(i64::MAX as u64).to_be_bytes());
    }

    #[test]
    fn test_full_content_header_appends_hash_key() {
        let block = Block {
            height: 1,
            time: 5,
            previous_hash: Some(BlockHash::from_bytes([0x01; 32])),
            hash: BlockHash::from_bytes([0x02; 32]),
            body: bytes::Bytes::from_static(b"body"),
        };
        let honest = hash_preimage(&block);
        let full = full_content_preimage(&block);

        let domain = HASH_DOMAIN.len();
        assert_eq!(honest[domain], 0xa3);
        assert_eq!(full[domain], 0xa4);
        // key 3, bytes(32), then the stored hash, then the body
        let tail = &full[full.len() - 4 - 32 - 3..];
        assert_eq!(&tail[..3], &[0x03, 0x58, 0x20]);
        assert_eq!(&tail[3..35], &[0x02; 32]);
        assert_eq!(&tail[35..], b"body");
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = decode_payload(&[0xff, 0x00, 0x13]);
        assert!(matches!(result, Err(CoreError::Decoding(_))));
    }
}
