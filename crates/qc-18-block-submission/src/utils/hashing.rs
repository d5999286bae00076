//! Hashing utilities for block submission
//!
//! Block and transaction identifiers on this chain are double SHA-256 over
//! the wire serialization, kept in wire byte order.

use primitive_types::H256;
use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of data
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute double SHA-256 hash (Bitcoin-style)
#[inline]
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    let first_hash = sha256(data);
    sha256(&first_hash)
}

/// Double SHA-256 as H256
#[inline]
pub fn sha256d_h256(data: &[u8]) -> H256 {
    H256::from(sha256d(data))
}

/// Compute a merkle root over leaf hashes.
///
/// Each level hashes adjacent pairs with double SHA-256; an odd trailing
/// hash is paired with itself. Returns `None` for no leaves.
pub fn merkle_root(leaves: &[H256]) -> Option<H256> {
    if leaves.is_empty() {
        return None;
    }

    let mut level: Vec<H256> = leaves.to_vec();
    let mut buf = [0u8; 64];

    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| {
                let left = pair[0];
                let right = *pair.get(1).unwrap_or(&left);
                buf[..32].copy_from_slice(left.as_bytes());
                buf[32..].copy_from_slice(right.as_bytes());
                sha256d_h256(&buf)
            })
            .collect();
    }

    level.first().copied()
}

/// Render a wire-order hash in display order (byte-reversed hex)
pub fn display_hash(hash: &H256) -> String {
    let mut bytes = hash.to_fixed_bytes();
    bytes.reverse();
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256d_double_hash() {
        let data = b"test";
        let hash1 = sha256(data);
        let hash2 = sha256(&hash1);
        assert_eq!(sha256d(data), hash2);
    }

    #[test]
    fn test_merkle_root_empty() {
        assert_eq!(merkle_root(&[]), None);
    }

    #[test]
    fn test_merkle_root_single_leaf_is_leaf() {
        let leaf = H256::repeat_byte(0x11);
        assert_eq!(merkle_root(&[leaf]), Some(leaf));
    }

    #[test]
    fn test_merkle_root_odd_leaf_duplicated() {
        let a = H256::repeat_byte(0xAA);
        let b = H256::repeat_byte(0xBB);
        let c = H256::repeat_byte(0xCC);

        // Third leaf pairs with itself, so [a, b, c] == [a, b, c, c]
        assert_eq!(merkle_root(&[a, b, c]), merkle_root(&[a, b, c, c]));
        assert_ne!(merkle_root(&[a, b]), merkle_root(&[b, a]));
    }

    #[test]
    fn test_display_hash_reverses() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x01;
        let hash = H256::from(bytes);
        let shown = display_hash(&hash);
        assert!(shown.ends_with("01"));
        assert!(shown.starts_with("00"));
    }
}
