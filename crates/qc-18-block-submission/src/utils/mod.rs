//! Utility modules for block submission

pub mod hashing;

pub use hashing::{display_hash, merkle_root, sha256, sha256d, sha256d_h256};
