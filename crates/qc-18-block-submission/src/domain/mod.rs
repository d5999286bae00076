//! Domain layer - Pure decoding logic for block submission
//!
//! Nothing here performs I/O or awaits; every function is a pure
//! transformation over caller-supplied bytes.
//!
//! ## Components
//!
//! - [`wire`]: hex string → bytes
//! - [`header`]: positional codec for the fixed 86-byte header
//! - [`transaction`]: CompactSize-prefixed transaction list decoder
//! - [`reconstruct`]: bytes → [`CandidateBlock`]

mod entities;
pub mod header;
pub mod reconstruct;
pub mod transaction;
pub mod wire;

pub use entities::*;
pub use reconstruct::{reconstruct, BlockReconstructor};
pub use transaction::{decode_transactions, TxDecodeLimits, MAX_COMPACT_SIZE};
pub use wire::{decode_hex, encode_hex};
