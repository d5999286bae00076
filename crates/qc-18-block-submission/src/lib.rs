//! # Quantum Chain - Block Submission (Subsystem 18)
//!
//! **Bounded Context:** Externally mined block intake
//! **Architecture Compliance:** DDD + Hexagonal + TDD
//!
//! ## Purpose
//!
//! Accepts a candidate block mined outside the node (miner software, pool
//! server), encoded as hex, and turns it into a [`CandidateBlock`] that is
//! handed to the consensus validation engine exactly once. Input is
//! untrusted: every malformed submission is rejected with a typed error and
//! never reaches consensus.
//!
//! ## Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Adapters (Outer)                                   │
//! │  - RPC: submitblock params / response mapping       │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Ports (Middle)                                     │
//! │  - Inbound: BlockSubmissionApi                      │
//! │  - Outbound: BlockValidator                         │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (Inner - Pure Logic)                        │
//! │  - Wire decoder (hex)                               │
//! │  - Header codec, transaction decoder                │
//! │  - BlockReconstructor                               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//!
//! `hexdata` is an 86-byte header (see [`domain::header`]) followed by at
//! least one byte of additive PoW data. `txdata`, when present, is a
//! CompactSize-prefixed transaction list.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! let controller = BlockSubmissionController::new(engine, SubmissionConfig::default())?;
//! let result = controller.submit(RawSubmission::new(hexdata)).await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// RPC adapters
pub mod adapters;
/// Domain models and decoding logic
pub mod domain;
pub mod ports;
pub mod service;
pub mod utils;

mod config;
mod error;
mod metrics;

pub use config::{SubmissionConfig, TrailingBytesPolicy};
pub use error::{ConfigError, DecodeErrorKind, Result, SubmissionError};
pub use metrics::Metrics;

pub use domain::{
    decode_hex, reconstruct, AdditiveData, BlockHeader, BlockReconstructor, CandidateBlock,
    OutPoint, SubmissionResult, Transaction, TxIn, TxOut,
};

pub use ports::{
    BlockSubmissionApi, BlockValidator, RawSubmission, ValidationOutcome, ValidationState,
};

pub use service::BlockSubmissionController;

/// Subsystem identifier for IPC communication
pub const SUBSYSTEM_ID: u8 = 18;

/// Fixed block header size in bytes
pub const HEADER_SIZE: usize = 86;

/// Default cap on decoded blob size (4 MiB)
pub const DEFAULT_MAX_SUBMISSION_BYTES: usize = 4 * 1024 * 1024;

/// Default cap on declared transaction count
pub const DEFAULT_MAX_TRANSACTIONS: usize = 100_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsystem_id() {
        assert_eq!(SUBSYSTEM_ID, 18);
    }

    #[test]
    fn test_header_size_matches_layout() {
        // version + prev hash + merkle root + time + difficulty + nonce + shift
        assert_eq!(HEADER_SIZE, 4 + 32 + 32 + 4 + 8 + 4 + 2);
        assert_eq!(domain::header::SHIFT_OFFSET + 2, HEADER_SIZE);
    }

    #[test]
    fn test_default_limits_admit_minimal_block() {
        assert!(DEFAULT_MAX_SUBMISSION_BYTES > HEADER_SIZE);
        assert!(DEFAULT_MAX_TRANSACTIONS > 0);
    }
}
