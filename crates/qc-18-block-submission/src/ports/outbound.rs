//! Outbound ports (driven side - SPI)

use crate::domain::CandidateBlock;
use async_trait::async_trait;

/// Port: Consensus validation engine.
///
/// The engine owns its own locking and may extend chain state when it
/// accepts; callers invoke it at most once per submission.
#[async_trait]
pub trait BlockValidator: Send + Sync {
    /// Validate and, if valid, accept a fully reconstructed block.
    ///
    /// `source_peer` is `None` for locally submitted blocks. The block is
    /// consumed by the call.
    ///
    /// An `Err` means the engine could not reach a verdict; a consensus
    /// refusal is `Ok` with `accepted == false`.
    async fn validate_block(
        &self,
        block: CandidateBlock,
        source_peer: Option<[u8; 32]>,
    ) -> Result<ValidationOutcome, String>;
}

/// Verdict returned by the validation engine
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Whether the block was accepted
    pub accepted: bool,

    /// Engine-internal validation state
    pub state: ValidationState,
}

impl ValidationOutcome {
    /// Accepted verdict with a clean state
    pub fn accepted() -> Self {
        Self {
            accepted: true,
            state: ValidationState::default(),
        }
    }

    /// Rejected verdict carrying the engine's reason
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            state: ValidationState {
                reason: Some(reason.into()),
            },
        }
    }
}

/// Engine-internal validation detail.
///
/// Only logged by this subsystem; no reason-code scheme is derived from it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationState {
    /// Free-form rejection reason, if the engine reported one
    pub reason: Option<String>,
}
