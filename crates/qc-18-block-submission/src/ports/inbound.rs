//! Inbound ports (driving side - API)

use crate::domain::SubmissionResult;
use async_trait::async_trait;

/// Primary port: Block submission service
#[async_trait]
pub trait BlockSubmissionApi: Send + Sync {
    /// Decode, reconstruct and submit one externally mined block.
    ///
    /// Single-shot: a rejection or decode error is final for this call.
    async fn submit(&self, raw: RawSubmission) -> SubmissionResult;
}

/// Raw submission as received from the transport
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawSubmission {
    /// Hex-encoded block: header followed by additive data
    pub hexdata: String,

    /// Hex-encoded transaction list, if supplied
    pub txdata: Option<String>,
}

impl RawSubmission {
    /// Submission without a transaction blob
    pub fn new(hexdata: impl Into<String>) -> Self {
        Self {
            hexdata: hexdata.into(),
            txdata: None,
        }
    }

    /// Attach a transaction blob
    pub fn with_txdata(mut self, txdata: impl Into<String>) -> Self {
        self.txdata = Some(txdata.into());
        self
    }
}
