//! Concrete Block Submission Controller
//!
//! Wires the pure decoding pipeline to the validation engine port:
//! hex → bytes → [`CandidateBlock`] → engine verdict → [`SubmissionResult`].

use crate::{
    config::SubmissionConfig,
    domain::{decode_hex, wire::decoded_len, BlockReconstructor, CandidateBlock, SubmissionResult},
    error::{ConfigError, Result, SubmissionError},
    metrics::Metrics,
    ports::{BlockSubmissionApi, BlockValidator, RawSubmission},
    utils::display_hash,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Concrete implementation of [`BlockSubmissionApi`]
pub struct BlockSubmissionController {
    /// Consensus validation engine
    validator: Arc<dyn BlockValidator>,

    /// Bytes → block decoder
    reconstructor: BlockReconstructor,

    /// Submission limits
    config: SubmissionConfig,

    /// Counters
    metrics: Arc<Metrics>,
}

impl BlockSubmissionController {
    /// Create a new controller in front of `validator`.
    ///
    /// # Errors
    ///
    /// Returns error if `config` fails [`SubmissionConfig::validate`].
    pub fn new(
        validator: Arc<dyn BlockValidator>,
        config: SubmissionConfig,
    ) -> std::result::Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            error!(error = %e, "[qc-18] Refusing to start with invalid config");
            return Err(e);
        }

        info!("[qc-18] Initializing Block Submission Controller");
        info!("  Max submission bytes: {}", config.max_submission_bytes);
        info!("  Max transactions: {}", config.max_transactions);
        info!("  Trailing tx bytes: {:?}", config.trailing_tx_bytes);

        Ok(Self {
            validator,
            reconstructor: BlockReconstructor::new(config.clone()),
            config,
            metrics: Arc::new(Metrics::new()),
        })
    }

    /// Get the metrics collector
    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    /// Get the submission configuration
    pub fn config(&self) -> &SubmissionConfig {
        &self.config
    }

    /// Decode a raw submission into a candidate block without submitting it
    pub fn decode(&self, raw: &RawSubmission) -> Result<CandidateBlock> {
        let block_bytes = self.decode_blob(&raw.hexdata, self.config.max_submission_bytes)?;

        let tx_bytes = match raw.txdata.as_deref() {
            Some(txdata) => Some(self.decode_blob(txdata, self.config.max_transaction_bytes)?),
            None => None,
        };

        self.reconstructor
            .reconstruct(&block_bytes, tx_bytes.as_deref())
    }

    /// Size-check then hex-decode one blob
    fn decode_blob(&self, hex: &str, maximum: usize) -> Result<Vec<u8>> {
        let length = decoded_len(hex);
        if length > maximum {
            return Err(SubmissionError::SubmissionTooLarge { length, maximum });
        }
        decode_hex(hex)
    }

    async fn submit_inner(&self, raw: RawSubmission) -> SubmissionResult {
        self.metrics.record_received();

        let block = match self.decode(&raw) {
            Ok(block) => block,
            Err(e) => {
                self.metrics.record_decode_failure();
                warn!(error = %e, "[qc-18] Submission failed to decode");
                return SubmissionResult::DecodeError(e.kind());
            }
        };

        let block_hash = display_hash(&block.hash());
        let tx_count = block.transactions.len();
        self.metrics.record_decoded(tx_count);
        debug!(
            block_hash = %block_hash,
            tx_count,
            additive_len = block.additive_data.len(),
            "[qc-18] Candidate block reconstructed"
        );

        match self.validator.validate_block(block, None).await {
            Ok(outcome) if outcome.accepted => {
                self.metrics.record_accepted();
                info!(block_hash = %block_hash, tx_count, "[qc-18] Block accepted");
                SubmissionResult::Accepted
            }
            Ok(outcome) => {
                self.metrics.record_rejected();
                warn!(
                    block_hash = %block_hash,
                    reason = outcome.state.reason.as_deref().unwrap_or("unspecified"),
                    "[qc-18] Block rejected by validation engine"
                );
                SubmissionResult::Rejected
            }
            Err(e) => {
                self.metrics.record_engine_failure();
                error!(block_hash = %block_hash, error = %e, "[qc-18] Validation engine failed");
                SubmissionResult::EngineFailure(e)
            }
        }
    }
}

#[async_trait]
impl BlockSubmissionApi for BlockSubmissionController {
    async fn submit(&self, raw: RawSubmission) -> SubmissionResult {
        let span = info_span!("submit_block", submission_id = %Uuid::new_v4());
        self.submit_inner(raw).instrument(span).await
    }
}
