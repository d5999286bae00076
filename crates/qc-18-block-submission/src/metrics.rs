//! Metrics collection for block submission subsystem

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for block submission
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total submissions received
    pub submissions_received: AtomicU64,

    /// Blocks accepted by the validation engine
    pub blocks_accepted: AtomicU64,

    /// Blocks rejected by the validation engine
    pub blocks_rejected: AtomicU64,

    /// Submissions that failed hex or block decoding
    pub decode_failures: AtomicU64,

    /// Calls where the validation engine itself failed
    pub engine_failures: AtomicU64,

    /// Transactions decoded from `txdata` blobs of well-formed submissions
    pub transactions_decoded: AtomicU64,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an incoming submission
    pub fn record_received(&self) {
        self.submissions_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a submission that decoded into a candidate block
    pub fn record_decoded(&self, tx_count: usize) {
        self.transactions_decoded
            .fetch_add(tx_count as u64, Ordering::Relaxed);
    }

    /// Record an accepted block
    pub fn record_accepted(&self) {
        self.blocks_accepted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a consensus rejection
    pub fn record_rejected(&self) {
        self.blocks_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a decode-stage failure
    pub fn record_decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a validation engine failure
    pub fn record_engine_failure(&self) {
        self.engine_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get submissions received
    pub fn get_submissions_received(&self) -> u64 {
        self.submissions_received.load(Ordering::Relaxed)
    }

    /// Get blocks accepted
    pub fn get_blocks_accepted(&self) -> u64 {
        self.blocks_accepted.load(Ordering::Relaxed)
    }

    /// Get blocks rejected
    pub fn get_blocks_rejected(&self) -> u64 {
        self.blocks_rejected.load(Ordering::Relaxed)
    }

    /// Get decode failures
    pub fn get_decode_failures(&self) -> u64 {
        self.decode_failures.load(Ordering::Relaxed)
    }

    /// Get engine failures
    pub fn get_engine_failures(&self) -> u64 {
        self.engine_failures.load(Ordering::Relaxed)
    }

    /// Get transactions decoded
    pub fn get_transactions_decoded(&self) -> u64 {
        self.transactions_decoded.load(Ordering::Relaxed)
    }

    /// Fraction of engine verdicts that were acceptances
    pub fn acceptance_rate(&self) -> f64 {
        let accepted = self.blocks_accepted.load(Ordering::Relaxed);
        let rejected = self.blocks_rejected.load(Ordering::Relaxed);
        let verdicts = accepted + rejected;
        if verdicts == 0 {
            return 0.0;
        }
        accepted as f64 / verdicts as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_recording() {
        let metrics = Metrics::new();

        metrics.record_received();
        metrics.record_received();
        metrics.record_received();
        metrics.record_decoded(3);
        metrics.record_accepted();
        metrics.record_decoded(0);
        metrics.record_rejected();
        metrics.record_decode_failure();

        assert_eq!(metrics.get_submissions_received(), 3);
        assert_eq!(metrics.get_blocks_accepted(), 1);
        assert_eq!(metrics.get_blocks_rejected(), 1);
        assert_eq!(metrics.get_decode_failures(), 1);
        assert_eq!(metrics.get_transactions_decoded(), 3);
        assert_eq!(metrics.acceptance_rate(), 0.5);
    }

    #[test]
    fn test_acceptance_rate_without_verdicts() {
        let metrics = Metrics::new();
        metrics.record_decode_failure();
        metrics.record_engine_failure();

        assert_eq!(metrics.acceptance_rate(), 0.0);
        assert_eq!(metrics.get_engine_failures(), 1);
    }
}
