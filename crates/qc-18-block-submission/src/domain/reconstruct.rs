//! Block reconstruction from decoded submission bytes

use super::entities::{AdditiveData, BlockHeader, CandidateBlock};
use super::transaction::{decode_transactions, TxDecodeLimits};
use crate::config::SubmissionConfig;
use crate::error::{Result, SubmissionError};
use crate::HEADER_SIZE;
use tracing::debug;

/// Builds [`CandidateBlock`]s from raw submission bytes
#[derive(Clone, Debug, Default)]
pub struct BlockReconstructor {
    config: SubmissionConfig,
}

impl BlockReconstructor {
    /// Create a reconstructor with the given limits
    pub fn new(config: SubmissionConfig) -> Self {
        Self { config }
    }

    /// Reconstruct a candidate block.
    ///
    /// `bytes` must be strictly longer than [`HEADER_SIZE`]: the header is
    /// followed by at least one byte of additive data. When `tx_bytes` is
    /// given it is decoded in full and replaces the transaction list; any
    /// failure discards the whole block.
    pub fn reconstruct(&self, bytes: &[u8], tx_bytes: Option<&[u8]>) -> Result<CandidateBlock> {
        if bytes.len() <= HEADER_SIZE {
            return Err(SubmissionError::TruncatedSubmission {
                length: bytes.len(),
                minimum: HEADER_SIZE,
            });
        }
        if bytes.len() > self.config.max_submission_bytes {
            return Err(SubmissionError::SubmissionTooLarge {
                length: bytes.len(),
                maximum: self.config.max_submission_bytes,
            });
        }

        let header = BlockHeader::decode(bytes)?;
        let additive_data = AdditiveData::new(bytes[HEADER_SIZE..].to_vec());
        debug!(
            version = header.version,
            time = header.time,
            nonce = header.nonce,
            shift = header.shift,
            additive_len = additive_data.len(),
            "Decoded block header"
        );

        let mut block = CandidateBlock::new(header, additive_data);

        if let Some(tx_bytes) = tx_bytes {
            if tx_bytes.len() > self.config.max_transaction_bytes {
                return Err(SubmissionError::SubmissionTooLarge {
                    length: tx_bytes.len(),
                    maximum: self.config.max_transaction_bytes,
                });
            }

            let transactions = decode_transactions(tx_bytes, self.limits())?;
            debug!(count = transactions.len(), "Decoded transaction list");
            block.transactions = transactions;
        }

        Ok(block)
    }

    fn limits(&self) -> TxDecodeLimits {
        TxDecodeLimits {
            max_transactions: self.config.max_transactions,
            trailing: self.config.trailing_tx_bytes,
        }
    }
}

/// Reconstruct with default limits
pub fn reconstruct(bytes: &[u8], tx_bytes: Option<&[u8]>) -> Result<CandidateBlock> {
    BlockReconstructor::default().reconstruct(bytes, tx_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_minimum_valid_length() {
        let block = reconstruct(&[0u8; HEADER_SIZE + 1], None).unwrap();
        assert_eq!(block.additive_data.as_bytes(), &[0u8]);
        assert!(block.transactions.is_empty());
    }

    #[test]
    fn test_exact_header_size_rejected() {
        let result = reconstruct(&[0u8; HEADER_SIZE], None);
        assert_eq!(
            result,
            Err(SubmissionError::TruncatedSubmission {
                length: HEADER_SIZE,
                minimum: HEADER_SIZE
            })
        );
    }

    #[test]
    fn test_additive_data_verbatim() {
        let mut bytes = vec![0u8; HEADER_SIZE];
        bytes.extend_from_slice(&[9, 8, 7, 6, 5]);
        let block = reconstruct(&bytes, None).unwrap();
        assert_eq!(block.additive_data.as_bytes(), &[9, 8, 7, 6, 5]);
    }

    #[test]
    fn test_explicit_empty_transaction_list() {
        let block = reconstruct(&[0u8; HEADER_SIZE + 1], Some(&[0x00])).unwrap();
        assert!(block.transactions.is_empty());
    }

    #[test]
    fn test_empty_tx_blob_is_decode_failure() {
        let result = reconstruct(&[0u8; HEADER_SIZE + 1], Some(&[]));
        assert!(matches!(
            result,
            Err(SubmissionError::TransactionDecodeFailure(_))
        ));
    }

    #[test]
    fn test_bad_tx_blob_discards_block() {
        let mut bytes = vec![0x11u8; HEADER_SIZE];
        bytes.push(0x01);
        let result = reconstruct(&bytes, Some(&[0x02, 0x01]));
        assert!(matches!(
            result,
            Err(SubmissionError::TransactionDecodeFailure(_))
        ));
    }

    #[test]
    fn test_size_limits() {
        let reconstructor = BlockReconstructor::new(SubmissionConfig {
            max_submission_bytes: HEADER_SIZE + 4,
            max_transaction_bytes: 2,
            ..SubmissionConfig::default()
        });

        assert!(matches!(
            reconstructor.reconstruct(&[0u8; HEADER_SIZE + 5], None),
            Err(SubmissionError::SubmissionTooLarge { .. })
        ));
        assert!(matches!(
            reconstructor.reconstruct(&[0u8; HEADER_SIZE + 1], Some(&[0, 0, 0])),
            Err(SubmissionError::SubmissionTooLarge { .. })
        ));
        assert!(reconstructor
            .reconstruct(&[0u8; HEADER_SIZE + 4], Some(&[0]))
            .is_ok());
    }

    proptest! {
        #[test]
        fn prop_short_inputs_truncated(len in 0..=HEADER_SIZE) {
            let bytes = vec![0xABu8; len];
            let is_truncated = matches!(
                reconstruct(&bytes, None),
                Err(SubmissionError::TruncatedSubmission { .. })
            );
            prop_assert!(is_truncated);
        }

        #[test]
        fn prop_additive_len_is_tail(extra in proptest::collection::vec(any::<u8>(), 1..256)) {
            let mut bytes = vec![0u8; HEADER_SIZE];
            bytes.extend_from_slice(&extra);
            let block = reconstruct(&bytes, None).unwrap();
            prop_assert_eq!(block.additive_data.as_bytes(), extra.as_slice());
        }

        #[test]
        fn prop_malformed_tx_blob_fails_regardless_of_header(
            header in proptest::collection::vec(any::<u8>(), HEADER_SIZE + 1..HEADER_SIZE + 16),
        ) {
            // 0xFE announces a four-byte count; only two bytes follow
            let result = reconstruct(&header, Some(&[0xFE, 0x01, 0x02]));
            let is_tx_failure = matches!(result, Err(SubmissionError::TransactionDecodeFailure(_)));
            prop_assert!(is_tx_failure);
        }
    }
}
