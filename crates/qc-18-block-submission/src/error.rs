//! Error types for the block submission subsystem

use thiserror::Error;

/// Result type alias for block submission operations
pub type Result<T> = std::result::Result<T, SubmissionError>;

/// Errors that can occur while turning a submission into a candidate block.
///
/// Every variant is caused by the submitter's input and is never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// Input is not valid hexadecimal (odd length or non-hex character)
    #[error("Malformed encoding: {0}")]
    MalformedEncoding(String),

    /// Decoded block is not longer than the fixed header
    #[error("Truncated submission: {length} bytes, need more than {minimum}")]
    TruncatedSubmission {
        /// Decoded length in bytes
        length: usize,
        /// Header size the length must exceed
        minimum: usize,
    },

    /// Submission exceeds the configured size limit
    #[error("Submission too large: {length} bytes, maximum {maximum}")]
    SubmissionTooLarge {
        /// Decoded (or implied) length in bytes
        length: usize,
        /// Configured limit
        maximum: usize,
    },

    /// Transaction blob could not be deserialized
    #[error("Transaction decode failed: {0}")]
    TransactionDecodeFailure(String),
}

/// Caller-facing classification of a decode-stage failure
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Non-hex or odd-length input
    MalformedEncoding,
    /// Decoded length at or below the header size
    TruncatedSubmission,
    /// Decoded length above the configured limit
    SubmissionTooLarge,
    /// Transaction blob not parseable
    TransactionDecodeFailure,
}

impl SubmissionError {
    /// Caller-facing kind of this error
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            Self::MalformedEncoding(_) => DecodeErrorKind::MalformedEncoding,
            Self::TruncatedSubmission { .. } => DecodeErrorKind::TruncatedSubmission,
            Self::SubmissionTooLarge { .. } => DecodeErrorKind::SubmissionTooLarge,
            Self::TransactionDecodeFailure(_) => DecodeErrorKind::TransactionDecodeFailure,
        }
    }
}

/// Errors raised while loading or checking [`crate::SubmissionConfig`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration parsed but holds unusable values, or failed to parse
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// Configuration file could not be read
    #[error("Failed to read config {path}: {error}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying I/O error text
        error: String,
    },
}
