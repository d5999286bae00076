//! Configuration types for block submission

use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Runtime configuration for the submission boundary
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Maximum decoded size of the block blob (`hexdata`)
    pub max_submission_bytes: usize,

    /// Maximum decoded size of the transaction blob (`txdata`)
    pub max_transaction_bytes: usize,

    /// Maximum number of transactions a blob may declare
    pub max_transactions: usize,

    /// What to do with bytes left over after the transaction vector
    pub trailing_tx_bytes: TrailingBytesPolicy,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            max_submission_bytes: crate::DEFAULT_MAX_SUBMISSION_BYTES,
            max_transaction_bytes: crate::DEFAULT_MAX_SUBMISSION_BYTES,
            max_transactions: crate::DEFAULT_MAX_TRANSACTIONS,
            trailing_tx_bytes: TrailingBytesPolicy::Ignore,
        }
    }
}

/// Handling of unread bytes after a decoded transaction list
#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrailingBytesPolicy {
    /// Leave them unread (node stream semantics)
    #[default]
    Ignore,

    /// Treat them as a decode failure
    Reject,
}

impl SubmissionConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string. Missing keys take defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that limits admit at least a minimal submission
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_submission_bytes <= crate::HEADER_SIZE {
            return Err(ConfigError::Invalid(format!(
                "max_submission_bytes must exceed header size {}, got {}",
                crate::HEADER_SIZE,
                self.max_submission_bytes
            )));
        }
        if self.max_transaction_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_transaction_bytes must be non-zero".to_string(),
            ));
        }
        if self.max_transactions == 0 {
            return Err(ConfigError::Invalid(
                "max_transactions must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
