//! Error types for configuration operations.

use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Field contained an invalid value.
    #[error("invalid configuration field")]
    InvalidField {
        /// Section that failed validation.
        section: &'static str,
        /// Field that failed validation.
        field: &'static str,
        /// Offending value when available.
        value: Option<String>,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// Configuration document could not be decoded.
    #[error("configuration document could not be parsed")]
    Parse {
        /// Source of the document (e.g. `json`).
        origin: &'static str,
        /// Underlying serde error.
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub(crate) fn invalid(
        section: &'static str,
        field: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        Self::InvalidField {
            section,
            field,
            value: Some(value.to_string()),
            reason,
        }
    }
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
