//! Error types for collaborator calls.

use std::error::Error;

use thiserror::Error;

/// Primary error type raised by collaborator implementations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Operation is not supported by the collaborator.
    #[error("operation not supported")]
    Unsupported {
        /// Operation identifier.
        operation: &'static str,
    },
    /// Operation failed in the collaborator.
    #[error("operation failed")]
    OperationFailed {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// Requested record was not found.
    #[error("record not found")]
    NotFound {
        /// Operation identifier.
        operation: &'static str,
        /// Missing record identifier.
        id: String,
    },
    /// Collaborator rejected the request.
    #[error("request rejected")]
    Rejected {
        /// Operation identifier.
        operation: &'static str,
        /// Machine-readable rejection reason.
        reason: String,
    },
}

impl CoreError {
    /// Wrap an arbitrary failure raised while running `operation`.
    #[must_use]
    pub fn failed(operation: &'static str, source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::OperationFailed {
            operation,
            source: source.into(),
        }
    }

    /// Operation identifier attached to the error.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Unsupported { operation }
            | Self::OperationFailed { operation, .. }
            | Self::NotFound { operation, .. }
            | Self::Rejected { operation, .. } => operation,
        }
    }
}

/// Convenience alias for collaborator results.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_keeps_operation_and_source() {
        let err = CoreError::failed("vault.remove_items", "backend offline");
        assert_eq!(err.operation(), "vault.remove_items");
        assert_eq!(err.to_string(), "operation failed");
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("backend offline"));
    }
}
