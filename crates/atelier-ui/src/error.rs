//! Error types for page-level operations.

use atelier_api_models::ValidationError;
use atelier_core::CoreError;
use thiserror::Error;

/// Primary error type for controller and page operations.
#[derive(Debug, Error)]
pub enum UiError {
    /// Bulk action invoked without any selected rows.
    #[error("bulk action requires a selection")]
    EmptySelection {
        /// Action identifier.
        action: &'static str,
    },
    /// Collaborator call failed; the collaborator has surfaced the error to the user.
    #[error("collaborator call failed")]
    Collaborator {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying failure.
        #[source]
        source: CoreError,
    },
    /// Form input failed validation.
    #[error("form input is invalid")]
    Validation {
        /// Field-level failures.
        #[source]
        source: ValidationError,
    },
    /// Checkout accessed before the SDK finished initialising.
    #[error("checkout provider is not initialised")]
    CheckoutNotInitialized,
}

impl UiError {
    pub(crate) const fn collaborator(operation: &'static str, source: CoreError) -> Self {
        Self::Collaborator { operation, source }
    }
}

/// Convenience alias for page operation results.
pub type UiResult<T> = Result<T, UiError>;
