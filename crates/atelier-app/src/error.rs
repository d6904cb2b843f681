//! # Design
//!
//! - Centralize application-level errors for bootstrap and page wiring.
//! - Keep error messages constant while carrying context fields for debugging.
//! - Preserve source errors without re-logging at call sites.

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration operations failed.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: atelier_config::ConfigError,
    },
    /// Telemetry operations failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: atelier_telemetry::TelemetryError,
    },
    /// Page controller operations failed.
    #[error("page operation failed")]
    Ui {
        /// Operation identifier.
        operation: &'static str,
        /// Source page error.
        source: atelier_ui::UiError,
    },
}

impl AppError {
    pub(crate) const fn config(
        operation: &'static str,
        source: atelier_config::ConfigError,
    ) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: atelier_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }

    pub(crate) const fn ui(operation: &'static str, source: atelier_ui::UiError) -> Self {
        Self::Ui { operation, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn app_error_helpers_build_variants() {
        let config = AppError::config(
            "load",
            atelier_config::ConfigError::InvalidField {
                section: "listing",
                field: "page_limit",
                value: Some("0".to_string()),
                reason: "out_of_range",
            },
        );
        assert!(matches!(config, AppError::Config { .. }));
        assert_eq!(config.to_string(), "configuration operation failed");
        assert!(config.source().is_some());

        let ui = AppError::ui("checkout.initialize", atelier_ui::UiError::CheckoutNotInitialized);
        assert!(matches!(
            ui,
            AppError::Ui {
                operation: "checkout.initialize",
                ..
            }
        ));
    }
}
