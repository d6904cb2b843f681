//! Error types for telemetry operations.

use thiserror::Error;
use tracing_subscriber::util::TryInitError;

/// Result alias for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Errors raised while installing logging or maintaining the metrics registry.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global tracing subscriber was already installed.
    #[error("failed to install tracing subscriber")]
    SubscriberInstall {
        /// Underlying tracing subscriber error.
        #[source]
        source: TryInitError,
    },
    /// A counter could not be built or registered.
    #[error("metrics collector rejected")]
    Collector {
        /// Metric name.
        name: &'static str,
        /// Underlying Prometheus error.
        #[source]
        source: prometheus::Error,
    },
    /// The registry could not be rendered in the text exposition format.
    #[error("failed to encode metrics")]
    Encode {
        /// Underlying Prometheus error.
        #[source]
        source: prometheus::Error,
    },
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn collector_error_keeps_prometheus_cause() {
        let err = TelemetryError::Collector {
            name: "listing_fetches_total",
            source: prometheus::Error::AlreadyReg,
        };
        assert_eq!(err.to_string(), "metrics collector rejected");
        let cause = err.source().map(ToString::to_string);
        assert_eq!(cause, Some(prometheus::Error::AlreadyReg.to_string()));
    }
}
