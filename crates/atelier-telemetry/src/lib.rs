#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Telemetry primitives shared across the Atelier workspace.
//!
//! This crate centralises logging, metrics, and span context helpers so the
//! listing controllers and page logic adopt a consistent observability story.
//!
//! Layout: `init.rs` (subscriber setup), `context.rs` (app/view spans),
//! `metrics.rs` (Prometheus registry), `error.rs` (error types).

pub mod context;
pub mod error;
pub mod init;
pub mod metrics;

pub use context::{GlobalContextGuard, current_view, with_view_context};
pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
pub use metrics::{Metrics, MetricsSnapshot};
