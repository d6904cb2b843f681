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

//! Typed configuration for the Atelier listing controllers and page logic.
//!
//! Layout: `model.rs` (typed config sections), `defaults.rs` (default values),
//! `validate.rs` (range/shape checks), `loader.rs` (env + JSON sources).

mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use model::{
    AtelierConfig, CheckoutConfig, CheckoutEnvironment, CheckoutTheme, ListingConfig,
    ProfileConfig, TelemetryConfig, VaultConfig,
};
