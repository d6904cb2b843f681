//! Default values for configuration sections.
//!
//! # Design
//! - Centralize defaults so serde, env loading, and tests agree.

/// Quiet window before filter edits reach the fetcher.
pub(crate) const DEBOUNCE_MS: u64 = 500;
/// Upper bound accepted for the debounce window.
pub(crate) const MAX_DEBOUNCE_MS: u64 = 10_000;
/// Default page size requested from fetchers.
pub(crate) const PAGE_LIMIT: u32 = 60;
/// Largest page size the backend accepts.
pub(crate) const MAX_PAGE_LIMIT: u32 = 200;
/// Processing attempts before a vault item is dropped.
pub(crate) const MAX_PROCESSING_FAILURES: u32 = 3;
/// Route prefix for vault downloads.
pub(crate) const VAULT_DOWNLOAD_BASE: &str = "/api/download/vault";
/// Destination for users without a vault.
pub(crate) const PRICING_PATH: &str = "/pricing";
/// Login route used by the vault access guard.
pub(crate) const LOGIN_PATH: &str = "/login";
/// Reason code attached to vault login redirects.
pub(crate) const LOGIN_REASON: &str = "vault";
/// Site name used in page metadata.
pub(crate) const SITE_NAME: &str = "Atelier";
/// Public base URL used for canonical links.
pub(crate) const BASE_URL: &str = "http://localhost:3000";
/// Usernames that never resolve to a creator profile.
pub(crate) const RESERVED_USERNAMES: &[&str] = &["atelier"];
/// Default log level.
pub(crate) const LOG_LEVEL: &str = "info";
