//! Typed configuration models.
//!
//! # Design
//! - Pure data carriers; every section deserializes with defaults so partial
//!   documents are accepted and validated afterwards.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::ConfigError;

/// Root configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtelierConfig {
    /// Listing controller tuning.
    pub listing: ListingConfig,
    /// Vault page policy.
    pub vault: VaultConfig,
    /// Checkout provider settings.
    pub checkout: CheckoutConfig,
    /// Creator profile presentation.
    pub profile: ProfileConfig,
    /// Logging preferences.
    pub telemetry: TelemetryConfig,
}

/// Debounce and paging settings shared by every listing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Quiet window in milliseconds before filter edits are fetched.
    pub debounce_ms: u64,
    /// Page size requested from fetchers.
    pub page_limit: u32,
}

impl ListingConfig {
    /// Debounce window as a [`Duration`].
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: defaults::DEBOUNCE_MS,
            page_limit: defaults::PAGE_LIMIT,
        }
    }
}

/// Vault page policy and routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Processing attempts before an item is removed from the vault.
    pub max_processing_failures: u32,
    /// Route prefix for item downloads.
    pub download_base: String,
    /// Redirect target for users without a vault.
    pub pricing_path: String,
    /// Login route for anonymous visitors.
    pub login_path: String,
    /// `reason` query value sent to the login page on anonymous redirects.
    ///
    /// The login page owns the set of reason keys it understands, so deployments
    /// set this to whatever key their login page maps to the vault prompt.
    /// Defaults to `vault`.
    pub login_reason: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            max_processing_failures: defaults::MAX_PROCESSING_FAILURES,
            download_base: defaults::VAULT_DOWNLOAD_BASE.to_string(),
            pricing_path: defaults::PRICING_PATH.to_string(),
            login_path: defaults::LOGIN_PATH.to_string(),
            login_reason: defaults::LOGIN_REASON.to_string(),
        }
    }
}

/// Payment checkout settings. Checkout stays disabled without a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Client token issued by the payment provider.
    pub token: Option<String>,
    /// Provider environment.
    pub environment: CheckoutEnvironment,
    /// Overlay theme.
    pub theme: CheckoutTheme,
    /// Whether the overlay lets customers switch accounts.
    pub allow_logout: bool,
}

impl CheckoutConfig {
    /// Token when checkout is enabled (present and non-blank).
    #[must_use]
    pub fn enabled_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            token: None,
            environment: CheckoutEnvironment::infer(),
            theme: CheckoutTheme::Dark,
            allow_logout: false,
        }
    }
}

/// Payment provider environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutEnvironment {
    /// Test environment; no real charges.
    Sandbox,
    /// Live environment.
    Production,
}

impl CheckoutEnvironment {
    /// Sandbox for debug builds, production otherwise.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Sandbox
        } else {
            Self::Production
        }
    }

    /// Wire name understood by the checkout SDK.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }
}

impl FromStr for CheckoutEnvironment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "production" => Ok(Self::Production),
            _ => Err(ConfigError::invalid(
                "checkout",
                "environment",
                value,
                "unknown_environment",
            )),
        }
    }
}

impl fmt::Display for CheckoutEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checkout overlay theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutTheme {
    /// Dark overlay.
    Dark,
    /// Light overlay.
    Light,
}

impl CheckoutTheme {
    /// Wire name understood by the checkout SDK.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

/// Creator profile presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Site name appended to page titles.
    pub site_name: String,
    /// Public base URL for canonical links.
    pub base_url: String,
    /// Usernames that never resolve to a creator profile.
    pub reserved_usernames: Vec<String>,
}

impl ProfileConfig {
    /// Whether `username` is reserved (case-insensitive).
    #[must_use]
    pub fn is_reserved(&self, username: &str) -> bool {
        self.reserved_usernames
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(username))
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            site_name: defaults::SITE_NAME.to_string(),
            base_url: defaults::BASE_URL.to_string(),
            reserved_usernames: defaults::RESERVED_USERNAMES
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
        }
    }
}

/// Logging preferences consumed by the telemetry bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Log level filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Output format (`json` or `pretty`); inferred from the build when absent.
    pub log_format: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::LOG_LEVEL.to_string(),
            log_format: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_listing_contract() {
        let config = AtelierConfig::default();
        assert_eq!(config.listing.debounce(), Duration::from_millis(500));
        assert_eq!(config.listing.page_limit, 60);
        assert_eq!(config.vault.max_processing_failures, 3);
        assert!(config.checkout.enabled_token().is_none());
        assert!(!config.checkout.allow_logout);
        assert_eq!(config.checkout.theme, CheckoutTheme::Dark);
    }

    #[test]
    fn blank_checkout_token_is_disabled() {
        let config = CheckoutConfig {
            token: Some("   ".into()),
            ..CheckoutConfig::default()
        };
        assert!(config.enabled_token().is_none());
        let config = CheckoutConfig {
            token: Some("live_abc".into()),
            ..CheckoutConfig::default()
        };
        assert_eq!(config.enabled_token(), Some("live_abc"));
    }

    #[test]
    fn environment_parses_case_insensitively() {
        assert_eq!(
            "Production".parse::<CheckoutEnvironment>().ok(),
            Some(CheckoutEnvironment::Production)
        );
        assert!(matches!(
            "staging".parse::<CheckoutEnvironment>(),
            Err(ConfigError::InvalidField {
                reason: "unknown_environment",
                ..
            })
        ));
    }

    #[test]
    fn reserved_usernames_ignore_case() {
        let profile = ProfileConfig::default();
        assert!(profile.is_reserved("ATELIER"));
        assert!(!profile.is_reserved("maker"));
    }
}
