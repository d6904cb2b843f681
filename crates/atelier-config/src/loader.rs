//! Configuration sources: process environment and JSON documents.
//!
//! # Design
//! - Environment lookups go through a closure so callers (and tests) can supply
//!   their own variable source without mutating the process environment.
//! - Every loaded document is validated before it is returned.

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::model::{AtelierConfig, CheckoutEnvironment, CheckoutTheme};
use crate::validate::validate;

const ENV_DEBOUNCE_MS: &str = "ATELIER_DEBOUNCE_MS";
const ENV_PAGE_LIMIT: &str = "ATELIER_PAGE_LIMIT";
const ENV_VAULT_MAX_FAILURES: &str = "ATELIER_VAULT_MAX_FAILURES";
const ENV_VAULT_DOWNLOAD_BASE: &str = "ATELIER_VAULT_DOWNLOAD_BASE";
const ENV_VAULT_LOGIN_REASON: &str = "ATELIER_VAULT_LOGIN_REASON";
const ENV_CHECKOUT_TOKEN: &str = "ATELIER_CHECKOUT_TOKEN";
const ENV_CHECKOUT_ENVIRONMENT: &str = "ATELIER_CHECKOUT_ENVIRONMENT";
const ENV_CHECKOUT_THEME: &str = "ATELIER_CHECKOUT_THEME";
const ENV_SITE_NAME: &str = "ATELIER_SITE_NAME";
const ENV_BASE_URL: &str = "ATELIER_BASE_URL";
const ENV_RESERVED_USERNAMES: &str = "ATELIER_RESERVED_USERNAMES";
const ENV_LOG_LEVEL: &str = "ATELIER_LOG_LEVEL";
const ENV_LOG_FORMAT: &str = "ATELIER_LOG_FORMAT";

impl AtelierConfig {
    /// Load configuration from `ATELIER_*` process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when a variable cannot be parsed or the
    /// resulting document fails validation.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` as the variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when a variable cannot be parsed or the
    /// resulting document fails validation.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(raw) = read(ENV_DEBOUNCE_MS) {
            config.listing.debounce_ms = parse_number(&raw, "listing", "debounce_ms")?;
        }
        if let Some(raw) = read(ENV_PAGE_LIMIT) {
            config.listing.page_limit = parse_number(&raw, "listing", "page_limit")?;
        }
        if let Some(raw) = read(ENV_VAULT_MAX_FAILURES) {
            config.vault.max_processing_failures =
                parse_number(&raw, "vault", "max_processing_failures")?;
        }
        if let Some(raw) = read(ENV_VAULT_DOWNLOAD_BASE) {
            config.vault.download_base = raw;
        }
        if let Some(raw) = read(ENV_VAULT_LOGIN_REASON) {
            config.vault.login_reason = raw;
        }
        config.checkout.token = read(ENV_CHECKOUT_TOKEN);
        if let Some(raw) = read(ENV_CHECKOUT_ENVIRONMENT) {
            config.checkout.environment = raw.parse::<CheckoutEnvironment>()?;
        }
        if let Some(raw) = read(ENV_CHECKOUT_THEME) {
            config.checkout.theme = match raw.to_ascii_lowercase().as_str() {
                "dark" => CheckoutTheme::Dark,
                "light" => CheckoutTheme::Light,
                _ => {
                    return Err(ConfigError::invalid(
                        "checkout",
                        "theme",
                        raw,
                        "unknown_theme",
                    ));
                }
            };
        }
        if let Some(raw) = read(ENV_SITE_NAME) {
            config.profile.site_name = raw;
        }
        if let Some(raw) = read(ENV_BASE_URL) {
            config.profile.base_url = raw;
        }
        if let Some(raw) = read(ENV_RESERVED_USERNAMES) {
            config.profile.reserved_usernames = raw
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(raw) = read(ENV_LOG_LEVEL) {
            config.telemetry.log_level = raw;
        }
        if let Some(raw) = read(ENV_LOG_FORMAT) {
            config.telemetry.log_format = Some(raw.to_ascii_lowercase());
        }

        validate(&config)?;
        info!(
            debounce_ms = config.listing.debounce_ms,
            page_limit = config.listing.page_limit,
            checkout_enabled = config.checkout.enabled_token().is_some(),
            "configuration loaded from environment"
        );
        Ok(config)
    }

    /// Decode and validate a JSON configuration document.
    ///
    /// Missing sections and fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document does not match the schema and
    /// [`ConfigError::InvalidField`] when validation fails.
    pub fn from_json(value: &Value) -> ConfigResult<Self> {
        let config = Self::deserialize_json(value)?;
        validate(&config)?;
        debug!("configuration loaded from json document");
        Ok(config)
    }

    fn deserialize_json(value: &Value) -> ConfigResult<Self> {
        serde_json::from_value(value.clone()).map_err(|source| ConfigError::Parse {
            origin: "json",
            source,
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    raw: &str,
    section: &'static str,
    field: &'static str,
) -> ConfigResult<T> {
    raw.parse::<T>()
        .map_err(|_| ConfigError::invalid(section, field, raw, "not_a_number"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = AtelierConfig::from_env_with(env(&[])).expect("defaults load");
        assert_eq!(config, AtelierConfig::default());
    }

    #[test]
    fn environment_overrides_are_applied() {
        let config = AtelierConfig::from_env_with(env(&[
            (ENV_DEBOUNCE_MS, "250"),
            (ENV_PAGE_LIMIT, "100"),
            (ENV_CHECKOUT_TOKEN, " live_123 "),
            (ENV_CHECKOUT_ENVIRONMENT, "production"),
            (ENV_CHECKOUT_THEME, "LIGHT"),
            (ENV_RESERVED_USERNAMES, "atelier, admin ,,"),
            (ENV_LOG_FORMAT, "JSON"),
        ]))
        .expect("overrides load");

        assert_eq!(config.listing.debounce_ms, 250);
        assert_eq!(config.listing.page_limit, 100);
        assert_eq!(config.checkout.enabled_token(), Some("live_123"));
        assert_eq!(config.checkout.environment, CheckoutEnvironment::Production);
        assert_eq!(config.checkout.theme, CheckoutTheme::Light);
        assert_eq!(config.profile.reserved_usernames, vec!["atelier", "admin"]);
        assert_eq!(config.telemetry.log_format.as_deref(), Some("json"));
    }

    #[test]
    fn login_reason_follows_deployment_setting() {
        let config = AtelierConfig::from_env_with(env(&[])).expect("defaults load");
        assert_eq!(config.vault.login_reason, "vault");

        let config =
            AtelierConfig::from_env_with(env(&[(ENV_VAULT_LOGIN_REASON, " civitai-vault ")]))
                .expect("reason override loads");
        assert_eq!(config.vault.login_reason, "civitai-vault");

        let config = AtelierConfig::from_json(&json!({ "vault": { "login_reason": "members" } }))
            .expect("json reason loads");
        assert_eq!(config.vault.login_reason, "members");
    }

    #[test]
    fn malformed_number_reports_field() {
        let err = AtelierConfig::from_env_with(env(&[(ENV_PAGE_LIMIT, "many")]))
            .expect_err("non-numeric limit rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                field: "page_limit",
                reason: "not_a_number",
                ..
            }
        ));
    }

    #[test]
    fn out_of_range_environment_value_fails_validation() {
        let err = AtelierConfig::from_env_with(env(&[(ENV_DEBOUNCE_MS, "60000")]))
            .expect_err("debounce above ceiling rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                field: "debounce_ms",
                reason: "out_of_range",
                ..
            }
        ));
    }

    #[test]
    fn json_document_merges_with_defaults() {
        let config = AtelierConfig::from_json(&json!({
            "listing": { "page_limit": 24 },
            "profile": { "site_name": "Gallery" }
        }))
        .expect("partial document loads");
        assert_eq!(config.listing.page_limit, 24);
        assert_eq!(config.listing.debounce_ms, 500);
        assert_eq!(config.profile.site_name, "Gallery");
    }

    #[test]
    fn json_type_mismatch_is_parse_error() {
        let err = AtelierConfig::from_json(&json!({ "listing": { "page_limit": "lots" } }))
            .expect_err("string limit rejected");
        assert!(matches!(err, ConfigError::Parse { origin: "json", .. }));
    }
}
