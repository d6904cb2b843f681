//! Validation helpers for configuration documents.

use crate::defaults::{MAX_DEBOUNCE_MS, MAX_PAGE_LIMIT};
use crate::error::{ConfigError, ConfigResult};
use crate::model::AtelierConfig;

/// Validate every section of a configuration document.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] for the first field that is out of range
/// or malformed.
pub fn validate(config: &AtelierConfig) -> ConfigResult<()> {
    if config.listing.debounce_ms > MAX_DEBOUNCE_MS {
        return Err(ConfigError::invalid(
            "listing",
            "debounce_ms",
            config.listing.debounce_ms,
            "out_of_range",
        ));
    }
    if !(1..=MAX_PAGE_LIMIT).contains(&config.listing.page_limit) {
        return Err(ConfigError::invalid(
            "listing",
            "page_limit",
            config.listing.page_limit,
            "out_of_range",
        ));
    }
    if config.vault.max_processing_failures == 0 {
        return Err(ConfigError::invalid(
            "vault",
            "max_processing_failures",
            0,
            "must_be_positive",
        ));
    }
    ensure_route("vault", "download_base", &config.vault.download_base)?;
    ensure_route("vault", "pricing_path", &config.vault.pricing_path)?;
    ensure_route("vault", "login_path", &config.vault.login_path)?;
    if config.vault.login_reason.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            section: "vault",
            field: "login_reason",
            value: None,
            reason: "empty",
        });
    }
    if config.profile.site_name.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            section: "profile",
            field: "site_name",
            value: None,
            reason: "empty",
        });
    }
    let base_url = config.profile.base_url.as_str();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://"))
        || base_url.ends_with('/')
    {
        return Err(ConfigError::invalid(
            "profile",
            "base_url",
            base_url,
            "invalid_url",
        ));
    }
    if let Some(format) = config.telemetry.log_format.as_deref()
        && !matches!(format, "json" | "pretty")
    {
        return Err(ConfigError::invalid(
            "telemetry",
            "log_format",
            format,
            "unknown_format",
        ));
    }
    Ok(())
}

/// Routes must be absolute paths without a trailing slash.
fn ensure_route(section: &'static str, field: &'static str, value: &str) -> ConfigResult<()> {
    if !value.starts_with('/') || (value.len() > 1 && value.ends_with('/')) {
        return Err(ConfigError::invalid(section, field, value, "invalid_route"));
    }
    Ok(())
}
