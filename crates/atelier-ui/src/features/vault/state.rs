//! Vault display state derived from records and configuration.

use atelier_config::VaultConfig;
use atelier_core::{
    CurrentUser, DownloadKind, ResultPage, Vault, VaultItem, VaultItemId, VaultItemStatus,
};

use crate::core::logic::{display_name, format_kbytes, format_thousands};

/// Storage usage meter shown in the page header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageMeter {
    /// Used storage in kilobytes.
    pub used_kb: u64,
    /// Storage quota in kilobytes.
    pub storage_kb: u64,
    /// Fill percentage; 100 once usage reaches the quota.
    pub progress: f64,
}

impl StorageMeter {
    /// Meter for `vault`.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_vault(vault: &Vault) -> Self {
        let progress = if vault.storage_kb <= vault.used_storage_kb {
            100.0
        } else {
            vault.used_storage_kb as f64 / vault.storage_kb as f64 * 100.0
        };
        Self {
            used_kb: vault.used_storage_kb,
            storage_kb: vault.storage_kb,
            progress,
        }
    }

    /// Whether the quota is exhausted.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.progress >= 100.0
    }

    /// Label such as `1.5 GB of 10 GB Used`.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} of {} Used",
            format_kbytes(self.used_kb),
            format_kbytes(self.storage_kb)
        )
    }
}

/// Colour of the status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// Ready.
    Green,
    /// Waiting or retrying.
    Yellow,
}

/// Badge and tooltip for one vault row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDetails {
    /// Row status.
    pub status: VaultItemStatus,
    /// Badge colour.
    pub tone: StatusTone,
    /// Tooltip text.
    pub tooltip: String,
}

/// Badge details for `item`.
#[must_use]
pub fn status_details(item: &VaultItem, max_processing_failures: u32) -> StatusDetails {
    let (tone, tooltip) = match item.status {
        VaultItemStatus::Stored => (
            StatusTone::Green,
            "This model is stored in your vault and is ready for you to download.".to_string(),
        ),
        VaultItemStatus::Pending => (
            StatusTone::Yellow,
            "We will be processing this model soon and will be ready to download shortly."
                .to_string(),
        ),
        VaultItemStatus::Failed => (
            StatusTone::Yellow,
            format!(
                "This model has failed to process {} times. After {max_processing_failures} failed attempts, the model will be removed from your vault.",
                item.meta.failures
            ),
        ),
    };
    StatusDetails {
        status: item.status,
        tone,
        tooltip,
    }
}

/// Outcome of the page access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultAccess {
    /// Render the page.
    Allowed,
    /// Send the viewer elsewhere.
    Redirect {
        /// Target path with query string.
        destination: String,
    },
}

/// Decide whether the viewer may open the vault page at `return_url`.
///
/// Anonymous viewers go to login; members without a vault go to pricing.
#[must_use]
pub fn vault_access(
    user: Option<&CurrentUser>,
    vault: Option<&Vault>,
    return_url: &str,
    config: &VaultConfig,
) -> VaultAccess {
    if user.is_none() {
        return VaultAccess::Redirect {
            destination: format!(
                "{}?returnUrl={}&reason={}",
                config.login_path,
                urlencoding::encode(return_url),
                urlencoding::encode(&config.login_reason)
            ),
        };
    }
    if vault.is_none() {
        return VaultAccess::Redirect {
            destination: config.pricing_path.clone(),
        };
    }
    VaultAccess::Allowed
}

/// Cell labels for one vault row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLabels {
    /// Model type, e.g. `Textual Inversion`.
    pub model_type: String,
    /// Base model, e.g. `SD 1.5`.
    pub base_model: String,
    /// Category, when the model has one.
    pub category: Option<String>,
    /// Processing status.
    pub status: String,
}

/// Human-readable labels for the type, base model, category and status cells.
#[must_use]
pub fn row_labels(item: &VaultItem) -> RowLabels {
    RowLabels {
        model_type: display_name(&item.model_type),
        base_model: display_name(&item.base_model),
        category: item.category.as_deref().map(display_name),
        status: display_name(item.status.as_str()),
    }
}

/// Direct download link for one part of a vault item.
#[must_use]
pub fn download_href(config: &VaultConfig, item_id: VaultItemId, kind: DownloadKind) -> String {
    format!("{}/{item_id}?type={kind}", config.download_base)
}

/// Footer text such as `Total 1,234 items`, shown only with more than one page.
#[must_use]
pub fn pagination_footer<T>(page: &ResultPage<T>) -> Option<String> {
    page.has_multiple_pages()
        .then(|| format!("Total {} items", format_thousands(page.total_items)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::VaultItemMeta;
    use chrono::{TimeZone, Utc};

    fn config() -> VaultConfig {
        VaultConfig::default()
    }

    fn item(status: VaultItemStatus, failures: u32) -> VaultItem {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("time");
        VaultItem {
            id: 1,
            model_version_id: 11,
            model_id: 5,
            model_name: "Dragon".into(),
            version_name: "v1".into(),
            creator_name: "maker".into(),
            model_type: "Checkpoint".into(),
            base_model: "SD 1.5".into(),
            category: None,
            cover_image_url: None,
            status,
            meta: VaultItemMeta { failures },
            notes: None,
            created_at: at,
            added_at: at,
            refreshed_at: None,
        }
    }

    #[test]
    fn meter_is_full_when_usage_meets_quota() {
        let full = StorageMeter::from_vault(&Vault {
            storage_kb: 100,
            used_storage_kb: 120,
        });
        assert!(full.is_full());
        assert!((full.progress - 100.0).abs() < f64::EPSILON);

        let partial = StorageMeter::from_vault(&Vault {
            storage_kb: 2048,
            used_storage_kb: 512,
        });
        assert!(!partial.is_full());
        assert!((partial.progress - 25.0).abs() < 1e-9);
        assert_eq!(partial.label(), "512 KB of 2 MB Used");
    }

    #[test]
    fn failed_status_mentions_attempts() {
        let details = status_details(&item(VaultItemStatus::Failed, 2), 3);
        assert_eq!(details.tone, StatusTone::Yellow);
        assert!(details.tooltip.contains("failed to process 2 times"));
        assert!(details.tooltip.contains("After 3 failed attempts"));
        assert_eq!(
            status_details(&item(VaultItemStatus::Stored, 0), 3).tone,
            StatusTone::Green
        );
    }

    #[test]
    fn row_labels_are_readable() {
        let mut row = item(VaultItemStatus::Pending, 0);
        row.model_type = "TextualInversion".into();
        row.category = Some("base_model".into());
        let labels = row_labels(&row);
        assert_eq!(labels.model_type, "Textual Inversion");
        assert_eq!(labels.base_model, "SD 1.5");
        assert_eq!(labels.category.as_deref(), Some("Base Model"));
        assert_eq!(labels.status, "Pending");
        assert_eq!(row_labels(&item(VaultItemStatus::Stored, 0)).category, None);
    }

    #[test]
    fn anonymous_viewers_are_sent_to_login() {
        let access = vault_access(None, None, "/user/vault?page=2", &config());
        assert_eq!(
            access,
            VaultAccess::Redirect {
                destination: "/login?returnUrl=%2Fuser%2Fvault%3Fpage%3D2&reason=vault".into()
            }
        );
    }

    #[test]
    fn login_redirect_uses_configured_reason_key() {
        let config = VaultConfig {
            login_reason: "civitai-vault".into(),
            ..config()
        };
        assert_eq!(
            vault_access(None, None, "/user/vault", &config),
            VaultAccess::Redirect {
                destination: "/login?returnUrl=%2Fuser%2Fvault&reason=civitai-vault".into()
            }
        );
    }

    #[test]
    fn members_without_vault_go_to_pricing() {
        let user = CurrentUser {
            id: 1,
            username: "maker".into(),
            email: None,
            customer_id: None,
        };
        assert_eq!(
            vault_access(Some(&user), None, "/user/vault", &config()),
            VaultAccess::Redirect {
                destination: "/pricing".into()
            }
        );
        let vault = Vault {
            storage_kb: 10,
            used_storage_kb: 1,
        };
        assert_eq!(
            vault_access(Some(&user), Some(&vault), "/user/vault", &config()),
            VaultAccess::Allowed
        );
    }

    #[test]
    fn download_href_uses_configured_base() {
        assert_eq!(
            download_href(&config(), 42, DownloadKind::Details),
            "/api/download/vault/42?type=details"
        );
    }

    #[test]
    fn footer_only_with_multiple_pages() {
        let single: ResultPage<u8> = ResultPage {
            items: vec![],
            total_items: 10,
            total_pages: 1,
        };
        assert_eq!(pagination_footer(&single), None);
        let many: ResultPage<u8> = ResultPage {
            items: vec![],
            total_items: 1234,
            total_pages: 21,
        };
        assert_eq!(pagination_footer(&many).as_deref(), Some("Total 1,234 items"));
    }
}
