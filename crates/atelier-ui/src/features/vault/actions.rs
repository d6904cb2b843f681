//! Vault dialogs and download resolution.

use atelier_config::VaultConfig;
use atelier_core::{CoreError, Dialog, DownloadKind, DownloadLink, VaultItemId, VaultMutations};
use tracing::debug;

use crate::core::bulk::{NOTES_DIALOG, REMOVE_DIALOG};
use crate::error::{UiError, UiResult};
use crate::features::vault::state::download_href;

/// Notes editor dialog.
#[must_use]
pub fn notes_dialog() -> Dialog {
    Dialog::new(NOTES_DIALOG, "Add notes")
}

/// Removal confirmation for `count` selected rows.
#[must_use]
pub fn remove_dialog(count: usize) -> Dialog {
    Dialog::new(REMOVE_DIALOG, format!("Deleting {count} models"))
}

/// Resolve a download link, falling back to the configured download base
/// when the collaborator has no download operation.
///
/// # Errors
///
/// Returns [`UiError::Collaborator`] when the collaborator supports downloads
/// and the call fails.
pub async fn resolve_download(
    mutations: &dyn VaultMutations,
    config: &VaultConfig,
    item_id: VaultItemId,
    kind: DownloadKind,
) -> UiResult<DownloadLink> {
    match mutations.download(item_id, kind).await {
        Ok(link) => Ok(link),
        Err(CoreError::Unsupported { operation }) => {
            debug!(operation, item_id, kind = %kind, "using direct download link");
            Ok(DownloadLink {
                href: download_href(config, item_id, kind),
            })
        }
        Err(source) => Err(UiError::collaborator(source.operation(), source)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use atelier_core::{CoreResult, ModelVersionId};

    struct NoDownloads;

    #[async_trait]
    impl VaultMutations for NoDownloads {
        async fn update_notes(&self, _: &[ModelVersionId], _: &str) -> CoreResult<()> {
            Ok(())
        }

        async fn remove_items(&self, _: &[ModelVersionId]) -> CoreResult<()> {
            Ok(())
        }
    }

    #[test]
    fn dialogs_carry_titles() {
        assert_eq!(notes_dialog().title, "Add notes");
        let remove = remove_dialog(3);
        assert_eq!(remove.key, REMOVE_DIALOG);
        assert_eq!(remove.title, "Deleting 3 models");
    }

    #[tokio::test]
    async fn unsupported_download_falls_back_to_direct_link() {
        let link = resolve_download(&NoDownloads, &VaultConfig::default(), 9, DownloadKind::Images)
            .await
            .expect("link");
        assert_eq!(link.href, "/api/download/vault/9?type=images");
    }
}
