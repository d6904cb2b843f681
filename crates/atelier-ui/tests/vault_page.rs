use std::sync::Arc;
use std::time::Duration;

use atelier_config::VaultConfig;
use atelier_core::{DownloadKind, VaultItem, VaultSort};
use atelier_telemetry::Metrics;
use atelier_test_support::fixtures::{single_page, vault_items};
use atelier_test_support::mocks::{
    FakeVaultMutations, RecordingDialogs, RecordingNotifications, ScriptedFetcher,
};
use atelier_ui::core::bulk::{NOTES_DIALOG, REMOVE_DIALOG};
use atelier_ui::features::vault::{VaultCollaborators, VaultPage};
use atelier_ui::{DispatchOutcome, ListingOptions, UiError};

type VaultFetcher = ScriptedFetcher<VaultItem, VaultSort, String>;

struct Harness {
    fetcher: Arc<VaultFetcher>,
    mutations: Arc<FakeVaultMutations>,
    dialogs: Arc<RecordingDialogs>,
    page: VaultPage<VaultFetcher>,
}

fn mount() -> anyhow::Result<Harness> {
    let fetcher = Arc::new(ScriptedFetcher::new(|request| {
        let offset = u64::from(request.filters.page - 1) * 10;
        Ok(single_page(vault_items(&[offset + 1, offset + 2, offset + 3])))
    }));
    let mutations = Arc::new(FakeVaultMutations::new());
    let dialogs = Arc::new(RecordingDialogs::default());
    let page = VaultPage::mount(
        Arc::clone(&fetcher),
        VaultCollaborators {
            mutations: mutations.clone(),
            notifications: Arc::new(RecordingNotifications::default()),
            dialogs: dialogs.clone(),
        },
        VaultConfig::default(),
        ListingOptions::new("vault").with_debounce(Duration::ZERO),
        Metrics::new()?,
    );
    Ok(Harness {
        fetcher,
        mutations,
        dialogs,
        page,
    })
}

async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn selection_survives_page_navigation() -> anyhow::Result<()> {
    let h = mount()?;
    settle().await;
    h.page.toggle_all_in_page();
    assert!(h.page.is_all_in_page_selected());

    assert!(h.page.set_page(2));
    settle().await;
    assert!(!h.page.is_all_in_page_selected());
    h.page.toggle_all_in_page();
    assert_eq!(h.page.selection().with(|selection| selection.len()), 6);

    h.page.toggle_all_in_page();
    let ids = h.page.selection().with(|selection| selection.ids());
    assert_eq!(ids, vec![1, 2, 3]);
    Ok(())
}

#[tokio::test]
async fn remove_flow_refreshes_listing() -> anyhow::Result<()> {
    let h = mount()?;
    settle().await;
    h.page.toggle_all_in_page();
    h.page.open_remove_dialog()?;
    let open = h.dialogs.open_dialogs();
    assert_eq!(open[0].key, REMOVE_DIALOG);
    assert_eq!(open[0].title, "Deleting 3 models");

    assert_eq!(h.page.confirm_remove().await?, DispatchOutcome::Completed);
    settle().await;
    assert!(!h.dialogs.is_open(REMOVE_DIALOG));
    assert!(h.page.selection().with(|selection| selection.is_empty()));
    assert_eq!(h.fetcher.request_count(), 2);
    Ok(())
}

#[tokio::test]
async fn dialogs_require_a_selection() -> anyhow::Result<()> {
    let h = mount()?;
    settle().await;
    assert!(matches!(
        h.page.open_notes_dialog(),
        Err(UiError::EmptySelection { .. })
    ));
    let first = h.page.view().items()[0].clone();
    assert!(h.page.toggle_item(&first));
    h.page.open_notes_dialog()?;
    assert!(h.dialogs.is_open(NOTES_DIALOG));
    h.page.clear_selection();
    assert!(h.page.selection().with(|selection| selection.is_empty()));
    Ok(())
}

#[tokio::test]
async fn download_prefers_collaborator_link() -> anyhow::Result<()> {
    let h = mount()?;
    let direct = h.page.download(7, DownloadKind::Model).await?;
    assert_eq!(direct.href, "/api/download/vault/7?type=model");

    h.mutations.support_downloads();
    let hosted = h.page.download(7, DownloadKind::Model).await?;
    assert_eq!(hosted.href, "https://cdn.example/vault/7/model");
    Ok(())
}

#[tokio::test]
async fn search_text_resets_to_first_page() -> anyhow::Result<()> {
    let h = mount()?;
    settle().await;
    assert!(h.page.set_page(4));
    assert!(h.page.set_sort(VaultSort::ModelName));
    assert_eq!(h.page.listing().filters().page, 1);
    assert!(h.page.set_page(2));
    assert!(h.page.set_query("dragon"));
    settle().await;
    let last = h.fetcher.requests().pop().map(|request| request.filters);
    assert_eq!(last.as_ref().map(|f| f.page), Some(1));
    assert_eq!(
        last.and_then(|f| f.query),
        Some("dragon".to_string())
    );
    assert_eq!(h.page.pagination_footer(), None);
    Ok(())
}
