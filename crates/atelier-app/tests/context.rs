use std::sync::Arc;

use atelier_app::{AppContext, AppError};
use atelier_config::{AtelierConfig, CheckoutEnvironment};
use atelier_core::{CheckoutSdkEvent, Cosmetic, CosmeticType, VaultItem, VaultSort};
use atelier_events::Event;
use atelier_test_support::fixtures::{cosmetic, current_user, single_page, vault_items};
use atelier_test_support::mocks::{
    FakeCheckoutSdk, FakeVaultMutations, RecordingDialogs, RecordingNotifications, ScriptedFetcher,
};
use atelier_ui::DispatchOutcome;
use atelier_ui::features::vault::VaultCollaborators;

fn context() -> anyhow::Result<AppContext> {
    let mut config = AtelierConfig::default();
    config.listing.debounce_ms = 0;
    config.checkout.token = Some("test_token".into());
    config.checkout.environment = CheckoutEnvironment::Sandbox;
    Ok(AppContext::new(config)?)
}

async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn vault_removal_is_published_on_the_shared_bus() -> anyhow::Result<()> {
    let context = context()?;
    let fetcher = Arc::new(ScriptedFetcher::<VaultItem, VaultSort, String>::new(|_| {
        Ok(single_page(vault_items(&[1, 2])))
    }));
    let page = context.mount_vault(
        Arc::clone(&fetcher),
        VaultCollaborators {
            mutations: Arc::new(FakeVaultMutations::new()),
            notifications: Arc::new(RecordingNotifications::default()),
            dialogs: Arc::new(RecordingDialogs::default()),
        },
    );
    settle().await;
    page.toggle_all_in_page();
    page.open_remove_dialog()?;
    assert_eq!(page.confirm_remove().await?, DispatchOutcome::Completed);

    let events: Vec<_> = context
        .events()
        .backlog_since(0)
        .into_iter()
        .map(|envelope| envelope.event)
        .collect();
    assert_eq!(
        events,
        vec![Event::VaultItemsRemoved {
            model_version_ids: vec![1001, 1002]
        }]
    );
    assert_eq!(context.metrics().snapshot().bulk_actions_total, 1);
    Ok(())
}

#[tokio::test]
async fn checkout_starts_with_configured_token() -> anyhow::Result<()> {
    let context = context()?;
    let sdk = Arc::new(FakeCheckoutSdk::default());
    let provider = context
        .start_checkout(sdk.clone(), Some(&current_user(7)))
        .await?;
    assert!(provider.is_initialized());
    assert_eq!(sdk.init_options()[0].environment, "sandbox");

    assert!(sdk.emit(CheckoutSdkEvent::named("checkout.loaded")));
    let kinds: Vec<_> = context
        .events()
        .backlog_since(0)
        .into_iter()
        .map(|envelope| envelope.event.kind())
        .collect();
    assert_eq!(kinds, vec!["checkout.loaded"]);
    Ok(())
}

#[tokio::test]
async fn picker_search_uses_configured_listing() -> anyhow::Result<()> {
    let context = context()?;
    let fetcher = Arc::new(ScriptedFetcher::<Cosmetic, (), CosmeticType>::new(|_| {
        Ok(single_page(vec![
            cosmetic(1, "Gold Badge", None),
            cosmetic(2, "Silver Badge", None),
        ]))
    }));
    let mut picker = context.mount_cosmetic_picker(Arc::clone(&fetcher));
    assert!(picker.set_search("badge"));
    settle().await;

    let last = fetcher.requests().pop();
    assert_eq!(last.as_ref().map(|request| request.limit), Some(60));
    assert_eq!(
        last.and_then(|request| request.filters.query).as_deref(),
        Some("badge")
    );

    let _ = picker.select(cosmetic(2, "Silver Badge", None));
    let ids: Vec<_> = picker.options().iter().map(|option| option.id).collect();
    assert_eq!(ids, vec![2, 1]);
    Ok(())
}

#[test]
fn out_of_range_debounce_fails_validation() {
    let mut config = AtelierConfig::default();
    config.listing.debounce_ms = u64::MAX;
    let err = AppContext::new(config).err();
    assert!(matches!(err, Some(AppError::Config { .. })));
}
