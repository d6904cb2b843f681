//! Collaborator traits implemented by data, payment and UI-host adapters.
//!
//! Optional operations ship default bodies that report
//! [`CoreError::Unsupported`].

use std::sync::Arc;

use async_trait::async_trait;
use atelier_events::CheckoutCompletedData;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::model::enums::{DownloadKind, OnboardingStep};
use crate::model::filter::{FetchRequest, FilterKind, SortKey};
use crate::model::{
    ContentPage, CosmeticShopItem, CreatorProfile, Dialog, DownloadLink, Listable, ModelVersionId,
    Notification, PreferenceSnapshot, ResultPage, ShopItemDraft, VaultItemId,
};

/// Paged data source behind a listing surface.
#[async_trait]
pub trait ResultFetcher: Send + Sync + 'static {
    /// Record type returned by the fetcher.
    type Item: Listable;
    /// Sort key accepted by the fetcher.
    type Sort: SortKey;
    /// Type-filter values accepted by the fetcher.
    type Kind: FilterKind;

    /// Fetch one page for the given debounced filters.
    ///
    /// Listing controllers call this inside their surface's view context, so
    /// implementations can read `atelier_telemetry::current_view` to tag requests.
    async fn fetch(
        &self,
        request: FetchRequest<Self::Sort, Self::Kind>,
    ) -> CoreResult<ResultPage<Self::Item>>;
}

/// Read-only source of the viewer's hidden-content preferences.
pub trait PreferenceProvider: Send + Sync {
    /// Current preferences and loading flag.
    fn snapshot(&self) -> PreferenceSnapshot;
}

/// Mutations available on vault items.
#[async_trait]
pub trait VaultMutations: Send + Sync {
    /// Replace the notes on every listed model version.
    async fn update_notes(
        &self,
        model_version_ids: &[ModelVersionId],
        notes: &str,
    ) -> CoreResult<()>;

    /// Remove the listed model versions from the vault.
    async fn remove_items(&self, model_version_ids: &[ModelVersionId]) -> CoreResult<()>;

    /// Resolve a download for one item; default implementation reports lack of support.
    async fn download(&self, item_id: VaultItemId, kind: DownloadKind) -> CoreResult<DownloadLink> {
        let _ = (item_id, kind);
        Err(CoreError::Unsupported {
            operation: "vault.download",
        })
    }
}

/// Create-or-update operations for cosmetic shop items.
#[async_trait]
pub trait CosmeticShopMutations: Send + Sync {
    /// Persist a validated draft.
    async fn upsert_item(&self, draft: ShopItemDraft) -> CoreResult<CosmeticShopItem>;
}

/// Static content lookup.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch a content page by slug.
    async fn get(&self, slug: &str) -> CoreResult<Option<ContentPage>>;
}

/// Server-side onboarding progress.
#[async_trait]
pub trait OnboardingService: Send + Sync {
    /// Record `step` as completed for the current user.
    async fn complete_step(&self, step: OnboardingStep) -> CoreResult<()>;
}

/// Host wizard that owns step navigation.
pub trait OnboardingWizard: Send + Sync {
    /// Advance to the next step.
    fn next(&self);

    /// Leave onboarding without completing it.
    fn abort(&self);
}

/// Creator profile lookup.
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    /// Profile for `username`, if one exists.
    async fn find_by_username(&self, username: &str) -> CoreResult<Option<CreatorProfile>>;
}

/// Surface for user-facing notifications.
pub trait NotificationSink: Send + Sync {
    /// Show a notification.
    fn notify(&self, notification: Notification);
}

/// Surface that owns modal dialogs.
pub trait DialogHost: Send + Sync {
    /// Show a dialog.
    fn open(&self, dialog: Dialog);

    /// Close the dialog registered under `key`.
    fn close(&self, key: &str);
}

/// Customer identity handed to the checkout SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutCustomer {
    /// Known payment-provider customer.
    Id(String),
    /// Signed-in user without a customer record.
    Email(String),
    /// No signed-in user.
    Anonymous,
}

/// Initialisation options for the checkout SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutOptions {
    /// Provider environment (`sandbox` or `production`).
    pub environment: String,
    /// Client token.
    pub token: String,
    /// Customer identity.
    pub customer: CheckoutCustomer,
    /// Overlay theme.
    pub theme: String,
    /// Whether the overlay offers account switching.
    pub allow_logout: bool,
}

/// Raw event emitted by the checkout SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSdkEvent {
    /// SDK event name (e.g. `checkout.completed`).
    pub name: String,
    /// Completion payload when present.
    pub data: Option<CheckoutCompletedData>,
}

impl CheckoutSdkEvent {
    /// Event with no payload.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: None,
        }
    }
}

/// Callback invoked for every SDK event.
pub type CheckoutCallback = Arc<dyn Fn(CheckoutSdkEvent) + Send + Sync>;

/// Initialised checkout SDK instance.
pub trait CheckoutSession: Send + Sync {
    /// Open the checkout overlay for the given price identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] when the SDK refuses to open the overlay.
    fn open(&self, price_ids: &[String]) -> CoreResult<()>;

    /// Close the overlay if it is open.
    fn close(&self);
}

/// Loader for the third-party checkout SDK.
#[async_trait]
pub trait CheckoutSdk: Send + Sync {
    /// Initialise the SDK; `None` when the SDK could not be loaded.
    async fn initialize(
        &self,
        options: CheckoutOptions,
        on_event: CheckoutCallback,
    ) -> CoreResult<Option<Arc<dyn CheckoutSession>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NotesOnly;

    #[async_trait]
    impl VaultMutations for NotesOnly {
        async fn update_notes(&self, _: &[ModelVersionId], _: &str) -> CoreResult<()> {
            Ok(())
        }

        async fn remove_items(&self, _: &[ModelVersionId]) -> CoreResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn download_defaults_to_unsupported() {
        let result = NotesOnly.download(7, DownloadKind::Model).await;
        assert!(matches!(
            result,
            Err(CoreError::Unsupported {
                operation: "vault.download"
            })
        ));
    }

    #[test]
    fn customer_serializes_tagged() {
        let value = serde_json::to_value(CheckoutCustomer::Email("a@b.c".into())).ok();
        assert_eq!(value, Some(serde_json::json!({ "email": "a@b.c" })));
    }
}
