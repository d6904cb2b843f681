//! In-memory collaborators with call recording, failure switches and gates.
//!
//! Gated fakes record the call first and then wait on a [`Notify`], so a test
//! can observe a mutation "in flight" before releasing it.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::sync::Notify;

use atelier_core::{
    CheckoutCallback, CheckoutOptions, CheckoutSdk, CheckoutSdkEvent, CheckoutSession,
    ContentPage, ContentSource, CoreError, CoreResult, CosmeticShopItem, CosmeticShopMutations,
    CreatorProfile, Dialog, DialogHost, DownloadKind, DownloadLink, FetchRequest, FilterKind,
    Listable, ModelVersionId, Notification, NotificationSink, OnboardingService, OnboardingStep,
    OnboardingWizard, PreferenceProvider, PreferenceSnapshot, ProfileLookup, ResultFetcher,
    ResultPage, ShopItemDraft, SortKey, VaultItemId, VaultMutations,
};
use atelier_telemetry::current_view;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared failure switch and release gate.
#[derive(Default)]
struct Control {
    failing: AtomicBool,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl Control {
    fn hold(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *lock(&self.gate) = Some(Arc::clone(&gate));
        gate
    }

    async fn pass(&self, operation: &'static str) -> CoreResult<()> {
        let gate = lock(&self.gate).clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(CoreError::failed(
                operation,
                anyhow!("{operation} rejected by fake backend"),
            ));
        }
        Ok(())
    }
}

type Responder<T, S, K> =
    Box<dyn Fn(&FetchRequest<S, K>) -> CoreResult<ResultPage<T>> + Send + Sync>;

/// Result fetcher answering from a closure, with optional per-call delays.
pub struct ScriptedFetcher<T, S: SortKey, K: FilterKind> {
    respond: Responder<T, S, K>,
    delays: Mutex<VecDeque<Duration>>,
    requests: Mutex<Vec<FetchRequest<S, K>>>,
    views: Mutex<Vec<Option<String>>>,
}

impl<T: Listable, S: SortKey, K: FilterKind> ScriptedFetcher<T, S, K> {
    /// Fetcher answering every request with `respond`.
    #[must_use]
    pub fn new(
        respond: impl Fn(&FetchRequest<S, K>) -> CoreResult<ResultPage<T>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            delays: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            views: Mutex::new(Vec::new()),
        }
    }

    /// Delay the next calls by `delays`, one entry per call, in order.
    #[must_use]
    pub fn with_delays(self, delays: impl IntoIterator<Item = Duration>) -> Self {
        lock(&self.delays).extend(delays);
        self
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<FetchRequest<S, K>> {
        lock(&self.requests).clone()
    }

    /// View context each request ran under, in arrival order.
    #[must_use]
    pub fn views(&self) -> Vec<Option<String>> {
        lock(&self.views).clone()
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait]
impl<T: Listable, S: SortKey, K: FilterKind> ResultFetcher for ScriptedFetcher<T, S, K> {
    type Item = T;
    type Sort = S;
    type Kind = K;

    async fn fetch(&self, request: FetchRequest<S, K>) -> CoreResult<ResultPage<T>> {
        lock(&self.requests).push(request.clone());
        lock(&self.views).push(current_view());
        let delay = lock(&self.delays).pop_front();
        if let Some(delay) = delay.filter(|delay| !delay.is_zero()) {
            tokio::time::sleep(delay).await;
        }
        (self.respond)(&request)
    }
}

/// Recorded vault mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultCall {
    /// `update_notes` call.
    UpdateNotes {
        /// Target model versions.
        model_version_ids: Vec<ModelVersionId>,
        /// Notes text.
        notes: String,
    },
    /// `remove_items` call.
    Remove {
        /// Target model versions.
        model_version_ids: Vec<ModelVersionId>,
    },
    /// `download` call.
    Download {
        /// Target item.
        item_id: VaultItemId,
        /// Requested part.
        kind: DownloadKind,
    },
}

/// Vault mutations recorded in memory.
#[derive(Default)]
pub struct FakeVaultMutations {
    calls: Mutex<Vec<VaultCall>>,
    control: Control,
    downloads_supported: AtomicBool,
}

impl FakeVaultMutations {
    /// Fake that succeeds immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make later calls fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.control.failing.store(failing, Ordering::SeqCst);
    }

    /// Hold later calls until the returned gate is notified.
    #[must_use]
    pub fn hold(&self) -> Arc<Notify> {
        self.control.hold()
    }

    /// Answer `download` instead of reporting it unsupported.
    pub fn support_downloads(&self) {
        self.downloads_supported.store(true, Ordering::SeqCst);
    }

    /// Every call received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<VaultCall> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl VaultMutations for FakeVaultMutations {
    async fn update_notes(
        &self,
        model_version_ids: &[ModelVersionId],
        notes: &str,
    ) -> CoreResult<()> {
        lock(&self.calls).push(VaultCall::UpdateNotes {
            model_version_ids: model_version_ids.to_vec(),
            notes: notes.to_string(),
        });
        self.control.pass("vault.update_notes").await
    }

    async fn remove_items(&self, model_version_ids: &[ModelVersionId]) -> CoreResult<()> {
        lock(&self.calls).push(VaultCall::Remove {
            model_version_ids: model_version_ids.to_vec(),
        });
        self.control.pass("vault.remove_items").await
    }

    async fn download(&self, item_id: VaultItemId, kind: DownloadKind) -> CoreResult<DownloadLink> {
        lock(&self.calls).push(VaultCall::Download { item_id, kind });
        if !self.downloads_supported.load(Ordering::SeqCst) {
            return Err(CoreError::Unsupported {
                operation: "vault.download",
            });
        }
        self.control.pass("vault.download").await?;
        Ok(DownloadLink {
            href: format!("https://cdn.example/vault/{item_id}/{kind}"),
        })
    }
}

/// Notification sink that keeps every notification.
#[derive(Default)]
pub struct RecordingNotifications {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifications {
    /// Notifications received so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.seen).clone()
    }

    /// Titles received so far.
    #[must_use]
    pub fn titles(&self) -> Vec<String> {
        lock(&self.seen)
            .iter()
            .map(|notification| notification.title.clone())
            .collect()
    }
}

impl NotificationSink for RecordingNotifications {
    fn notify(&self, notification: Notification) {
        lock(&self.seen).push(notification);
    }
}

/// Dialog host tracking which dialogs are open.
#[derive(Default)]
pub struct RecordingDialogs {
    open: Mutex<Vec<Dialog>>,
    closed: Mutex<Vec<String>>,
}

impl RecordingDialogs {
    /// Whether a dialog with `key` is open.
    #[must_use]
    pub fn is_open(&self, key: &str) -> bool {
        lock(&self.open).iter().any(|dialog| dialog.key == key)
    }

    /// Currently open dialogs, oldest first.
    #[must_use]
    pub fn open_dialogs(&self) -> Vec<Dialog> {
        lock(&self.open).clone()
    }

    /// Keys passed to `close`, in order.
    #[must_use]
    pub fn closed_keys(&self) -> Vec<String> {
        lock(&self.closed).clone()
    }
}

impl DialogHost for RecordingDialogs {
    fn open(&self, dialog: Dialog) {
        let mut open = lock(&self.open);
        open.retain(|existing| existing.key != dialog.key);
        open.push(dialog);
    }

    fn close(&self, key: &str) {
        lock(&self.open).retain(|dialog| dialog.key != key);
        lock(&self.closed).push(key.to_string());
    }
}

/// Preference provider returning a settable snapshot.
#[derive(Default)]
pub struct StaticPreferences {
    snapshot: Mutex<PreferenceSnapshot>,
}

impl StaticPreferences {
    /// Provider returning `snapshot`.
    #[must_use]
    pub fn new(snapshot: PreferenceSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
        }
    }

    /// Replace the snapshot.
    pub fn set(&self, snapshot: PreferenceSnapshot) {
        *lock(&self.snapshot) = snapshot;
    }
}

impl PreferenceProvider for StaticPreferences {
    fn snapshot(&self) -> PreferenceSnapshot {
        lock(&self.snapshot).clone()
    }
}

/// Checkout session recording overlay calls.
#[derive(Default)]
pub struct FakeCheckoutSession {
    opened: Mutex<Vec<Vec<String>>>,
    closes: AtomicUsize,
}

impl FakeCheckoutSession {
    /// Price id lists passed to `open`.
    #[must_use]
    pub fn opened(&self) -> Vec<Vec<String>> {
        lock(&self.opened).clone()
    }

    /// Number of `close` calls.
    #[must_use]
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl CheckoutSession for FakeCheckoutSession {
    fn open(&self, price_ids: &[String]) -> CoreResult<()> {
        lock(&self.opened).push(price_ids.to_vec());
        Ok(())
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Checkout SDK that records initialisation and lets tests emit SDK events.
#[derive(Default)]
pub struct FakeCheckoutSdk {
    options: Mutex<Vec<CheckoutOptions>>,
    callback: Mutex<Option<CheckoutCallback>>,
    unavailable: AtomicBool,
    session: Arc<FakeCheckoutSession>,
}

impl FakeCheckoutSdk {
    /// Make `initialize` resolve without an instance, as when the SDK fails to load.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Options passed to every `initialize` call.
    #[must_use]
    pub fn init_options(&self) -> Vec<CheckoutOptions> {
        lock(&self.options).clone()
    }

    /// Session handed out by `initialize`.
    #[must_use]
    pub fn session(&self) -> Arc<FakeCheckoutSession> {
        Arc::clone(&self.session)
    }

    /// Deliver `event` to the registered callback. Returns `false` when none is registered.
    #[must_use]
    pub fn emit(&self, event: CheckoutSdkEvent) -> bool {
        let callback = lock(&self.callback).clone();
        callback.is_some_and(|callback| {
            callback(event);
            true
        })
    }
}

#[async_trait]
impl CheckoutSdk for FakeCheckoutSdk {
    async fn initialize(
        &self,
        options: CheckoutOptions,
        on_event: CheckoutCallback,
    ) -> CoreResult<Option<Arc<dyn CheckoutSession>>> {
        lock(&self.options).push(options);
        *lock(&self.callback) = Some(on_event);
        if self.unavailable.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let session: Arc<dyn CheckoutSession> = self.session.clone();
        Ok(Some(session))
    }
}

/// Onboarding service recording completed steps.
#[derive(Default)]
pub struct FakeOnboarding {
    steps: Mutex<Vec<OnboardingStep>>,
    control: Control,
}

impl FakeOnboarding {
    /// Make later calls fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.control.failing.store(failing, Ordering::SeqCst);
    }

    /// Hold later calls until the returned gate is notified.
    #[must_use]
    pub fn hold(&self) -> Arc<Notify> {
        self.control.hold()
    }

    /// Steps passed to `complete_step`.
    #[must_use]
    pub fn steps(&self) -> Vec<OnboardingStep> {
        lock(&self.steps).clone()
    }
}

#[async_trait]
impl OnboardingService for FakeOnboarding {
    async fn complete_step(&self, step: OnboardingStep) -> CoreResult<()> {
        lock(&self.steps).push(step);
        self.control.pass("onboarding.complete_step").await
    }
}

/// Wizard counting navigation calls.
#[derive(Default)]
pub struct RecordingWizard {
    nexts: AtomicUsize,
    aborts: AtomicUsize,
}

impl RecordingWizard {
    /// Number of `next` calls.
    #[must_use]
    pub fn next_count(&self) -> usize {
        self.nexts.load(Ordering::SeqCst)
    }

    /// Number of `abort` calls.
    #[must_use]
    pub fn abort_count(&self) -> usize {
        self.aborts.load(Ordering::SeqCst)
    }
}

impl OnboardingWizard for RecordingWizard {
    fn next(&self) {
        self.nexts.fetch_add(1, Ordering::SeqCst);
    }

    fn abort(&self) {
        self.aborts.fetch_add(1, Ordering::SeqCst);
    }
}

/// Content source backed by a map of slugs.
#[derive(Default)]
pub struct StaticContent {
    pages: HashMap<String, ContentPage>,
    control: Control,
}

impl StaticContent {
    /// Source serving `page` under `slug`.
    #[must_use]
    pub fn with_page(mut self, slug: &str, page: ContentPage) -> Self {
        self.pages.insert(slug.to_string(), page);
        self
    }

    /// Hold later lookups until the returned gate is notified.
    #[must_use]
    pub fn hold(&self) -> Arc<Notify> {
        self.control.hold()
    }
}

#[async_trait]
impl ContentSource for StaticContent {
    async fn get(&self, slug: &str) -> CoreResult<Option<ContentPage>> {
        self.control.pass("content.get").await?;
        Ok(self.pages.get(slug).cloned())
    }
}

/// Shop mutations recording drafts.
#[derive(Default)]
pub struct FakeShopMutations {
    drafts: Mutex<Vec<ShopItemDraft>>,
    control: Control,
    next_id: AtomicUsize,
}

impl FakeShopMutations {
    /// Make later calls fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.control.failing.store(failing, Ordering::SeqCst);
    }

    /// Drafts received so far.
    #[must_use]
    pub fn drafts(&self) -> Vec<ShopItemDraft> {
        lock(&self.drafts).clone()
    }
}

#[async_trait]
impl CosmeticShopMutations for FakeShopMutations {
    async fn upsert_item(&self, draft: ShopItemDraft) -> CoreResult<CosmeticShopItem> {
        lock(&self.drafts).push(draft.clone());
        self.control.pass("cosmetic_shop.upsert_item").await?;
        let id = draft.id.unwrap_or_else(|| {
            let next = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            u64::try_from(next).unwrap_or(u64::MAX)
        });
        Ok(CosmeticShopItem {
            id,
            cosmetic_id: draft.cosmetic_id,
            title: draft.title,
            description: draft.description,
            unit_amount: draft.unit_amount,
            available_from: draft.available_from,
            available_to: draft.available_to,
            available_quantity: draft.available_quantity,
            archived_at: None,
        })
    }
}

/// Profile lookup backed by a map of usernames.
#[derive(Default)]
pub struct StaticProfiles {
    profiles: HashMap<String, CreatorProfile>,
    lookups: AtomicUsize,
}

impl StaticProfiles {
    /// Lookup serving `profile` under `username`.
    #[must_use]
    pub fn with_profile(mut self, username: &str, profile: CreatorProfile) -> Self {
        self.profiles.insert(username.to_string(), profile);
        self
    }

    /// Number of lookups performed.
    #[must_use]
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileLookup for StaticProfiles {
    async fn find_by_username(&self, username: &str) -> CoreResult<Option<CreatorProfile>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.profiles.get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{single_page, vault_item};
    use atelier_core::{FilterState, VaultItem, VaultSort};

    #[tokio::test]
    async fn scripted_fetcher_records_requests() {
        let fetcher: ScriptedFetcher<VaultItem, VaultSort, String> =
            ScriptedFetcher::new(|_| Ok(single_page(vec![vault_item(1)])));
        let page = fetcher
            .fetch(FetchRequest {
                filters: FilterState::default(),
                limit: 60,
            })
            .await
            .expect("page");
        assert_eq!(page.items.len(), 1);
        assert_eq!(fetcher.request_count(), 1);
    }

    #[tokio::test]
    async fn failing_mutations_report_operation() {
        let fake = FakeVaultMutations::new();
        fake.set_failing(true);
        let err = fake.remove_items(&[1]).await.expect_err("fails");
        assert_eq!(err.operation(), "vault.remove_items");
        assert_eq!(fake.calls().len(), 1);
    }

    #[test]
    fn dialogs_track_open_state() {
        let dialogs = RecordingDialogs::default();
        dialogs.open(Dialog::new("a", "A"));
        assert!(dialogs.is_open("a"));
        dialogs.close("a");
        assert!(!dialogs.is_open("a"));
        assert_eq!(dialogs.closed_keys(), vec!["a"]);
    }
}
