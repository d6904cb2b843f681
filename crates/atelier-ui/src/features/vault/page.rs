//! Mounted vault page: listing, selection and bulk actions.

use std::sync::Arc;

use atelier_config::VaultConfig;
use atelier_core::{
    DialogHost, DownloadKind, DownloadLink, FilterPatch, FilterState, NotificationSink,
    ResultFetcher, VaultItem, VaultItemId, VaultMutations, VaultSort,
};
use atelier_events::EventBus;
use atelier_telemetry::Metrics;

use crate::core::bulk::{BulkAction, BulkActionDispatcher, DispatchOutcome};
use crate::core::listing::{ListingController, ListingOptions, ResultView};
use crate::core::selection::SelectionSet;
use crate::core::signal::Signal;
use crate::error::{UiError, UiResult};
use crate::features::vault::actions::{notes_dialog, remove_dialog, resolve_download};
use crate::features::vault::state::{StatusDetails, pagination_footer, status_details};

/// Collaborators a vault page talks to.
#[derive(Clone)]
pub struct VaultCollaborators {
    /// Vault mutations.
    pub mutations: Arc<dyn VaultMutations>,
    /// Notification surface.
    pub notifications: Arc<dyn NotificationSink>,
    /// Dialog surface.
    pub dialogs: Arc<dyn DialogHost>,
}

/// Vault page state for one mounted view.
pub struct VaultPage<F>
where
    F: ResultFetcher<Item = VaultItem, Sort = VaultSort, Kind = String>,
{
    listing: ListingController<F>,
    selection: Signal<SelectionSet<VaultItem>>,
    dispatcher: BulkActionDispatcher,
    mutations: Arc<dyn VaultMutations>,
    dialogs: Arc<dyn DialogHost>,
    config: VaultConfig,
}

impl<F> VaultPage<F>
where
    F: ResultFetcher<Item = VaultItem, Sort = VaultSort, Kind = String>,
{
    /// Mount the page with default filters (page 1, recently added).
    #[must_use]
    pub fn mount(
        fetcher: Arc<F>,
        collaborators: VaultCollaborators,
        config: VaultConfig,
        options: ListingOptions,
        metrics: Metrics,
    ) -> Self {
        let selection = Signal::new(SelectionSet::new());
        let dispatcher = BulkActionDispatcher::new(
            Arc::clone(&collaborators.mutations),
            collaborators.notifications,
            Arc::clone(&collaborators.dialogs),
            selection.clone(),
            metrics.clone(),
        );
        let listing = ListingController::mount(fetcher, FilterState::default(), options, metrics);
        Self {
            listing,
            selection,
            dispatcher,
            mutations: collaborators.mutations,
            dialogs: collaborators.dialogs,
            config,
        }
    }

    /// Publish bulk action events on `events`.
    #[must_use]
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.dispatcher = self.dispatcher.with_events(events);
        self
    }

    /// Underlying listing controller.
    #[must_use]
    pub const fn listing(&self) -> &ListingController<F> {
        &self.listing
    }

    /// Bulk dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &BulkActionDispatcher {
        &self.dispatcher
    }

    /// Observable selection.
    #[must_use]
    pub const fn selection(&self) -> &Signal<SelectionSet<VaultItem>> {
        &self.selection
    }

    /// Current result view.
    #[must_use]
    pub fn view(&self) -> ResultView<VaultItem> {
        self.listing.view()
    }

    /// Update the search text; blank text clears the query.
    #[must_use]
    pub fn set_query(&self, text: &str) -> bool {
        self.listing.set_filter(FilterPatch::new().query(text))
    }

    /// Change the sort order.
    #[must_use]
    pub fn set_sort(&self, sort: VaultSort) -> bool {
        self.listing.set_filter(FilterPatch::new().sort(sort))
    }

    /// Restrict results to the given model types.
    #[must_use]
    pub fn set_types(&self, types: impl IntoIterator<Item = String>) -> bool {
        self.listing.set_filter(FilterPatch::new().type_filters(types))
    }

    /// Navigate to `page`.
    #[must_use]
    pub fn set_page(&self, page: u32) -> bool {
        self.listing.set_page(page)
    }

    /// Toggle one row; returns whether it is now selected.
    #[must_use]
    pub fn toggle_item(&self, item: &VaultItem) -> bool {
        let mut selected = false;
        self.selection.modify(|selection| {
            selected = selection.toggle(item);
            true
        });
        selected
    }

    /// Select every row on the visible page, or deselect them all when they
    /// are already selected.
    pub fn toggle_all_in_page(&self) {
        let view = self.listing.view();
        self.selection.modify(|selection| {
            let before = selection.len();
            selection.toggle_all_in_page(view.items());
            selection.len() != before
        });
    }

    /// Whether every row on the visible page is selected.
    #[must_use]
    pub fn is_all_in_page_selected(&self) -> bool {
        let view = self.listing.view();
        self.selection
            .with(|selection| selection.is_all_in_page_selected(view.items()))
    }

    /// Drop the whole selection.
    pub fn clear_selection(&self) {
        self.selection.modify(|selection| {
            let had_rows = !selection.is_empty();
            selection.clear();
            had_rows
        });
    }

    /// Open the notes editor for the selection.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::EmptySelection`] when nothing is selected.
    pub fn open_notes_dialog(&self) -> UiResult<()> {
        self.require_selection("update_notes")?;
        self.dialogs.open(notes_dialog());
        Ok(())
    }

    /// Open the removal confirmation for the selection.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::EmptySelection`] when nothing is selected.
    pub fn open_remove_dialog(&self) -> UiResult<()> {
        let count = self.require_selection("remove_items")?;
        self.dialogs.open(remove_dialog(count));
        Ok(())
    }

    /// Save `notes` on every selected row.
    ///
    /// # Errors
    ///
    /// Propagates dispatcher failures.
    pub async fn submit_notes(&self, notes: impl Into<String>) -> UiResult<DispatchOutcome> {
        let outcome = self
            .dispatcher
            .dispatch(BulkAction::UpdateNotes {
                notes: notes.into(),
            })
            .await?;
        self.refresh_after(outcome);
        Ok(outcome)
    }

    /// Remove every selected row from the vault.
    ///
    /// # Errors
    ///
    /// Propagates dispatcher failures.
    pub async fn confirm_remove(&self) -> UiResult<DispatchOutcome> {
        let outcome = self.dispatcher.dispatch(BulkAction::Remove).await?;
        self.refresh_after(outcome);
        Ok(outcome)
    }

    /// Download link for one part of an item.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Collaborator`] when the download call fails.
    pub async fn download(
        &self,
        item_id: VaultItemId,
        kind: DownloadKind,
    ) -> UiResult<DownloadLink> {
        resolve_download(self.mutations.as_ref(), &self.config, item_id, kind).await
    }

    /// Status badge for `item`.
    #[must_use]
    pub fn status_details(&self, item: &VaultItem) -> StatusDetails {
        status_details(item, self.config.max_processing_failures)
    }

    /// Pagination footer for the current page.
    #[must_use]
    pub fn pagination_footer(&self) -> Option<String> {
        self.listing
            .view()
            .page
            .as_ref()
            .and_then(pagination_footer)
    }

    fn require_selection(&self, action: &'static str) -> UiResult<usize> {
        let count = self.selection.with(SelectionSet::len);
        if count == 0 {
            return Err(UiError::EmptySelection { action });
        }
        Ok(count)
    }

    fn refresh_after(&self, outcome: DispatchOutcome) {
        if outcome == DispatchOutcome::Completed {
            self.listing.refresh();
        }
    }
}
