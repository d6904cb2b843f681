//! Bulk actions over the vault selection.
//!
//! # Design
//! - `Idle -> Submitting -> Succeeded`; a failed mutation drops straight back to
//!   `Idle` so the user can retry from the still-open dialog.
//! - While `Submitting`, further dispatches are ignored, so a double click
//!   never issues a second mutation.
//! - Notifications and dialogs go through injected collaborators; the
//!   mutation collaborator surfaces its own errors.
//! - Bulk mutations are not cancellable once issued.

use std::sync::Arc;

use atelier_core::{
    DialogHost, ModelVersionId, Notification, NotificationSink, VaultItem, VaultMutations,
};
use atelier_events::{Event, EventBus};
use atelier_telemetry::Metrics;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::core::selection::SelectionSet;
use crate::core::signal::Signal;
use crate::error::{UiError, UiResult};

/// Dialog key of the notes editor.
pub const NOTES_DIALOG: &str = "vault.add_notes";
/// Dialog key of the removal confirmation.
pub const REMOVE_DIALOG: &str = "vault.remove_items";

/// Mutation applied to every selected row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkAction {
    /// Replace the notes on each row.
    UpdateNotes {
        /// New notes text.
        notes: String,
    },
    /// Remove the rows from the vault.
    Remove,
}

impl BulkAction {
    /// Action identifier used in logs and metrics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UpdateNotes { .. } => "update_notes",
            Self::Remove => "remove_items",
        }
    }

    /// Key of the confirmation dialog driving this action.
    #[must_use]
    pub const fn dialog_key(&self) -> &'static str {
        match self {
            Self::UpdateNotes { .. } => NOTES_DIALOG,
            Self::Remove => REMOVE_DIALOG,
        }
    }

    /// Success notification for this action.
    #[must_use]
    pub fn success_notification(&self) -> Notification {
        match self {
            Self::UpdateNotes { .. } => Notification::success(
                "Notes have been updated",
                "Notes for your selected items have been updated successfully",
            ),
            Self::Remove => Notification::success(
                "Items removed",
                "Your selected items have been removed and your storage has been freed.",
            ),
        }
    }

    /// Whether success removes the affected rows from the selection.
    #[must_use]
    pub const fn narrows_selection(&self) -> bool {
        matches!(self, Self::Remove)
    }

    fn event(&self, model_version_ids: Vec<ModelVersionId>) -> Event {
        match self {
            Self::UpdateNotes { .. } => Event::VaultNotesUpdated { model_version_ids },
            Self::Remove => Event::VaultItemsRemoved { model_version_ids },
        }
    }
}

/// Dispatcher lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulkState {
    /// Ready for a dispatch.
    #[default]
    Idle,
    /// A mutation is in flight.
    Submitting {
        /// Action being submitted.
        action: &'static str,
    },
    /// The last dispatch succeeded; a new dispatch is accepted.
    Succeeded {
        /// Action that succeeded.
        action: &'static str,
    },
}

/// Result of a dispatch that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The mutation ran and succeeded.
    Completed,
    /// Another dispatch was already in flight; nothing was issued.
    Ignored,
}

/// Applies bulk mutations to the selected vault rows.
pub struct BulkActionDispatcher {
    mutations: Arc<dyn VaultMutations>,
    notifications: Arc<dyn NotificationSink>,
    dialogs: Arc<dyn DialogHost>,
    selection: Signal<SelectionSet<VaultItem>>,
    state: Signal<BulkState>,
    events: Option<EventBus>,
    metrics: Metrics,
}

impl BulkActionDispatcher {
    /// Dispatcher over `selection`.
    #[must_use]
    pub fn new(
        mutations: Arc<dyn VaultMutations>,
        notifications: Arc<dyn NotificationSink>,
        dialogs: Arc<dyn DialogHost>,
        selection: Signal<SelectionSet<VaultItem>>,
        metrics: Metrics,
    ) -> Self {
        Self {
            mutations,
            notifications,
            dialogs,
            selection,
            state: Signal::new(BulkState::Idle),
            events: None,
            metrics,
        }
    }

    /// Publish completed actions on `events`.
    #[must_use]
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> BulkState {
        self.state.get()
    }

    /// Observable lifecycle state.
    #[must_use]
    pub const fn state_signal(&self) -> &Signal<BulkState> {
        &self.state
    }

    /// Whether a mutation is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.state.get(), BulkState::Submitting { .. })
    }

    /// Run `action` against the current selection.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::EmptySelection`] when nothing is selected and
    /// [`UiError::Collaborator`] when the mutation fails. A failure leaves the
    /// selection and dialog untouched.
    pub async fn dispatch(&self, action: BulkAction) -> UiResult<DispatchOutcome> {
        let name = action.name();
        let (item_ids, model_version_ids) = self.selection.with(|selection| {
            selection
                .items()
                .map(|item| (item.id, item.model_version_id))
                .unzip::<_, _, Vec<_>, Vec<_>>()
        });
        if item_ids.is_empty() {
            return Err(UiError::EmptySelection { action: name });
        }

        let entered = self.state.update(|state| {
            if matches!(state, BulkState::Submitting { .. }) {
                false
            } else {
                *state = BulkState::Submitting { action: name };
                true
            }
        });
        if !entered {
            debug!(action = name, "bulk action ignored while another is in flight");
            return Ok(DispatchOutcome::Ignored);
        }

        let operation_id = Uuid::new_v4();
        let span = info_span!(
            "bulk_action",
            action = name,
            operation_id = %operation_id,
            count = item_ids.len()
        );
        let result = self
            .run_mutation(&action, &model_version_ids)
            .instrument(span.clone())
            .await;
        let _entered = span.enter();

        match result {
            Ok(()) => {
                if action.narrows_selection() {
                    self.selection
                        .modify(|selection| selection.remove_ids(&item_ids) > 0);
                }
                self.notifications.notify(action.success_notification());
                self.dialogs.close(action.dialog_key());
                self.publish(action.event(model_version_ids));
                self.metrics.inc_bulk_action(name, "succeeded");
                self.state.set(BulkState::Succeeded { action: name });
                info!(count = item_ids.len(), "bulk action completed");
                Ok(DispatchOutcome::Completed)
            }
            Err(source) => {
                self.metrics.inc_bulk_action(name, "failed");
                self.state.set(BulkState::Idle);
                warn!(error = %source, "bulk action failed");
                Err(UiError::collaborator(source.operation(), source))
            }
        }
    }

    async fn run_mutation(
        &self,
        action: &BulkAction,
        model_version_ids: &[ModelVersionId],
    ) -> atelier_core::CoreResult<()> {
        match action {
            BulkAction::UpdateNotes { notes } => {
                self.mutations.update_notes(model_version_ids, notes).await
            }
            BulkAction::Remove => self.mutations.remove_items(model_version_ids).await,
        }
    }

    fn publish(&self, event: Event) {
        if let Some(events) = &self.events {
            let kind = event.kind();
            let _ = events.publish(event);
            self.metrics.inc_event(kind);
        }
    }
}
