use std::sync::Arc;

use atelier_core::{NotificationLevel, VaultItem};
use atelier_events::{Event, EventBus};
use atelier_telemetry::Metrics;
use atelier_test_support::fixtures::vault_items;
use atelier_test_support::mocks::{
    FakeVaultMutations, RecordingDialogs, RecordingNotifications, VaultCall,
};
use atelier_ui::core::bulk::{NOTES_DIALOG, REMOVE_DIALOG};
use atelier_ui::{
    BulkAction, BulkActionDispatcher, BulkState, DispatchOutcome, SelectionSet, Signal, UiError,
};

struct Harness {
    mutations: Arc<FakeVaultMutations>,
    notifications: Arc<RecordingNotifications>,
    dialogs: Arc<RecordingDialogs>,
    selection: Signal<SelectionSet<VaultItem>>,
    metrics: Metrics,
    events: EventBus,
    dispatcher: Arc<BulkActionDispatcher>,
}

fn harness(selected: &[u64]) -> anyhow::Result<Harness> {
    let mutations = Arc::new(FakeVaultMutations::new());
    let notifications = Arc::new(RecordingNotifications::default());
    let dialogs = Arc::new(RecordingDialogs::default());
    let mut rows = SelectionSet::new();
    rows.select_all_in_page(&vault_items(selected));
    let selection = Signal::new(rows);
    let metrics = Metrics::new()?;
    let events = EventBus::new();
    let dispatcher = BulkActionDispatcher::new(
        mutations.clone(),
        notifications.clone(),
        dialogs.clone(),
        selection.clone(),
        metrics.clone(),
    )
    .with_events(events.clone());
    Ok(Harness {
        mutations,
        notifications,
        dialogs,
        selection,
        metrics,
        events,
        dispatcher: Arc::new(dispatcher),
    })
}

async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn second_remove_while_submitting_is_ignored() -> anyhow::Result<()> {
    let h = harness(&[1, 2, 3])?;
    let gate = h.mutations.hold();

    let first = tokio::spawn({
        let dispatcher = Arc::clone(&h.dispatcher);
        async move { dispatcher.dispatch(BulkAction::Remove).await }
    });
    settle().await;
    assert!(h.dispatcher.is_submitting());

    let second = h.dispatcher.dispatch(BulkAction::Remove).await?;
    assert_eq!(second, DispatchOutcome::Ignored);

    gate.notify_one();
    assert_eq!(first.await??, DispatchOutcome::Completed);
    assert_eq!(h.mutations.calls().len(), 1);
    Ok(())
}

#[tokio::test]
async fn remove_success_narrows_selection_and_closes_dialog() -> anyhow::Result<()> {
    let h = harness(&[1, 2])?;
    let outcome = h.dispatcher.dispatch(BulkAction::Remove).await?;
    assert_eq!(outcome, DispatchOutcome::Completed);

    assert_eq!(
        h.mutations.calls(),
        vec![VaultCall::Remove {
            model_version_ids: vec![1001, 1002]
        }]
    );
    assert!(h.selection.with(SelectionSet::is_empty));
    assert_eq!(h.dialogs.closed_keys(), vec![REMOVE_DIALOG]);
    assert_eq!(h.notifications.titles(), vec!["Items removed"]);
    assert_eq!(
        h.dispatcher.state(),
        BulkState::Succeeded {
            action: "remove_items"
        }
    );
    let backlog = h.events.backlog_since(0);
    assert_eq!(
        backlog[0].event,
        Event::VaultItemsRemoved {
            model_version_ids: vec![1001, 1002]
        }
    );
    assert_eq!(h.metrics.snapshot().bulk_actions_total, 1);
    Ok(())
}

#[tokio::test]
async fn notes_success_keeps_selection() -> anyhow::Result<()> {
    let h = harness(&[4, 5])?;
    let outcome = h
        .dispatcher
        .dispatch(BulkAction::UpdateNotes {
            notes: "keep for later".into(),
        })
        .await?;
    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(h.selection.with(SelectionSet::len), 2);
    assert_eq!(h.dialogs.closed_keys(), vec![NOTES_DIALOG]);
    let notes = h.notifications.notifications();
    assert_eq!(notes[0].level, NotificationLevel::Success);
    assert_eq!(notes[0].title, "Notes have been updated");
    Ok(())
}

#[tokio::test]
async fn failure_leaves_selection_and_returns_to_idle() -> anyhow::Result<()> {
    let h = harness(&[1, 2])?;
    h.mutations.set_failing(true);

    let err = h
        .dispatcher
        .dispatch(BulkAction::Remove)
        .await
        .expect_err("mutation fails");
    assert!(matches!(
        err,
        UiError::Collaborator {
            operation: "vault.remove_items",
            ..
        }
    ));
    assert_eq!(h.selection.with(SelectionSet::len), 2);
    assert_eq!(h.dispatcher.state(), BulkState::Idle);
    assert!(h.dialogs.closed_keys().is_empty());
    assert!(h.notifications.notifications().is_empty());
    assert!(h.events.backlog_since(0).is_empty());

    h.mutations.set_failing(false);
    assert_eq!(
        h.dispatcher.dispatch(BulkAction::Remove).await?,
        DispatchOutcome::Completed
    );
    Ok(())
}

#[tokio::test]
async fn empty_selection_is_rejected_without_calling_backend() -> anyhow::Result<()> {
    let h = harness(&[])?;
    let err = h
        .dispatcher
        .dispatch(BulkAction::Remove)
        .await
        .expect_err("nothing selected");
    assert!(matches!(
        err,
        UiError::EmptySelection {
            action: "remove_items"
        }
    ));
    assert!(h.mutations.calls().is_empty());
    Ok(())
}
