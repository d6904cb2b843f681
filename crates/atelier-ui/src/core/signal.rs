//! Reactive value cells with explicit, scoped subscriptions.
//!
//! # Design
//! - Backed by a `tokio::sync::watch` channel; writes that leave the value
//!   unchanged do not notify anyone.
//! - `subscribe` registers a callback on a spawned task; the returned
//!   [`Subscription`] aborts that task when dropped so handlers never leak.
//! - Observers always see the latest value. A burst of writes between two
//!   polls is observed once, with the final value.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;

/// Shared, observable value.
pub struct Signal<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T> Signal<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create a signal holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        let (sender, _) = watch::channel(value);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Read the current value without cloning it.
    #[must_use]
    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&self.sender.borrow())
    }

    /// Replace the value, notifying observers only when it changed.
    pub fn set(&self, value: T) {
        let _ = self.replace(value);
    }

    /// Replace the value; returns `true` (and notifies) only when it changed.
    #[must_use]
    pub fn replace(&self, value: T) -> bool {
        self.sender.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }

    /// Mutate in place; `modify` reports whether observers should be notified.
    #[must_use]
    pub fn update(&self, modify: impl FnOnce(&mut T) -> bool) -> bool {
        self.sender.send_if_modified(modify)
    }

    /// Like [`Signal::update`] for callers that do not need the outcome.
    pub fn modify(&self, modify: impl FnOnce(&mut T) -> bool) {
        self.sender.send_if_modified(modify);
    }

    /// Raw receiver positioned at the current value.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    /// Stream yielding every subsequent change.
    #[must_use]
    pub fn changes(&self) -> WatchStream<T> {
        WatchStream::from_changes(self.sender.subscribe())
    }

    /// Invoke `callback` after every change until the returned handle is dropped.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn subscribe<F>(&self, mut callback: F) -> Subscription
    where
        F: FnMut(&T) + Send + 'static,
    {
        let mut receiver = self.sender.subscribe();
        receiver.mark_unchanged();
        let task = tokio::spawn(async move {
            while receiver.changed().await.is_ok() {
                let value = receiver.borrow_and_update().clone();
                callback(&value);
            }
        });
        Subscription { task }
    }
}

/// Registration handle returned by [`Signal::subscribe`].
#[must_use = "dropping a subscription unregisters its callback"]
pub struct Subscription {
    task: JoinHandle<()>,
}

impl Subscription {
    /// Unregister the callback.
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Whether the callback is still registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tokio_stream::StreamExt;

    use super::*;

    #[test]
    fn set_reports_changes_only() {
        let signal = Signal::new(1);
        assert!(!signal.replace(1));
        assert!(signal.replace(2));
        assert_eq!(signal.get(), 2);
        assert!(!signal.update(|_| false));
        assert!(signal.update(|value| {
            *value += 1;
            true
        }));
        assert_eq!(signal.with(|value| *value), 3);
    }

    #[tokio::test]
    async fn subscription_sees_changes_until_dropped() {
        let signal = Signal::new(String::from("a"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = signal.subscribe(move |value: &String| {
            sink.lock().expect("lock").push(value.clone());
        });

        signal.set("b".into());
        tokio::task::yield_now().await;
        signal.set("b".into());
        signal.set("c".into());
        tokio::task::yield_now().await;
        assert!(subscription.is_active());

        subscription.unsubscribe();
        signal.set("d".into());
        tokio::task::yield_now().await;

        assert_eq!(*seen.lock().expect("lock"), vec!["b", "c"]);
    }

    #[tokio::test]
    async fn changes_stream_skips_initial_value() {
        let signal = Signal::new(0_u32);
        let mut changes = signal.changes();
        signal.set(5);
        assert_eq!(changes.next().await, Some(5));
    }
}
