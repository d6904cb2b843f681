//! Trailing-edge debounce stage feeding a [`Signal`].
//!
//! # Design
//! - Each `push` drops the pending timer and arms a new one, so only the value
//!   pushed last before a quiet window reaches the target.
//! - The deadline is fixed when `push` runs, not when the timer task is first polled.
//! - A zero delay forwards values immediately.
//! - The pending timer is owned by the debouncer; dropping it (or calling
//!   `cancel`) guarantees nothing is delivered afterwards.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::core::signal::Signal;

/// Delays writes into a target signal until input has been quiet for `delay`.
pub struct Debouncer<T> {
    delay: Duration,
    target: Signal<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Debouncer writing into `target` after `delay` of quiet.
    #[must_use]
    pub const fn new(delay: Duration, target: Signal<T>) -> Self {
        Self {
            delay,
            target,
            pending: Mutex::new(None),
        }
    }

    /// Configured quiet window.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Signal receiving debounced values.
    #[must_use]
    pub const fn target(&self) -> &Signal<T> {
        &self.target
    }

    /// Schedule `value`, restarting the quiet window.
    ///
    /// Must be called from within a Tokio runtime unless the delay is zero.
    pub fn push(&self, value: T) {
        let mut pending = self.lock_pending();
        if let Some(timer) = pending.take() {
            timer.abort();
        }
        if self.delay.is_zero() {
            self.target.set(value);
            return;
        }
        let deadline = Instant::now() + self.delay;
        let target = self.target.clone();
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            target.set(value);
        }));
    }

    /// Drop the pending timer without delivering its value.
    pub fn cancel(&self) {
        if let Some(timer) = self.lock_pending().take() {
            timer.abort();
        }
    }

    /// Whether a timer is armed and has not fired yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = pending.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_pushes_deliver_last_value_once() {
        let target = Signal::new(String::new());
        let mut changes = target.watch();
        let debouncer = Debouncer::new(WINDOW, target.clone());

        debouncer.push("d".into());
        tokio::time::advance(Duration::from_millis(200)).await;
        debouncer.push("dr".into());
        tokio::time::advance(Duration::from_millis(200)).await;
        debouncer.push("dragon".into());
        tokio::time::advance(Duration::from_millis(499)).await;
        settle().await;
        assert_eq!(target.get(), "");
        assert!(debouncer.is_pending());

        tokio::time::advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(target.get(), "dragon");
        assert!(changes.has_changed().unwrap_or(false));
        changes.mark_unchanged();

        tokio::time::advance(WINDOW * 4).await;
        settle().await;
        assert!(!changes.has_changed().unwrap_or(true));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_value() {
        let target = Signal::new(0_u32);
        let debouncer = Debouncer::new(WINDOW, target.clone());
        debouncer.push(7);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        tokio::time::advance(WINDOW * 2).await;
        settle().await;
        assert_eq!(target.get(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_pending_timer() {
        let target = Signal::new(0_u32);
        let debouncer = Debouncer::new(WINDOW, target.clone());
        debouncer.push(3);
        drop(debouncer);
        tokio::time::advance(WINDOW * 2).await;
        settle().await;
        assert_eq!(target.get(), 0);
    }

    #[test]
    fn zero_delay_forwards_immediately() {
        let target = Signal::new(0_u32);
        let debouncer = Debouncer::new(Duration::ZERO, target.clone());
        debouncer.push(9);
        assert_eq!(target.get(), 9);
    }
}
