//! Event bus routing helpers.

use crate::payloads::{DEFAULT_REPLAY_CAPACITY, Event, EventEnvelope, EventId};
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;
use tokio::sync::broadcast::{Receiver, Sender};

/// Shared event bus built on top of `tokio::broadcast`.
#[derive(Clone)]
pub struct EventBus {
    sender: Sender<EventEnvelope>,
    replay: Arc<Mutex<VecDeque<EventEnvelope>>>,
    replay_capacity: usize,
    next_id: Arc<Mutex<EventId>>,
}

impl EventBus {
    /// Construct a bus with a custom replay capacity (clamped to at least one).
    #[must_use]
    pub fn with_capacity(replay_capacity: usize) -> Self {
        let replay_capacity = replay_capacity.max(1);
        let (sender, _) = broadcast::channel(replay_capacity);
        Self {
            sender,
            replay: Arc::new(Mutex::new(VecDeque::with_capacity(replay_capacity))),
            replay_capacity,
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    /// Construct a bus with the default replay capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_REPLAY_CAPACITY)
    }

    /// Subscribe to the bus, replaying buffered events newer than `since_id`.
    #[must_use]
    pub fn subscribe(&self, since_id: Option<EventId>) -> EventStream {
        let backlog = since_id.map_or_else(VecDeque::new, |since| {
            self.backlog_since(since).into_iter().collect()
        });
        EventStream {
            backlog,
            receiver: self.sender.subscribe(),
        }
    }

    /// Publish a new event to all subscribers and return its identifier.
    ///
    /// Publishing with no live subscribers still records the event for replay.
    #[must_use]
    pub fn publish(&self, event: Event) -> EventId {
        let mut next = self
            .next_id
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let id = *next;
        *next = next.saturating_add(1);
        drop(next);

        let envelope = EventEnvelope {
            id,
            timestamp: Utc::now(),
            event,
        };
        {
            let mut replay = self.lock_replay();
            if replay.len() == self.replay_capacity {
                let _ = replay.pop_front();
            }
            replay.push_back(envelope.clone());
        }
        let _ = self.sender.send(envelope);
        id
    }

    /// Last event id observed in the replay buffer.
    #[must_use]
    pub fn last_event_id(&self) -> Option<EventId> {
        self.lock_replay().back().map(|env| env.id)
    }

    /// Collect a backlog of events emitted after the specified id.
    #[must_use]
    pub fn backlog_since(&self, id: EventId) -> Vec<EventEnvelope> {
        let replay = self.lock_replay();
        replay.iter().filter(|env| env.id > id).cloned().collect()
    }

    fn lock_replay(&self) -> MutexGuard<'_, VecDeque<EventEnvelope>> {
        self.replay
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream wrapper that yields events either from the replay backlog or from the
/// live broadcast channel.
pub struct EventStream {
    backlog: VecDeque<EventEnvelope>,
    receiver: Receiver<EventEnvelope>,
}

impl EventStream {
    /// Receive the next event, respecting the replay backlog first.
    ///
    /// Live events already delivered through the backlog are skipped.
    pub async fn next(&mut self) -> Option<EventEnvelope> {
        if let Some(event) = self.backlog.pop_front() {
            return Some(event);
        }

        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    const RECV_TIMEOUT: Duration = Duration::from_secs(1);

    #[tokio::test]
    async fn sequential_ids_and_replay() {
        let bus = EventBus::with_capacity(16);
        let mut last_id = 0;
        for _ in 0..5 {
            last_id = bus.publish(Event::CheckoutLoaded);
        }
        assert_eq!(last_id, 5);

        let mut stream = bus.subscribe(Some(2));
        let mut received = Vec::new();
        for _ in 0..3 {
            if let Some(event) = stream.next().await {
                received.push(event);
            }
        }
        assert_eq!(received.len(), 3);
        assert_eq!(received.first().unwrap().id, 3);
        assert_eq!(received.last().unwrap().id, 5);
    }

    #[tokio::test]
    async fn replay_ring_drops_oldest() {
        let bus = EventBus::with_capacity(2);
        let _ = bus.publish(Event::CheckoutLoaded);
        let _ = bus.publish(Event::CheckoutClosed);
        let third = bus.publish(Event::CheckoutCompleted { data: None });

        let backlog = bus.backlog_since(0);
        assert_eq!(backlog.len(), 2);
        assert_eq!(backlog[1].id, third);
        assert_eq!(bus.last_event_id(), Some(third));
    }

    #[tokio::test]
    async fn live_subscriber_receives_published_events() {
        let bus = EventBus::new();
        let mut stream = bus.subscribe(None);
        let id = bus.publish(Event::VaultItemsRemoved {
            model_version_ids: vec![1],
        });
        let envelope = timeout(RECV_TIMEOUT, stream.next())
            .await
            .expect("stream timed out")
            .expect("stream item");
        assert_eq!(envelope.id, id);
        assert!(matches!(envelope.event, Event::VaultItemsRemoved { .. }));
    }

    #[tokio::test]
    async fn zero_capacity_is_clamped() {
        let bus = EventBus::with_capacity(0);
        let id = bus.publish(Event::CheckoutClosed);
        assert_eq!(bus.last_event_id(), Some(id));
    }
}
