//! Event payload types carried across the platform.

use chrono::{DateTime, Utc};

/// Identifier assigned to each event emitted by the platform.
pub type EventId = u64;

/// Default buffer size for the in-memory replay ring.
pub const DEFAULT_REPLAY_CAPACITY: usize = 256;

/// Typed domain events surfaced across the system.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The checkout overlay finished loading.
    CheckoutLoaded,
    /// The checkout overlay was closed by the customer.
    CheckoutClosed,
    /// A checkout completed; data is absent when the SDK omits it.
    CheckoutCompleted {
        /// Completion payload forwarded from the checkout SDK.
        data: Option<CheckoutCompletedData>,
    },
    /// Notes were written for a batch of vault items.
    VaultNotesUpdated {
        /// Model version identifiers that received the notes.
        model_version_ids: Vec<u64>,
    },
    /// A batch of vault items was removed, freeing storage.
    VaultItemsRemoved {
        /// Model version identifiers that were removed.
        model_version_ids: Vec<u64>,
    },
    /// An onboarding step was completed by the current user.
    OnboardingStepCompleted {
        /// Wire name of the completed step.
        step: String,
    },
}

impl Event {
    /// Machine-friendly discriminator for subscribers and metrics labels.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CheckoutLoaded => "checkout.loaded",
            Self::CheckoutClosed => "checkout.closed",
            Self::CheckoutCompleted { .. } => "checkout.completed",
            Self::VaultNotesUpdated { .. } => "vault.notes_updated",
            Self::VaultItemsRemoved { .. } => "vault.items_removed",
            Self::OnboardingStepCompleted { .. } => "onboarding.step_completed",
        }
    }
}

/// Checkout completion details reported by the payment SDK.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct CheckoutCompletedData {
    /// Provider-side transaction identifier.
    pub transaction_id: String,
    /// Provider-side status string (e.g. `completed`).
    pub status: String,
    /// Provider customer identifier when known.
    pub customer_id: Option<String>,
    /// Grand total as a provider-formatted decimal string.
    pub total: Option<String>,
}

/// Metadata wrapper around events. Each envelope tracks the event id and
/// emission timestamp.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct EventEnvelope {
    /// Sequential identifier assigned by the bus.
    pub id: EventId,
    /// Emission timestamp.
    pub timestamp: DateTime<Utc>,
    /// Event payload.
    pub event: Event,
}
