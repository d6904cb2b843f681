//! Prometheus-backed metrics registry and snapshot helpers.
//!
//! # Design
//! - Encapsulates collector registration to keep the public API small.
//! - Exposes counters for listing fetches, bulk actions, and checkout events.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use prometheus::{IntCounterVec, Opts, Registry, TextEncoder};
use serde::Serialize;

use crate::error::{Result, TelemetryError};

/// Prometheus-backed metrics registry shared across controllers.
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    listing_fetches_total: IntCounterVec,
    listing_stale_responses_total: IntCounterVec,
    listing_fetch_failures_total: IntCounterVec,
    bulk_actions_total: IntCounterVec,
    checkout_events_total: IntCounterVec,
    events_emitted_total: IntCounterVec,
    totals: Totals,
}

#[derive(Default)]
struct Totals {
    fetches: AtomicU64,
    stale: AtomicU64,
    failures: AtomicU64,
    bulk: AtomicU64,
    checkout: AtomicU64,
}

/// Snapshot of selected counters for diagnostics.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Fetches issued across all listing surfaces.
    pub listing_fetches_total: u64,
    /// Responses discarded because a newer request superseded them.
    pub listing_stale_responses_total: u64,
    /// Fetches that resolved with an error.
    pub listing_fetch_failures_total: u64,
    /// Bulk actions dispatched, across all outcomes.
    pub bulk_actions_total: u64,
    /// Checkout SDK events forwarded to the bus.
    pub checkout_events_total: u64,
}

impl Metrics {
    /// Construct a new metrics registry with the standard collectors registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the Prometheus collectors cannot be
    /// built or registered.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let listing_fetches_total = register_counter_vec(
            &registry,
            "listing_fetches_total",
            "Listing fetches issued by surface",
            &["surface"],
        )?;
        let listing_stale_responses_total = register_counter_vec(
            &registry,
            "listing_stale_responses_total",
            "Listing responses dropped because a newer request was issued",
            &["surface"],
        )?;
        let listing_fetch_failures_total = register_counter_vec(
            &registry,
            "listing_fetch_failures_total",
            "Listing fetches that resolved with an error",
            &["surface"],
        )?;
        let bulk_actions_total = register_counter_vec(
            &registry,
            "bulk_actions_total",
            "Bulk actions dispatched by action and outcome",
            &["action", "outcome"],
        )?;
        let checkout_events_total = register_counter_vec(
            &registry,
            "checkout_events_total",
            "Checkout SDK events forwarded by kind",
            &["kind"],
        )?;
        let events_emitted_total = register_counter_vec(
            &registry,
            "events_emitted_total",
            "Domain events emitted by type",
            &["type"],
        )?;

        Ok(Self {
            inner: Arc::new(MetricsInner {
                registry,
                listing_fetches_total,
                listing_stale_responses_total,
                listing_fetch_failures_total,
                bulk_actions_total,
                checkout_events_total,
                events_emitted_total,
                totals: Totals::default(),
            }),
        })
    }

    /// Increment the fetch counter for a listing surface.
    pub fn inc_listing_fetch(&self, surface: &str) {
        self.inner
            .listing_fetches_total
            .with_label_values(&[surface])
            .inc();
        self.inner.totals.fetches.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the stale-response counter for a listing surface.
    pub fn inc_listing_stale(&self, surface: &str) {
        self.inner
            .listing_stale_responses_total
            .with_label_values(&[surface])
            .inc();
        self.inner.totals.stale.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the fetch failure counter for a listing surface.
    pub fn inc_listing_failure(&self, surface: &str) {
        self.inner
            .listing_fetch_failures_total
            .with_label_values(&[surface])
            .inc();
        self.inner.totals.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the bulk action counter for an action/outcome pair.
    pub fn inc_bulk_action(&self, action: &str, outcome: &str) {
        self.inner
            .bulk_actions_total
            .with_label_values(&[action, outcome])
            .inc();
        self.inner.totals.bulk.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the checkout event counter.
    pub fn inc_checkout_event(&self, kind: &str) {
        self.inner
            .checkout_events_total
            .with_label_values(&[kind])
            .inc();
        self.inner.totals.checkout.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the emitted event counter for the specific event type.
    pub fn inc_event(&self, event_type: &str) {
        self.inner
            .events_emitted_total
            .with_label_values(&[event_type])
            .inc();
    }

    /// Render the metrics registry using the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics cannot be encoded.
    pub fn render(&self) -> Result<String> {
        TextEncoder::new()
            .encode_to_string(&self.inner.registry.gather())
            .map_err(|source| TelemetryError::Encode { source })
    }

    /// Take a point-in-time snapshot of the counters, summed across labels.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let totals = &self.inner.totals;
        MetricsSnapshot {
            listing_fetches_total: totals.fetches.load(Ordering::Relaxed),
            listing_stale_responses_total: totals.stale.load(Ordering::Relaxed),
            listing_fetch_failures_total: totals.failures.load(Ordering::Relaxed),
            bulk_actions_total: totals.bulk.load(Ordering::Relaxed),
            checkout_events_total: totals.checkout.load(Ordering::Relaxed),
        }
    }
}

fn register_counter_vec(
    registry: &Registry,
    name: &'static str,
    help: &str,
    labels: &[&str],
) -> Result<IntCounterVec> {
    let counter = IntCounterVec::new(Opts::new(name, help), labels)
        .map_err(|source| TelemetryError::Collector { name, source })?;
    registry
        .register(Box::new(counter.clone()))
        .map_err(|source| TelemetryError::Collector { name, source })?;
    Ok(counter)
}
