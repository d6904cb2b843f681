#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Core event bus for the Atelier platform.
//!
//! The bus provides a typed event enum, sequential identifiers, and support for
//! replaying recent events when subscribers attach late (e.g. a storage meter
//! that mounts after a bulk removal already completed). Internally it uses
//! `tokio::broadcast` with a bounded buffer; when the channel overflows, the
//! oldest events are dropped.
//!
//! Layout: `payloads.rs` (event types), `routing.rs` (`EventBus`).

pub mod payloads;
pub mod routing;

pub use payloads::{CheckoutCompletedData, DEFAULT_REPLAY_CAPACITY, Event, EventEnvelope, EventId};
pub use routing::{EventBus, EventStream};
