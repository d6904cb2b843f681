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
#![allow(clippy::module_name_repetitions)]
//! Atelier front-end logic, independent of any rendering toolkit.
//!
//! `core` holds the listing controller pieces shared by every surface: reactive
//! signals, the debounce stage, the fetch driver, preference filtering, row
//! selection and bulk dispatch. `features` builds the vault, image search,
//! cosmetic shop, onboarding and profile pages on top of them, and `services`
//! wraps third-party SDKs.

pub mod core;
pub mod error;
pub mod features;
pub mod services;

pub use crate::core::bulk::{BulkAction, BulkActionDispatcher, BulkState, DispatchOutcome};
pub use crate::core::debounce::Debouncer;
pub use crate::core::listing::{ListingController, ListingOptions, ResultView};
pub use crate::core::preferences::{PreferenceOutcome, apply_user_preferences};
pub use crate::core::selection::SelectionSet;
pub use crate::core::signal::{Signal, Subscription};
pub use error::{UiError, UiResult};
