//! Listing controller building blocks shared by every surface.

pub mod bulk;
pub mod debounce;
pub mod listing;
pub mod logic;
pub mod preferences;
pub mod selection;
pub mod signal;
