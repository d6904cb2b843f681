//! Vault management page.
//!
//! # Design
//! - One listing controller, one selection and one bulk dispatcher per mounted page.
//! - Display rules (storage meter, status tooltips, access redirects) are pure
//!   functions over config and records.
//! - Download links come from the mutation collaborator when it supports them
//!   and from the configured download base otherwise.

pub mod actions;
pub mod page;
pub mod state;

pub use page::{VaultCollaborators, VaultPage};
