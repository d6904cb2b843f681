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
//! Request DTOs for the Atelier listing endpoints.
//!
//! Inputs validate into domain drafts from `atelier-core`, so a value that
//! passed validation cannot be confused with raw request data. Failures are
//! reported as RFC9457 invalid-parameter lists.

pub mod cosmetic_shop;
pub mod problem;
pub mod vault;

pub use cosmetic_shop::{
    GetAllCosmeticShopSections, GetPaginatedCosmeticShopItemInput, SectionImage,
    UpsertCosmeticShopItemInput, UpsertCosmeticShopSectionInput,
};
pub use problem::{ProblemDetails, ProblemInvalidParam, ValidationError};
pub use vault::{GetPaginatedVaultItemsInput, VaultItemsRemoveInput, VaultItemsUpdateNotesInput};

/// Default page size for paginated inputs.
pub const DEFAULT_PAGE_LIMIT: u32 = 60;
/// Largest accepted page size.
pub const MAX_PAGE_LIMIT: u32 = 200;
/// Longest accepted title, in characters.
pub const MAX_TITLE_CHARS: usize = 255;

const fn default_page() -> u32 {
    1
}

const fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}
