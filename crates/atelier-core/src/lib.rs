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

//! Domain records, filter state and collaborator interfaces for Atelier listings.
//!
//! Layout: `model/` (records, enums, filter state), `service/` (collaborator traits),
//! `error.rs` (shared error type).

pub mod error;
pub mod model;
pub mod service;

pub use error::{CoreError, CoreResult};
pub use model::enums::{
    CosmeticType, DownloadKind, ImageSort, ModelSort, OnboardingStep, ReviewFilter, ReviewSort,
    UploadType, VaultItemStatus, VaultSort,
};
pub use model::filter::{FetchRequest, FilterKind, FilterPatch, FilterState, PriceRange, SortKey};
pub use model::{
    ContentPage, Cosmetic, CosmeticId, CosmeticShopItem, CreatorProfile, CreatorStats, CurrentUser,
    Dialog, DownloadLink, HiddenPreferences, ImageHit, ImageId, Listable, ModelVersionId,
    Notification, NotificationLevel, PreferenceSnapshot, ResultPage, ShopItemDraft, TagId, UserId,
    Vault, VaultItem, VaultItemId, VaultItemMeta,
};
pub use service::{
    CheckoutCallback, CheckoutCustomer, CheckoutOptions, CheckoutSdk, CheckoutSdkEvent,
    CheckoutSession, ContentSource, CosmeticShopMutations, DialogHost, NotificationSink,
    OnboardingService, OnboardingWizard, PreferenceProvider, ProfileLookup, ResultFetcher,
    VaultMutations,
};
