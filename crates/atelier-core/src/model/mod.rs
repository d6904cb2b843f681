//! Domain records shared by the listing surfaces.

pub mod enums;
pub mod filter;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use self::enums::{CosmeticType, VaultItemStatus};

/// User identifier.
pub type UserId = u64;
/// Tag identifier.
pub type TagId = u64;
/// Image identifier.
pub type ImageId = u64;
/// Vault item identifier.
pub type VaultItemId = u64;
/// Model version identifier.
pub type ModelVersionId = u64;
/// Cosmetic identifier.
pub type CosmeticId = u64;

/// Record that can appear in a listing and be selected or filtered.
pub trait Listable: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Stable identity used for selection and preference checks.
    fn id(&self) -> u64;

    /// Owning user, when the record has one.
    fn owner_id(&self) -> Option<UserId> {
        None
    }

    /// Tags attached to the record.
    fn tag_ids(&self) -> &[TagId] {
        &[]
    }
}

/// One page of listing results. Replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPage<T> {
    /// Items on this page, in display order.
    pub items: Vec<T>,
    /// Total matching items across every page.
    pub total_items: u64,
    /// Total page count.
    pub total_pages: u32,
}

impl<T> ResultPage<T> {
    /// Page with no items.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_pages: 0,
        }
    }

    /// Whether pagination controls are needed.
    #[must_use]
    pub const fn has_multiple_pages(&self) -> bool {
        self.total_pages > 1
    }
}

impl<T> Default for ResultPage<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Vault storage allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    /// Purchased storage in kilobytes.
    pub storage_kb: u64,
    /// Storage in use in kilobytes.
    pub used_storage_kb: u64,
}

/// Processing metadata attached to a vault item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VaultItemMeta {
    /// Failed processing attempts so far.
    pub failures: u32,
}

/// Model version stored in a user's vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultItem {
    /// Vault item identifier.
    pub id: VaultItemId,
    /// Stored model version.
    pub model_version_id: ModelVersionId,
    /// Parent model.
    pub model_id: u64,
    /// Model name.
    pub model_name: String,
    /// Version name.
    pub version_name: String,
    /// Creator display name.
    pub creator_name: String,
    /// Model type (checkpoint, lora, ...).
    pub model_type: String,
    /// Base model family.
    pub base_model: String,
    /// Category label.
    pub category: Option<String>,
    /// Cover image.
    pub cover_image_url: Option<String>,
    /// Processing status.
    pub status: VaultItemStatus,
    /// Processing metadata.
    #[serde(default)]
    pub meta: VaultItemMeta,
    /// User notes.
    pub notes: Option<String>,
    /// Model publication time.
    pub created_at: DateTime<Utc>,
    /// Time the item entered the vault.
    pub added_at: DateTime<Utc>,
    /// Last time files were refreshed.
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl Listable for VaultItem {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Image search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHit {
    /// Image identifier.
    pub id: ImageId,
    /// Uploader.
    pub user_id: UserId,
    /// Attached tags.
    #[serde(default)]
    pub tag_ids: Vec<TagId>,
    /// Image URL.
    pub url: String,
    /// Reaction count.
    #[serde(default)]
    pub reaction_count: u64,
    /// Comment count.
    #[serde(default)]
    pub comment_count: u64,
    /// Upload time.
    pub created_at: DateTime<Utc>,
}

impl Listable for ImageHit {
    fn id(&self) -> u64 {
        self.id
    }

    fn owner_id(&self) -> Option<UserId> {
        Some(self.user_id)
    }

    fn tag_ids(&self) -> &[TagId] {
        &self.tag_ids
    }
}

/// Cosmetic that can be turned into a shop product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cosmetic {
    /// Cosmetic identifier.
    pub id: CosmeticId,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Category.
    #[serde(rename = "type")]
    pub kind: CosmeticType,
}

impl Listable for Cosmetic {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Product listed in the cosmetic shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosmeticShopItem {
    /// Shop item identifier.
    pub id: u64,
    /// Cosmetic sold by this item.
    pub cosmetic_id: CosmeticId,
    /// Product title.
    pub title: String,
    /// Product description (HTML).
    pub description: Option<String>,
    /// Price in the smallest currency unit.
    pub unit_amount: u64,
    /// Start of the availability window.
    pub available_from: Option<DateTime<Utc>>,
    /// End of the availability window.
    pub available_to: Option<DateTime<Utc>>,
    /// Remaining stock, unlimited when absent.
    pub available_quantity: Option<u32>,
    /// Archive time.
    pub archived_at: Option<DateTime<Utc>>,
}

impl Listable for CosmeticShopItem {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Validated create-or-update payload for a shop item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItemDraft {
    /// Existing item when updating.
    pub id: Option<u64>,
    /// Product title.
    pub title: String,
    /// Product description (HTML).
    pub description: Option<String>,
    /// Cosmetic sold by this item.
    pub cosmetic_id: CosmeticId,
    /// Price in the smallest currency unit.
    pub unit_amount: u64,
    /// Start of the availability window.
    pub available_from: Option<DateTime<Utc>>,
    /// End of the availability window.
    pub available_to: Option<DateTime<Utc>>,
    /// Stock limit.
    pub available_quantity: Option<u32>,
}

impl ShopItemDraft {
    /// Whether the draft creates a new item.
    #[must_use]
    pub const fn is_create(&self) -> bool {
        self.id.is_none()
    }
}

/// Content a user chose to hide.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HiddenPreferences {
    /// Hidden images.
    pub hidden_image_ids: HashSet<ImageId>,
    /// Hidden tags.
    pub hidden_tag_ids: HashSet<TagId>,
    /// Hidden (or blocked) creators.
    pub hidden_user_ids: HashSet<UserId>,
}

/// Preferences as exposed by the preference provider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreferenceSnapshot {
    /// Current hidden sets.
    pub preferences: HiddenPreferences,
    /// Whether the provider is still loading.
    pub is_loading: bool,
}

/// Signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User identifier.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: Option<String>,
    /// Payment provider customer id.
    pub customer_id: Option<String>,
}

/// Aggregate creator statistics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CreatorStats {
    /// Average rating.
    pub rating: f64,
    /// Number of ratings.
    pub rating_count: u64,
    /// Follower count.
    pub followers: u64,
    /// Likes received.
    pub likes: u64,
    /// Downloads received.
    pub downloads: u64,
}

/// Public creator profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorProfile {
    /// User identifier.
    pub id: UserId,
    /// Username, absent for deleted accounts.
    pub username: Option<String>,
    /// Aggregate statistics.
    pub stats: Option<CreatorStats>,
    /// Avatar URL.
    pub profile_picture: Option<String>,
}

/// Static content page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPage {
    /// Page title.
    pub title: String,
    /// Markdown/HTML body.
    pub content: String,
}

/// Resolved download location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLink {
    /// Link target.
    pub href: String,
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// Successful completion.
    Success,
    /// Failure.
    Error,
}

/// User-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl Notification {
    /// Success notification.
    #[must_use]
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Error notification.
    #[must_use]
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Confirmation dialog request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialog {
    /// Stable key used to close the dialog.
    pub key: String,
    /// Title line.
    pub title: String,
}

impl Dialog {
    /// Dialog with `key` and `title`.
    #[must_use]
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
        }
    }
}
