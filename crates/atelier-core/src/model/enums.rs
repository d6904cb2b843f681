//! Shared enumerations and their wire names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upload destination buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UploadType {
    /// Single gallery image.
    Image,
    /// Training dataset archive.
    TrainingImages,
    /// Model file.
    Model,
    /// Anything else.
    Default,
}

impl UploadType {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::TrainingImages => "training-images",
            Self::Model => "model",
            Self::Default => "default",
        }
    }
}

/// Model listing sort orders. The wire value doubles as the display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelSort {
    /// Best average rating first.
    #[serde(rename = "Highest Rated")]
    HighestRated,
    /// Most downloads first.
    #[serde(rename = "Most Downloaded")]
    MostDownloaded,
    /// Most likes first.
    #[serde(rename = "Most Liked")]
    MostLiked,
    /// Newest first.
    #[serde(rename = "Newest")]
    Newest,
}

impl ModelSort {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighestRated => "Highest Rated",
            Self::MostDownloaded => "Most Downloaded",
            Self::MostLiked => "Most Liked",
            Self::Newest => "Newest",
        }
    }
}

/// Review sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewSort {
    /// Newest first.
    Newest,
    /// Oldest first.
    Oldest,
    /// Most liked first.
    MostLiked,
    /// Most disliked first.
    MostDisliked,
}

impl ReviewSort {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::MostLiked => "most-liked",
            Self::MostDisliked => "most-disliked",
        }
    }
}

/// Review filter toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewFilter {
    /// Include mature reviews.
    Nsfw,
    /// Only reviews with images.
    IncludesImages,
}

impl ReviewFilter {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nsfw => "nsfw",
            Self::IncludesImages => "includes-images",
        }
    }
}

/// Vault listing sort orders. The wire value doubles as the display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VaultSort {
    /// Most recently stored first.
    #[default]
    #[serde(rename = "Recently Added")]
    RecentlyAdded,
    /// Most recently published model first.
    #[serde(rename = "Recently Created")]
    RecentlyCreated,
    /// Alphabetical by model name.
    #[serde(rename = "Model Name")]
    ModelName,
    /// Largest first.
    #[serde(rename = "Model Size")]
    ModelSize,
}

impl VaultSort {
    /// Every sort option in menu order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::RecentlyAdded,
            Self::RecentlyCreated,
            Self::ModelName,
            Self::ModelSize,
        ]
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RecentlyAdded => "Recently Added",
            Self::RecentlyCreated => "Recently Created",
            Self::ModelName => "Model Name",
            Self::ModelSize => "Model Size",
        }
    }
}

/// Cosmetic categories sold in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CosmeticType {
    /// Profile badge.
    Badge,
    /// Username plate.
    NamePlate,
    /// Frame around posted content.
    ContentDecoration,
    /// Avatar decoration.
    ProfileDecoration,
    /// Profile page background.
    ProfileBackground,
}

impl CosmeticType {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Badge => "Badge",
            Self::NamePlate => "NamePlate",
            Self::ContentDecoration => "ContentDecoration",
            Self::ProfileDecoration => "ProfileDecoration",
            Self::ProfileBackground => "ProfileBackground",
        }
    }
}

/// Processing status of a vault item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VaultItemStatus {
    /// Item files are processed and downloadable.
    Stored,
    /// Item is queued for processing.
    Pending,
    /// Processing failed at least once.
    Failed,
}

impl VaultItemStatus {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stored => "Stored",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
        }
    }
}

/// Onboarding wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    /// Terms of service acceptance.
    Tos,
    /// Profile basics.
    Profile,
    /// Content browsing levels.
    BrowsingLevels,
    /// Currency introduction.
    Buzz,
}

impl OnboardingStep {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tos => "tos",
            Self::Profile => "profile",
            Self::BrowsingLevels => "browsing_levels",
            Self::Buzz => "buzz",
        }
    }
}

/// Image search sort options backed by search-index sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageSort {
    /// Highest all-time reaction rank first.
    #[default]
    #[serde(rename = "images:rank.reactionCountAllTimeRank:asc")]
    MostReactions,
    /// Highest all-time comment rank first.
    #[serde(rename = "images:rank.commentCountAllTimeRank:asc")]
    MostDiscussed,
    /// Newest first.
    #[serde(rename = "images:createdAt:desc")]
    Newest,
}

impl ImageSort {
    /// Every sort option in menu order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::MostReactions, Self::MostDiscussed, Self::Newest]
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MostReactions => "Most Reactions",
            Self::MostDiscussed => "Most Discussed",
            Self::Newest => "Newest",
        }
    }

    /// Search-index sort key.
    #[must_use]
    pub const fn index_key(self) -> &'static str {
        match self {
            Self::MostReactions => "images:rank.reactionCountAllTimeRank:asc",
            Self::MostDiscussed => "images:rank.commentCountAllTimeRank:asc",
            Self::Newest => "images:createdAt:desc",
        }
    }
}

/// Downloadable parts of a vault item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadKind {
    /// Model files.
    Model,
    /// Model card and metadata.
    Details,
    /// Showcase images.
    Images,
}

impl DownloadKind {
    /// Query value for download links.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Details => "details",
            Self::Images => "images",
        }
    }
}

macro_rules! display_via {
    ($method:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.$method())
                }
            }
        )+
    };
}

display_via!(as_str => UploadType, ReviewSort, ReviewFilter, CosmeticType, VaultItemStatus, OnboardingStep, DownloadKind);
display_via!(label => ModelSort, VaultSort, ImageSort);
