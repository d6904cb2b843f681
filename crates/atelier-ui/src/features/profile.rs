//! Creator profile layout rules and page metadata.

use std::collections::HashSet;

use atelier_config::ProfileConfig;
use atelier_core::{CreatorProfile, ProfileLookup, UserId};
use tracing::debug;

use crate::core::logic::abbreviate_number;
use crate::error::{UiError, UiResult};

/// Message shown in place of a blocked creator's content.
pub const BLOCKED_MESSAGE: &str = "Unable to display content because you have blocked this user";

/// What the profile layout renders.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileLayout {
    /// First lookup outstanding.
    Loading,
    /// Reserved username, unknown user or user without a username.
    NotFound,
    /// The viewer blocked this creator.
    Blocked(CreatorProfile),
    /// Render the profile.
    Ready(CreatorProfile),
}

/// Whether profile lookups run for `username`.
#[must_use]
pub fn lookup_enabled(username: &str, config: &ProfileConfig) -> bool {
    !config.is_reserved(username)
}

/// Look up `username`, skipping reserved names.
///
/// # Errors
///
/// Returns [`UiError::Collaborator`] when the lookup fails.
pub async fn load_profile(
    lookup: &dyn ProfileLookup,
    username: &str,
    config: &ProfileConfig,
) -> UiResult<Option<CreatorProfile>> {
    if !lookup_enabled(username, config) {
        debug!(username, "profile lookup skipped for reserved username");
        return Ok(None);
    }
    lookup
        .find_by_username(username)
        .await
        .map_err(|source| UiError::collaborator(source.operation(), source))
}

/// Layout state for `username`.
#[must_use]
pub fn profile_layout(
    username: &str,
    is_initial_loading: bool,
    profile: Option<&CreatorProfile>,
    blocked_users: &HashSet<UserId>,
    config: &ProfileConfig,
) -> ProfileLayout {
    if is_initial_loading {
        return ProfileLayout::Loading;
    }
    let Some(profile) = profile else {
        return ProfileLayout::NotFound;
    };
    if profile.username.is_none() || !lookup_enabled(username, config) {
        return ProfileLayout::NotFound;
    }
    if blocked_users.contains(&profile.id) {
        return ProfileLayout::Blocked(profile.clone());
    }
    ProfileLayout::Ready(profile.clone())
}

/// Document metadata for a profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileMeta {
    /// Document title.
    pub title: String,
    /// Meta description.
    pub description: String,
    /// Preview image.
    pub image: Option<String>,
    /// Canonical URL.
    pub canonical: Option<String>,
}

/// Metadata for `username`; falls back to a generic page until stats load.
#[must_use]
pub fn profile_meta(
    username: &str,
    profile: Option<&CreatorProfile>,
    config: &ProfileConfig,
) -> ProfileMeta {
    let site = &config.site_name;
    let Some((profile, stats)) = profile.and_then(|p| p.stats.as_ref().map(|s| (p, s))) else {
        return ProfileMeta {
            title: format!("Creator Profile | {site}"),
            description: format!("Learn more about this awesome creator on {site}."),
            image: None,
            canonical: None,
        };
    };
    let display = profile.username.as_deref().unwrap_or(username);
    ProfileMeta {
        title: format!("{display} Creator Profile | {site}"),
        description: format!(
            "Average Rating: {:.1} ({}), Models Uploaded: {}, Followers: {}, Total Likes Received: {}, Total Downloads Received: {}. ",
            stats.rating,
            abbreviate_number(stats.rating_count),
            abbreviate_number(0),
            abbreviate_number(stats.followers),
            abbreviate_number(stats.likes),
            abbreviate_number(stats.downloads),
        ),
        image: profile.profile_picture.clone(),
        canonical: Some(format!("{}/user/{username}", config.base_url)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::CreatorStats;

    fn profile(id: u64, username: Option<&str>) -> CreatorProfile {
        CreatorProfile {
            id,
            username: username.map(str::to_string),
            stats: Some(CreatorStats {
                rating: 4.86,
                rating_count: 1_250,
                followers: 3_400_000,
                likes: 999,
                downloads: 12_000,
            }),
            profile_picture: None,
        }
    }

    #[test]
    fn reserved_usernames_disable_lookup() {
        let config = ProfileConfig::default();
        assert!(!lookup_enabled("Atelier", &config));
        assert!(lookup_enabled("maker", &config));
    }

    #[test]
    fn layout_distinguishes_missing_blocked_and_ready() {
        let config = ProfileConfig::default();
        let none = HashSet::new();
        assert_eq!(
            profile_layout("maker", true, None, &none, &config),
            ProfileLayout::Loading
        );
        assert_eq!(profile_layout("maker", false, None, &none, &config), ProfileLayout::NotFound);
        assert_eq!(
            profile_layout("maker", false, Some(&profile(1, None)), &none, &config),
            ProfileLayout::NotFound
        );
        let blocked: HashSet<_> = [1].into_iter().collect();
        assert!(matches!(
            profile_layout("maker", false, Some(&profile(1, Some("maker"))), &blocked, &config),
            ProfileLayout::Blocked(_)
        ));
        assert!(matches!(
            profile_layout("maker", false, Some(&profile(1, Some("maker"))), &none, &config),
            ProfileLayout::Ready(_)
        ));
    }

    #[test]
    fn meta_uses_abbreviated_stats() {
        let config = ProfileConfig::default();
        let meta = profile_meta("maker", Some(&profile(1, Some("maker"))), &config);
        assert_eq!(meta.title, "maker Creator Profile | Atelier");
        assert_eq!(
            meta.description,
            "Average Rating: 4.9 (1.3k), Models Uploaded: 0, Followers: 3.4M, Total Likes Received: 999, Total Downloads Received: 12k. "
        );
        assert_eq!(
            meta.canonical,
            Some(format!("{}/user/maker", config.base_url))
        );
    }

    #[test]
    fn meta_falls_back_without_stats() {
        let meta = profile_meta("maker", None, &ProfileConfig::default());
        assert_eq!(meta.title, "Creator Profile | Atelier");
        assert_eq!(meta.description, "Learn more about this awesome creator on Atelier.");
        assert_eq!(meta.canonical, None);
    }
}
