//! Image search results: sort menu, hit list state and infinite scroll.
//!
//! # Design
//! - The search client owns paging; this module only decides what to render
//!   and when to ask for more.
//! - Hidden-content filtering runs on every hit batch, so the hidden notice
//!   always reflects the hits received so far.

use atelier_core::{ImageHit, ImageSort, PreferenceSnapshot, UserId};

use crate::core::preferences::apply_user_preferences;

/// One entry of the sort menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption {
    /// Sort value.
    pub sort: ImageSort,
    /// Menu label.
    pub label: &'static str,
    /// Search-index sort key.
    pub index_key: &'static str,
}

/// Sort menu entries in display order.
#[must_use]
pub fn sort_options() -> Vec<SortOption> {
    ImageSort::all()
        .into_iter()
        .map(|sort| SortOption {
            sort,
            label: sort.label(),
            index_key: sort.index_key(),
        })
        .collect()
}

/// Search client activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// No request outstanding.
    #[default]
    Idle,
    /// A request is outstanding.
    Loading,
    /// A request is taking longer than expected.
    Stalled,
    /// The last request failed.
    Error,
}

/// What the hit list renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitListView {
    /// No hits came back.
    NotFound {
        /// Hits removed by preferences.
        hidden_count: usize,
    },
    /// Hidden-content preferences are still loading.
    Loading,
    /// Hits to show.
    Hits {
        /// Hits that survive preferences, in index order.
        visible: Vec<ImageHit>,
        /// Hits removed by preferences.
        hidden_count: usize,
        /// Whether the sentinel shows its spinner.
        sentinel_loading: bool,
    },
}

impl HitListView {
    /// Notice about hidden hits, if any were hidden.
    #[must_use]
    pub fn hidden_notice(&self) -> Option<String> {
        let hidden_count = match self {
            Self::NotFound { hidden_count } | Self::Hits { hidden_count, .. } => *hidden_count,
            Self::Loading => 0,
        };
        (hidden_count > 0)
            .then(|| format!("{hidden_count} models have been hidden due to your settings."))
    }
}

/// Build the hit list state for the hits received so far.
#[must_use]
pub fn hit_list_view(
    hits: &[ImageHit],
    snapshot: &PreferenceSnapshot,
    current_user: Option<UserId>,
    status: SearchStatus,
    is_last_page: bool,
) -> HitListView {
    let outcome = apply_user_preferences(hits, &snapshot.preferences, current_user);
    if hits.is_empty() {
        return HitListView::NotFound {
            hidden_count: outcome.hidden_count,
        };
    }
    if snapshot.is_loading {
        return HitListView::Loading;
    }
    HitListView::Hits {
        visible: outcome.visible,
        hidden_count: outcome.hidden_count,
        sentinel_loading: !is_last_page && status == SearchStatus::Idle,
    }
}

/// Whether the next page should be requested.
#[must_use]
pub fn should_load_more(sentinel_in_view: bool, status: SearchStatus, is_last_page: bool) -> bool {
    sentinel_in_view && status == SearchStatus::Idle && !is_last_page
}
