//! Listing filter state and patch semantics.
//!
//! # Design
//! - `FilterState` is plain data; equality drives debounce settling.
//! - A patch that touches any field other than `page` always lands on page 1,
//!   even when the same patch also carries an explicit page.

use std::collections::BTreeSet;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Bounds required of a listing sort key.
pub trait SortKey: Clone + PartialEq + Debug + Send + Sync + 'static {}

impl<T> SortKey for T where T: Clone + PartialEq + Debug + Send + Sync + 'static {}

/// Bounds required of a listing type-filter value.
pub trait FilterKind: Clone + Ord + Debug + Send + Sync + 'static {}

impl<T> FilterKind for T where T: Clone + Ord + Debug + Send + Sync + 'static {}

/// Inclusive price window; either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lower bound.
    pub min: Option<u64>,
    /// Upper bound.
    pub max: Option<u64>,
}

impl PriceRange {
    /// Whether `amount` falls inside the window.
    #[must_use]
    pub fn contains(&self, amount: u64) -> bool {
        self.min.is_none_or(|min| amount >= min) && self.max.is_none_or(|max| amount <= max)
    }
}

/// Query parameters for one listing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState<S, K: Ord> {
    /// One-based page number.
    pub page: u32,
    /// Free-text query.
    pub query: Option<String>,
    /// Sort order.
    pub sort: S,
    /// Selected type filters.
    pub type_filters: BTreeSet<K>,
    /// Optional price window.
    pub price_range: Option<PriceRange>,
}

impl<S: SortKey, K: FilterKind> FilterState<S, K> {
    /// Fresh state on page 1 with no query or filters.
    #[must_use]
    pub const fn new(sort: S) -> Self {
        Self {
            page: 1,
            query: None,
            sort,
            type_filters: BTreeSet::new(),
            price_range: None,
        }
    }

    /// Merge `patch` into the state. Returns `true` when the state changed.
    pub fn apply(&mut self, patch: FilterPatch<S, K>) -> bool {
        let before = self.clone();
        let resets_page = patch.touches_non_page_field();

        if let Some(query) = patch.query {
            self.query = query;
        }
        if let Some(sort) = patch.sort {
            self.sort = sort;
        }
        if let Some(type_filters) = patch.type_filters {
            self.type_filters = type_filters;
        }
        if let Some(price_range) = patch.price_range {
            self.price_range = price_range;
        }

        if resets_page {
            self.page = 1;
        } else if let Some(page) = patch.page {
            self.page = page.max(1);
        }

        *self != before
    }

    /// Copy of the state with `patch` applied.
    #[must_use]
    pub fn with(&self, patch: FilterPatch<S, K>) -> Self {
        let mut next = self.clone();
        next.apply(patch);
        next
    }
}

impl<S: SortKey + Default, K: FilterKind> Default for FilterState<S, K> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Partial update for a [`FilterState`]. Absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPatch<S, K: Ord> {
    page: Option<u32>,
    query: Option<Option<String>>,
    sort: Option<S>,
    type_filters: Option<BTreeSet<K>>,
    price_range: Option<Option<PriceRange>>,
}

impl<S, K: Ord> Default for FilterPatch<S, K> {
    fn default() -> Self {
        Self {
            page: None,
            query: None,
            sort: None,
            type_filters: None,
            price_range: None,
        }
    }
}

impl<S, K: Ord> FilterPatch<S, K> {
    /// Empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigate to `page`.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Replace the free-text query. Blank text clears it.
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = Some((!query.trim().is_empty()).then_some(query));
        self
    }

    /// Clear the free-text query.
    #[must_use]
    pub fn clear_query(mut self) -> Self {
        self.query = Some(None);
        self
    }

    /// Replace the sort order.
    #[must_use]
    pub fn sort(mut self, sort: S) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Replace the type filters.
    #[must_use]
    pub fn type_filters(mut self, kinds: impl IntoIterator<Item = K>) -> Self {
        self.type_filters = Some(kinds.into_iter().collect());
        self
    }

    /// Replace the price window; `None` removes it.
    #[must_use]
    pub const fn price_range(mut self, range: Option<PriceRange>) -> Self {
        self.price_range = Some(range);
        self
    }

    /// Whether the patch carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.page.is_none() && !self.touches_non_page_field()
    }

    const fn touches_non_page_field(&self) -> bool {
        self.query.is_some()
            || self.sort.is_some()
            || self.type_filters.is_some()
            || self.price_range.is_some()
    }
}

/// Request sent to a result fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest<S, K: Ord> {
    /// Debounced filters.
    pub filters: FilterState<S, K>,
    /// Page size.
    pub limit: u32,
}
