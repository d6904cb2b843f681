//! Row selection keyed by identity so it survives page navigation.
//!
//! # Design
//! - Selected rows are kept (not just ids) so dialogs can list what a bulk
//!   action will touch even after the rows scrolled off the current page.
//! - `select_all_in_page` adds; `deselect_all_in_page` removes only the given
//!   page's rows. Rows selected on other pages stay selected.

use std::collections::BTreeMap;

use atelier_core::Listable;

/// Selected rows keyed by [`Listable::id`].
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSet<T> {
    rows: BTreeMap<u64, T>,
}

impl<T> Default for SelectionSet<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<T: Listable> SelectionSet<T> {
    /// Empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `item`. Returns `true` when it is now selected.
    pub fn toggle(&mut self, item: &T) -> bool {
        let id = item.id();
        if self.rows.remove(&id).is_some() {
            false
        } else {
            self.rows.insert(id, item.clone());
            true
        }
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: u64) -> bool {
        self.rows.contains_key(&id)
    }

    /// Add every row of `page` that is not selected yet. Returns how many were added.
    pub fn select_all_in_page(&mut self, page: &[T]) -> usize {
        let before = self.rows.len();
        for item in page {
            self.rows.entry(item.id()).or_insert_with(|| item.clone());
        }
        self.rows.len() - before
    }

    /// Whether every row of `page` is selected. An empty page counts as selected.
    #[must_use]
    pub fn is_all_in_page_selected(&self, page: &[T]) -> bool {
        page.iter().all(|item| self.rows.contains_key(&item.id()))
    }

    /// Remove the rows of `page` only. Returns how many were removed.
    pub fn deselect_all_in_page(&mut self, page: &[T]) -> usize {
        page.iter()
            .filter(|item| self.rows.remove(&item.id()).is_some())
            .count()
    }

    /// Header-checkbox behaviour: deselect the page when fully selected, else select it.
    pub fn toggle_all_in_page(&mut self, page: &[T]) {
        if self.is_all_in_page_selected(page) {
            self.deselect_all_in_page(page);
        } else {
            self.select_all_in_page(page);
        }
    }

    /// Drop the given ids. Returns how many were selected.
    pub fn remove_ids(&mut self, ids: &[u64]) -> usize {
        ids.iter()
            .filter(|id| self.rows.remove(id).is_some())
            .count()
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Selected ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<u64> {
        self.rows.keys().copied().collect()
    }

    /// Selected rows in id order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    /// Number of selected rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
