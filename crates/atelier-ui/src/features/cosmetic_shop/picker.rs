//! Searchable cosmetic picker used by the shop item form.

use std::collections::HashSet;
use std::sync::Arc;

use atelier_core::{Cosmetic, CosmeticId, CosmeticType, FilterPatch, FilterState, ResultFetcher};
use atelier_telemetry::Metrics;

use crate::core::listing::{ListingController, ListingOptions};

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CosmeticOption {
    /// Cosmetic id.
    pub id: CosmeticId,
    /// Option label.
    pub label: String,
    /// Secondary text.
    pub description: Option<String>,
}

impl From<&Cosmetic> for CosmeticOption {
    fn from(cosmetic: &Cosmetic) -> Self {
        Self {
            id: cosmetic.id,
            label: cosmetic.name.clone(),
            description: cosmetic.description.clone(),
        }
    }
}

/// The selected cosmetic followed by the search page, without duplicates.
#[must_use]
pub fn picker_options(selected: Option<&Cosmetic>, page: &[Cosmetic]) -> Vec<CosmeticOption> {
    let mut seen = HashSet::new();
    selected
        .into_iter()
        .chain(page)
        .filter(|cosmetic| seen.insert(cosmetic.id))
        .map(CosmeticOption::from)
        .collect()
}

/// Picker state: a debounced cosmetic search plus the current choice.
pub struct CosmeticPicker<F>
where
    F: ResultFetcher<Item = Cosmetic, Sort = (), Kind = CosmeticType>,
{
    listing: ListingController<F>,
    selected: Option<Cosmetic>,
}

impl<F> CosmeticPicker<F>
where
    F: ResultFetcher<Item = Cosmetic, Sort = (), Kind = CosmeticType>,
{
    /// Mount the picker and load the first page of cosmetics.
    #[must_use]
    pub fn mount(fetcher: Arc<F>, options: ListingOptions, metrics: Metrics) -> Self {
        Self {
            listing: ListingController::mount(fetcher, FilterState::default(), options, metrics),
            selected: None,
        }
    }

    /// Underlying listing controller.
    #[must_use]
    pub const fn listing(&self) -> &ListingController<F> {
        &self.listing
    }

    /// Update the search text.
    #[must_use]
    pub fn set_search(&self, text: &str) -> bool {
        self.listing.set_filter(FilterPatch::new().query(text))
    }

    /// Current search text.
    #[must_use]
    pub fn search_text(&self) -> String {
        self.listing.filters().query.unwrap_or_default()
    }

    /// Choose `cosmetic`.
    pub fn select(&mut self, cosmetic: Cosmetic) -> CosmeticId {
        let id = cosmetic.id;
        self.selected = Some(cosmetic);
        id
    }

    /// Current choice.
    #[must_use]
    pub const fn selected(&self) -> Option<&Cosmetic> {
        self.selected.as_ref()
    }

    /// Options to render for the latest search page.
    #[must_use]
    pub fn options(&self) -> Vec<CosmeticOption> {
        let view = self.listing.view();
        picker_options(self.selected.as_ref(), view.items())
    }
}
