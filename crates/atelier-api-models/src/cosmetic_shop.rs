//! Cosmetic shop request inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atelier_core::{CosmeticId, CosmeticType, FetchRequest, ShopItemDraft};

use crate::problem::{ValidationError, Violations};
use crate::{MAX_PAGE_LIMIT, MAX_TITLE_CHARS, default_limit, default_page};

/// Paged shop item query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPaginatedCosmeticShopItemInput {
    /// One-based page.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Page size.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Title search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Cosmetic categories to include.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<CosmeticType>>,
    /// Lowest unit amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u64>,
    /// Highest unit amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,
    /// Archive filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl GetPaginatedCosmeticShopItemInput {
    /// Check paging bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every out-of-range field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();
        violations.check(self.page >= 1, "page", "must be at least 1");
        violations.check(
            (1..=MAX_PAGE_LIMIT).contains(&self.limit),
            "limit",
            "must be between 1 and 200",
        );
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            violations.check(min <= max, "minPrice", "must not exceed maxPrice");
        }
        violations.finish(())
    }
}

impl From<&FetchRequest<(), CosmeticType>> for GetPaginatedCosmeticShopItemInput {
    fn from(request: &FetchRequest<(), CosmeticType>) -> Self {
        let filters = &request.filters;
        let price = filters.price_range.unwrap_or_default();
        Self {
            page: filters.page,
            limit: request.limit,
            name: filters.query.clone(),
            types: (!filters.type_filters.is_empty())
                .then(|| filters.type_filters.iter().copied().collect()),
            min_price: price.min,
            max_price: price.max,
            archived: None,
        }
    }
}

/// Create-or-update payload for a shop item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCosmeticShopItemInput {
    /// Existing item when updating.
    #[serde(default)]
    pub id: Option<u64>,
    /// Product title.
    #[serde(default)]
    pub title: String,
    /// Product description (HTML).
    #[serde(default)]
    pub description: Option<String>,
    /// Cosmetic sold by the item.
    #[serde(default)]
    pub cosmetic_id: Option<CosmeticId>,
    /// Price in the smallest currency unit.
    #[serde(default)]
    pub unit_amount: Option<u64>,
    /// Start of the availability window.
    #[serde(default)]
    pub available_from: Option<DateTime<Utc>>,
    /// End of the availability window.
    #[serde(default)]
    pub available_to: Option<DateTime<Utc>>,
    /// Stock limit.
    #[serde(default)]
    pub available_quantity: Option<u32>,
}

impl UpsertCosmeticShopItemInput {
    /// Validate into a draft ready for persistence.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every failing field.
    pub fn validate(&self) -> Result<ShopItemDraft, ValidationError> {
        let mut violations = Violations::default();
        violations.check(
            self.title.chars().count() <= MAX_TITLE_CHARS,
            "title",
            "must be at most 255 characters",
        );
        if self.cosmetic_id.is_none() {
            violations.push("cosmeticId", "required");
        }
        if self.unit_amount.is_none() {
            violations.push("unitAmount", "required");
        }
        let draft = ShopItemDraft {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            cosmetic_id: self.cosmetic_id.unwrap_or_default(),
            unit_amount: self.unit_amount.unwrap_or_default(),
            available_from: self.available_from,
            available_to: self.available_to,
            available_quantity: self.available_quantity,
        };
        violations.finish(draft)
    }
}

/// Section listing query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAllCosmeticShopSections {
    /// Title search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Include section items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_items: Option<bool>,
    /// Archive filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

/// Uploaded section banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionImage {
    /// Storage URL.
    pub url: String,
    /// Pixel width.
    pub width: Option<u32>,
    /// Pixel height.
    pub height: Option<u32>,
}

/// Create-or-update payload for a shop section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCosmeticShopSectionInput {
    /// Existing section when updating.
    #[serde(default)]
    pub id: Option<u64>,
    /// Section title.
    #[serde(default)]
    pub title: String,
    /// Section description.
    #[serde(default)]
    pub description: Option<String>,
    /// Sort position.
    #[serde(default)]
    pub placement: Option<u32>,
    /// Shop items in display order.
    #[serde(default)]
    pub items: Option<Vec<u64>>,
    /// Banner image.
    #[serde(default)]
    pub image: Option<SectionImage>,
}

impl UpsertCosmeticShopSectionInput {
    /// Check field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every failing field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();
        violations.check(
            self.title.chars().count() <= MAX_TITLE_CHARS,
            "title",
            "must be at most 255 characters",
        );
        if let Some(image) = &self.image {
            violations.check(!image.url.trim().is_empty(), "image/url", "required");
        }
        violations.finish(())
    }
}

#[cfg(test)]
mod tests {
    use atelier_core::{FilterPatch, FilterState, PriceRange};

    use super::*;

    #[test]
    fn paginated_input_applies_defaults() {
        let input: GetPaginatedCosmeticShopItemInput =
            serde_json::from_str("{}").expect("empty object decodes");
        assert_eq!(input.page, 1);
        assert_eq!(input.limit, 60);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn paginated_input_rejects_bad_limits() {
        let input = GetPaginatedCosmeticShopItemInput {
            page: 0,
            limit: 201,
            name: None,
            types: None,
            min_price: Some(10),
            max_price: Some(5),
            archived: None,
        };
        let err = input.validate().expect_err("three violations");
        assert_eq!(err.params.len(), 3);
        assert!(err.has_pointer("/page"));
        assert!(err.has_pointer("/limit"));
        assert!(err.has_pointer("/minPrice"));
    }

    #[test]
    fn fetch_request_maps_to_input() {
        let filters = FilterState::<(), CosmeticType>::new(()).with(
            FilterPatch::new()
                .query("crown")
                .type_filters([CosmeticType::Badge])
                .price_range(Some(PriceRange {
                    min: Some(100),
                    max: Some(500),
                })),
        );
        let input = GetPaginatedCosmeticShopItemInput::from(&FetchRequest { filters, limit: 24 });
        assert_eq!(input.name.as_deref(), Some("crown"));
        assert_eq!(input.types, Some(vec![CosmeticType::Badge]));
        assert_eq!((input.min_price, input.max_price), (Some(100), Some(500)));
        assert_eq!(input.limit, 24);
    }

    #[test]
    fn upsert_item_validates_into_draft() {
        let input = UpsertCosmeticShopItemInput {
            title: "Golden crown".into(),
            cosmetic_id: Some(9),
            unit_amount: Some(1_000),
            ..UpsertCosmeticShopItemInput::default()
        };
        let draft = input.validate().expect("valid input");
        assert!(draft.is_create());
        assert_eq!(draft.cosmetic_id, 9);
    }

    #[test]
    fn upsert_item_reports_missing_and_long_fields() {
        let input = UpsertCosmeticShopItemInput {
            title: "x".repeat(256),
            ..UpsertCosmeticShopItemInput::default()
        };
        let err = input.validate().expect_err("invalid input");
        assert!(err.has_pointer("/title"));
        assert!(err.has_pointer("/cosmeticId"));
        assert!(err.has_pointer("/unitAmount"));
    }

    #[test]
    fn title_limit_counts_characters() {
        let input = UpsertCosmeticShopSectionInput {
            title: "é".repeat(255),
            ..UpsertCosmeticShopSectionInput::default()
        };
        assert!(input.validate().is_ok());
    }
}
