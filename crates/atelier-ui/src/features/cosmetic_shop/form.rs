//! Create-or-update form for shop items.

use std::sync::Arc;

use atelier_api_models::UpsertCosmeticShopItemInput;
use atelier_core::{Cosmetic, CosmeticId, CosmeticShopItem, CosmeticShopMutations};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::{UiError, UiResult};

/// Shop item form bound to the shop mutation collaborator.
pub struct ShopItemForm {
    values: UpsertCosmeticShopItemInput,
    is_submitting: bool,
    mutations: Arc<dyn CosmeticShopMutations>,
}

impl ShopItemForm {
    /// Form for a new item, or pre-populated from `existing`.
    #[must_use]
    pub fn new(
        existing: Option<&CosmeticShopItem>,
        mutations: Arc<dyn CosmeticShopMutations>,
    ) -> Self {
        let values = existing.map_or_else(UpsertCosmeticShopItemInput::default, |item| {
            UpsertCosmeticShopItemInput {
                id: Some(item.id),
                title: item.title.clone(),
                description: item.description.clone(),
                cosmetic_id: Some(item.cosmetic_id),
                unit_amount: Some(item.unit_amount),
                available_from: item.available_from,
                available_to: item.available_to,
                available_quantity: item.available_quantity,
            }
        });
        Self {
            values,
            is_submitting: false,
            mutations,
        }
    }

    /// Current field values.
    #[must_use]
    pub const fn values(&self) -> &UpsertCosmeticShopItemInput {
        &self.values
    }

    /// Whether the form edits an existing item.
    #[must_use]
    pub const fn is_update(&self) -> bool {
        self.values.id.is_some()
    }

    /// Whether a save is in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Set the product title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.values.title = title.into();
    }

    /// Set the product description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.values.description = Some(description.into());
    }

    /// Choose the cosmetic to sell.
    pub const fn select_cosmetic(&mut self, cosmetic_id: CosmeticId) {
        self.values.cosmetic_id = Some(cosmetic_id);
    }

    /// Set the price.
    pub const fn set_unit_amount(&mut self, unit_amount: Option<u64>) {
        self.values.unit_amount = unit_amount;
    }

    /// Set the stock limit; `None` means unlimited.
    pub const fn set_available_quantity(&mut self, quantity: Option<u32>) {
        self.values.available_quantity = quantity;
    }

    /// Set the availability window.
    pub const fn set_availability(
        &mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) {
        self.values.available_from = from;
        self.values.available_to = to;
    }

    /// Fill title and description from the freshly loaded `cosmetic` when
    /// either is still empty. Returns `true` when the fields were filled.
    pub fn on_cosmetic_loaded(&mut self, cosmetic: &Cosmetic) -> bool {
        let description = self.values.description.clone().unwrap_or_default();
        if !self.values.title.is_empty() && !description.is_empty() {
            return false;
        }
        if !cosmetic.name.is_empty() {
            self.values.title.clone_from(&cosmetic.name);
        }
        let body = cosmetic
            .description
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or(description.as_str());
        self.values.description = Some(format!("<p>{body}</p>"));
        debug!(cosmetic_id = cosmetic.id, "shop item form prefilled");
        true
    }

    /// Validate and save the form.
    ///
    /// A successful create resets the form; an update keeps its values.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Validation`] for invalid input and
    /// [`UiError::Collaborator`] when saving fails. The values are left as
    /// they were in both cases.
    pub async fn submit(&mut self) -> UiResult<CosmeticShopItem> {
        let draft = self
            .values
            .validate()
            .map_err(|source| UiError::Validation { source })?;
        let is_create = draft.is_create();
        self.is_submitting = true;
        let result = self.mutations.upsert_item(draft).await;
        self.is_submitting = false;

        match result {
            Ok(item) => {
                if is_create {
                    self.values = UpsertCosmeticShopItemInput::default();
                }
                info!(item_id = item.id, created = is_create, "shop item saved");
                Ok(item)
            }
            Err(source) => {
                warn!(error = %source, "shop item save failed");
                Err(UiError::collaborator(source.operation(), source))
            }
        }
    }
}
