//! Vault request inputs.

use serde::{Deserialize, Serialize};

use atelier_core::{FetchRequest, ModelVersionId, VaultSort};

use crate::problem::{ValidationError, Violations};
use crate::{MAX_PAGE_LIMIT, default_limit, default_page};

/// Paged vault item query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPaginatedVaultItemsInput {
    /// One-based page.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Page size.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Free-text query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Sort order.
    #[serde(default)]
    pub sort: VaultSort,
    /// Model types to include.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
}

impl GetPaginatedVaultItemsInput {
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
        violations.finish(())
    }
}

impl From<&FetchRequest<VaultSort, String>> for GetPaginatedVaultItemsInput {
    fn from(request: &FetchRequest<VaultSort, String>) -> Self {
        Self {
            page: request.filters.page,
            limit: request.limit,
            query: request.filters.query.clone(),
            sort: request.filters.sort,
            types: request.filters.type_filters.iter().cloned().collect(),
        }
    }
}

/// Notes update for a batch of vault items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultItemsUpdateNotesInput {
    /// Target model versions.
    pub model_version_ids: Vec<ModelVersionId>,
    /// Replacement notes.
    #[serde(default)]
    pub notes: String,
}

impl VaultItemsUpdateNotesInput {
    /// Require at least one target.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when no model versions are listed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();
        violations.check(
            !self.model_version_ids.is_empty(),
            "modelVersionIds",
            "must not be empty",
        );
        violations.finish(())
    }
}

/// Removal of a batch of vault items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultItemsRemoveInput {
    /// Target model versions.
    pub model_version_ids: Vec<ModelVersionId>,
}

impl VaultItemsRemoveInput {
    /// Require at least one target.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when no model versions are listed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();
        violations.check(
            !self.model_version_ids.is_empty(),
            "modelVersionIds",
            "must not be empty",
        );
        violations.finish(())
    }
}

#[cfg(test)]
mod tests {
    use atelier_core::{FilterPatch, FilterState};

    use super::*;

    #[test]
    fn vault_query_serializes_camel_case() {
        let filters = FilterState::<VaultSort, String>::default()
            .with(FilterPatch::new().query("dragon model"));
        let input = GetPaginatedVaultItemsInput::from(&FetchRequest { filters, limit: 60 });
        let json = serde_json::to_value(&input).expect("serializes");
        assert_eq!(json["sort"], "Recently Added");
        assert_eq!(json["query"], "dragon model");
        assert!(json.get("types").is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn empty_batches_are_rejected() {
        let remove = VaultItemsRemoveInput {
            model_version_ids: Vec::new(),
        };
        let err = remove.validate().expect_err("empty batch");
        assert!(err.has_pointer("/modelVersionIds"));

        let notes: VaultItemsUpdateNotesInput =
            serde_json::from_str(r#"{"modelVersionIds":[1,2]}"#).expect("decodes");
        assert!(notes.validate().is_ok());
        assert!(notes.notes.is_empty());
    }
}
