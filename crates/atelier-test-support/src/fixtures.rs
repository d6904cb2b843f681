//! Record builders with predictable defaults.

use chrono::{DateTime, TimeZone, Utc};

use atelier_core::{
    Cosmetic, CosmeticType, CurrentUser, ImageHit, ResultPage, VaultItem, VaultItemMeta,
    VaultItemStatus,
};

/// Fixed timestamp so fixtures compare equal across runs.
#[must_use]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Stored vault item whose model version id is `id + 1000`.
#[must_use]
pub fn vault_item(id: u64) -> VaultItem {
    VaultItem {
        id,
        model_version_id: id + 1_000,
        model_id: id + 500,
        model_name: format!("Model {id}"),
        version_name: format!("v{id}"),
        creator_name: "maker".to_string(),
        model_type: "Checkpoint".to_string(),
        base_model: "SD 1.5".to_string(),
        category: Some("character".to_string()),
        cover_image_url: None,
        status: VaultItemStatus::Stored,
        meta: VaultItemMeta::default(),
        notes: None,
        created_at: fixed_time(),
        added_at: fixed_time(),
        refreshed_at: None,
    }
}

/// Vault items for every id in `ids`.
#[must_use]
pub fn vault_items(ids: &[u64]) -> Vec<VaultItem> {
    ids.iter().copied().map(vault_item).collect()
}

/// Image hit owned by `user_id` carrying `tag_ids`.
#[must_use]
pub fn image_hit(id: u64, user_id: u64, tag_ids: &[u64]) -> ImageHit {
    ImageHit {
        id,
        user_id,
        tag_ids: tag_ids.to_vec(),
        url: format!("https://images.example/{id}.jpeg"),
        reaction_count: 0,
        comment_count: 0,
        created_at: fixed_time(),
    }
}

/// Badge cosmetic.
#[must_use]
pub fn cosmetic(id: u64, name: &str, description: Option<&str>) -> Cosmetic {
    Cosmetic {
        id,
        name: name.to_string(),
        description: description.map(str::to_string),
        kind: CosmeticType::Badge,
    }
}

/// Signed-in user with an email and no payment customer.
#[must_use]
pub fn current_user(id: u64) -> CurrentUser {
    CurrentUser {
        id,
        username: format!("user{id}"),
        email: Some(format!("user{id}@example.com")),
        customer_id: None,
    }
}

/// Single page holding `items`.
#[must_use]
pub fn single_page<T>(items: Vec<T>) -> ResultPage<T> {
    ResultPage {
        total_items: u64::try_from(items.len()).unwrap_or(u64::MAX),
        total_pages: 1,
        items,
    }
}
