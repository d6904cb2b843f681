//! Hidden-content filtering applied to fetched pages.

use atelier_core::{HiddenPreferences, Listable, UserId};

/// Visible subset of a page and how many rows were hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceOutcome<T> {
    /// Rows that survive the viewer's preferences, in input order.
    pub visible: Vec<T>,
    /// Rows removed by the preferences.
    pub hidden_count: usize,
}

/// Whether `item` should be hidden from `current_user`.
///
/// Rows owned by the viewer are never hidden from them.
#[must_use]
pub fn is_hidden<T: Listable>(
    item: &T,
    preferences: &HiddenPreferences,
    current_user: Option<UserId>,
) -> bool {
    let owner = item.owner_id();
    if owner.is_some() && owner == current_user {
        return false;
    }
    preferences.hidden_image_ids.contains(&item.id())
        || item
            .tag_ids()
            .iter()
            .any(|tag| preferences.hidden_tag_ids.contains(tag))
        || owner.is_some_and(|owner| preferences.hidden_user_ids.contains(&owner))
}

/// Split `items` into the visible subset and the hidden count.
#[must_use]
pub fn apply_user_preferences<T: Listable>(
    items: &[T],
    preferences: &HiddenPreferences,
    current_user: Option<UserId>,
) -> PreferenceOutcome<T> {
    let visible: Vec<T> = items
        .iter()
        .filter(|item| !is_hidden(*item, preferences, current_user))
        .cloned()
        .collect();
    PreferenceOutcome {
        hidden_count: items.len() - visible.len(),
        visible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Hit {
        id: u64,
        owner: u64,
        tags: Vec<u64>,
    }

    impl Listable for Hit {
        fn id(&self) -> u64 {
            self.id
        }

        fn owner_id(&self) -> Option<UserId> {
            Some(self.owner)
        }

        fn tag_ids(&self) -> &[u64] {
            &self.tags
        }
    }

    fn hit(id: u64, owner: u64, tags: &[u64]) -> Hit {
        Hit {
            id,
            owner,
            tags: tags.to_vec(),
        }
    }

    #[test]
    fn hides_by_image_tag_and_owner_with_self_exemption() {
        let items = vec![
            hit(1, 10, &[]),
            hit(2, 11, &[77]),
            hit(3, 42, &[]),
            hit(4, 12, &[5]),
            hit(5, 13, &[]),
        ];
        let preferences = HiddenPreferences {
            hidden_image_ids: [1].into_iter().collect(),
            hidden_tag_ids: [77].into_iter().collect(),
            hidden_user_ids: [42].into_iter().collect(),
        };

        let outcome = apply_user_preferences(&items, &preferences, Some(42));

        let ids: Vec<u64> = outcome.visible.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![3, 4, 5]);
        assert_eq!(outcome.hidden_count, 2);
    }

    #[test]
    fn anonymous_viewer_gets_no_exemption() {
        let items = vec![hit(3, 42, &[])];
        let preferences = HiddenPreferences {
            hidden_user_ids: [42].into_iter().collect(),
            ..HiddenPreferences::default()
        };
        let outcome = apply_user_preferences(&items, &preferences, None);
        assert!(outcome.visible.is_empty());
        assert_eq!(outcome.hidden_count, 1);
    }

    #[test]
    fn filtering_is_deterministic() {
        let items = vec![hit(1, 1, &[2]), hit(2, 2, &[3]), hit(3, 3, &[])];
        let preferences = HiddenPreferences {
            hidden_tag_ids: [3].into_iter().collect(),
            ..HiddenPreferences::default()
        };
        let first = apply_user_preferences(&items, &preferences, Some(9));
        let second = apply_user_preferences(&items, &preferences, Some(9));
        assert_eq!(first, second);
        assert_eq!(first.hidden_count, 1);
    }
}
