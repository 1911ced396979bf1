//! Keyword filtering of loaded rows.

use crate::model::Entity;

/// Case-insensitive substring match against any of the entity's search fields.
/// An empty keyword matches everything.
pub fn matches<E: Entity>(item: &E, keyword: &str) -> bool {
    if keyword.is_empty() {
        return true;
    }
    let needle = keyword.to_lowercase();
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub fn filter<E: Entity>(items: &[E], keyword: &str) -> Vec<E> {
    items
        .iter()
        .filter(|item| matches(*item, keyword))
        .cloned()
        .collect()
}
