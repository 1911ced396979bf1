//! Rows of the remote tables and their editable drafts.

pub mod category;
pub mod entity;
pub mod resource;
pub mod user;

pub use category::{Category, CategoryDraft, CategoryOption};
pub use entity::Entity;
pub use resource::{Resource, ResourceDraft};
pub use user::{SessionUser, User};

use serde::{Deserialize, Deserializer};

pub(crate) fn default_true() -> bool {
    true
}

/// Decode a nullable flag, treating `null` like a missing column.
pub(crate) fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|v| v.unwrap_or(true))
}

/// Decode a nullable column as the type's default (`""`, `false`).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Table label for the `is_active` flag.
pub fn status_label(is_active: bool) -> &'static str {
    if is_active {
        "Active"
    } else {
        "Inactive"
    }
}
