use serde::{Deserialize, Serialize};

use super::{default_true, null_as_default, null_as_true};

/// A row of the `categories` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Assigned by the service on insert.
    pub id: i64,
    pub name: String,
    /// Expected unique; not checked client-side.
    pub slug: String,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub is_active: bool,
    /// Server timestamp, shown verbatim.
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

/// Editable fields of a category (the add/edit form).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: String,
    pub is_active: bool,
}

impl Default for CategoryDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: String::new(),
            is_active: true,
        }
    }
}

impl From<&Category> for CategoryDraft {
    fn from(c: &Category) -> Self {
        Self {
            name: c.name.clone(),
            slug: c.slug.clone(),
            is_active: c.is_active,
        }
    }
}

/// `categories(id, name)` projection used by the resource page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub id: i64,
    pub name: String,
}
