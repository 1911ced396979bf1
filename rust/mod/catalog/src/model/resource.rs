use serde::{Deserialize, Serialize};

use super::{default_true, null_as_default, null_as_true, CategoryOption};

/// A row of the `resources` table.
///
/// Optional text columns decode `null` as `""`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platform: String,
    /// Image URL.
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub compatibility: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub download_link: String,
}

impl Resource {
    /// Name of the referenced category, or `-` when it is not loaded.
    pub fn category_name<'a>(&self, categories: &'a [CategoryOption]) -> &'a str {
        self.category_id
            .and_then(|id| categories.iter().find(|c| c.id == id))
            .map(|c| c.name.as_str())
            .unwrap_or("-")
    }

    /// Image cell: the URL when it is an http(s) link, else `-`.
    pub fn image_cell(&self) -> &str {
        if self.image.starts_with("http") {
            &self.image
        } else {
            "-"
        }
    }

    /// Download cell: `Download` when a link is set, else `-`.
    pub fn download_cell(&self) -> &'static str {
        if self.download_link.is_empty() {
            "-"
        } else {
            "Download"
        }
    }
}

/// Editable fields of a resource (the add/edit form).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDraft {
    pub title: String,
    pub author: String,
    pub platform: String,
    pub image: String,
    pub overview: String,
    pub category_id: Option<i64>,
    pub compatibility: String,
    pub description: String,
    pub is_active: bool,
    pub download_link: String,
}

impl ResourceDraft {
    /// Empty form, pre-selecting the first available category.
    pub fn blank(categories: &[CategoryOption]) -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            platform: String::new(),
            image: String::new(),
            overview: String::new(),
            category_id: categories.first().map(|c| c.id),
            compatibility: String::new(),
            description: String::new(),
            is_active: true,
            download_link: String::new(),
        }
    }
}

impl Default for ResourceDraft {
    fn default() -> Self {
        Self::blank(&[])
    }
}

impl From<&Resource> for ResourceDraft {
    fn from(r: &Resource) -> Self {
        Self {
            title: r.title.clone(),
            author: r.author.clone(),
            platform: r.platform.clone(),
            image: r.image.clone(),
            overview: r.overview.clone(),
            category_id: r.category_id,
            compatibility: r.compatibility.clone(),
            description: r.description.clone(),
            is_active: r.is_active,
            download_link: r.download_link.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options() -> Vec<CategoryOption> {
        vec![
            CategoryOption { id: 3, name: "Icons".into() },
            CategoryOption { id: 9, name: "Fonts".into() },
        ]
    }

    #[test]
    fn null_text_columns_decode_empty() {
        let row = json!({
            "id": 1, "title": "Kit", "author": null, "platform": "Figma",
            "image": null, "overview": null, "category_id": null,
            "compatibility": null, "description": null, "is_active": true,
            "created_at": "2025-01-01T00:00:00Z", "download_link": null
        });
        let r: Resource = serde_json::from_value(row).unwrap();
        assert_eq!(r.author, "");
        assert_eq!(r.platform, "Figma");
        assert_eq!(r.download_link, "");
        assert_eq!(r.category_id, None);
    }

    #[test]
    fn null_flag_decodes_active() {
        let r: Resource =
            serde_json::from_value(json!({"id": 2, "title": "B", "is_active": null})).unwrap();
        assert!(r.is_active);
    }

    #[test]
    fn category_name_falls_back_to_dash() {
        let r: Resource =
            serde_json::from_value(json!({"id": 1, "title": "Kit", "category_id": 9})).unwrap();
        assert_eq!(r.category_name(&options()), "Fonts");

        let orphan = Resource { category_id: Some(42), ..r.clone() };
        assert_eq!(orphan.category_name(&options()), "-");
        let unset = Resource { category_id: None, ..r };
        assert_eq!(unset.category_name(&options()), "-");
    }

    #[test]
    fn display_cells() {
        let mut r: Resource = serde_json::from_value(json!({"id": 1, "title": "Kit"})).unwrap();
        assert_eq!(r.image_cell(), "-");
        assert_eq!(r.download_cell(), "-");

        r.image = "https://cdn.example.com/kit.png".into();
        r.download_link = "https://example.com/kit.zip".into();
        assert_eq!(r.image_cell(), "https://cdn.example.com/kit.png");
        assert_eq!(r.download_cell(), "Download");

        r.image = "/local/kit.png".into();
        assert_eq!(r.image_cell(), "-");
    }

    #[test]
    fn blank_draft_selects_first_category() {
        assert_eq!(ResourceDraft::blank(&options()).category_id, Some(3));
        assert_eq!(ResourceDraft::default().category_id, None);
        assert!(ResourceDraft::default().is_active);
    }

    #[test]
    fn draft_serializes_category_as_number() {
        let mut d = ResourceDraft::blank(&options());
        d.title = "Kit".into();
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["category_id"], 3);
        assert_eq!(v["title"], "Kit");
        assert!(v.get("id").is_none());
    }
}
