//! List page state: `categories/page`, `resources/page`, `resources/filter`.

use serde::Serialize;

use crate::model::Entity;

/// Everything a list page renders: rows, side data, the error banner and
/// the add/edit modal.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<E: Entity> {
    pub items: Vec<E>,
    pub lookup: E::Lookup,
    pub loading: bool,
    pub error: Option<String>,
    pub draft: E::Draft,
    /// `None` while creating.
    pub edit_target: Option<i64>,
    pub modal_open: bool,
}

impl<E: Entity> Default for ListState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            lookup: E::Lookup::default(),
            loading: false,
            error: None,
            draft: E::Draft::default(),
            edit_target: None,
            modal_open: false,
        }
    }
}

impl<E: Entity> ListState<E> {
    pub fn modal_title(&self) -> String {
        match self.edit_target {
            Some(_) => format!("Edit {}", E::LABEL),
            None => format!("Add {}", E::LABEL),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            "Saving..."
        } else {
            "Save"
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.loading
    }

    pub fn find(&self, id: i64) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }
}

/// Category selector on the resource page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(i64),
}

impl CategoryFilter {
    pub const PATH: &'static str = "resources/filter";

    pub fn admits(self, category_id: Option<i64>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(id) => category_id == Some(id),
        }
    }
}
