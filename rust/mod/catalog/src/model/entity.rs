use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use catalog_client::{DataService, Query, ServiceError, Table};
use catalog_flux::StateStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Category, CategoryDraft, CategoryOption, Resource, ResourceDraft};
use crate::state::CategoryFilter;

/// A table managed by a list page.
///
/// Each entity names its table, its page scope and state path, how its
/// draft is built and validated, and which fields the keyword search
/// looks at. `Lookup` is side data loaded alongside the rows.
#[async_trait]
pub trait Entity:
    DeserializeOwned + Serialize + Clone + PartialEq + Debug + Send + Sync + 'static
{
    type Draft: Serialize + Clone + Default + PartialEq + Debug + Send + Sync + 'static;
    type Lookup: Clone + Default + PartialEq + Debug + Send + Sync + 'static;

    const TABLE: &'static str;
    const COLUMNS: &'static str;
    /// Singular display name, e.g. `Category`.
    const LABEL: &'static str;
    /// Request/state prefix, e.g. `categories`.
    const SCOPE: &'static str;
    const STATE_PATH: &'static str;

    fn id(&self) -> i64;

    fn to_draft(&self) -> Self::Draft;

    /// Draft for a new row.
    fn blank_draft(_lookup: &Self::Lookup) -> Self::Draft {
        Self::Draft::default()
    }

    /// Label of the first empty required field.
    fn missing_field(draft: &Self::Draft) -> Option<&'static str>;

    fn search_fields(&self) -> Vec<&str>;

    fn list_query() -> Query {
        Query::select(Self::COLUMNS)
    }

    async fn load_lookup(_service: &Arc<dyn DataService>) -> Result<Self::Lookup, ServiceError> {
        Ok(Self::Lookup::default())
    }

    /// Reset page-local selectors kept outside the page state.
    fn reset_view(_store: &StateStore) {}
}

#[async_trait]
impl Entity for Category {
    type Draft = CategoryDraft;
    type Lookup = ();

    const TABLE: &'static str = "categories";
    const COLUMNS: &'static str = "id, name, slug, is_active, created_at";
    const LABEL: &'static str = "Category";
    const SCOPE: &'static str = "categories";
    const STATE_PATH: &'static str = "categories/page";

    fn id(&self) -> i64 {
        self.id
    }

    fn to_draft(&self) -> CategoryDraft {
        CategoryDraft::from(self)
    }

    fn missing_field(draft: &CategoryDraft) -> Option<&'static str> {
        if draft.name.is_empty() {
            Some("Name")
        } else if draft.slug.is_empty() {
            Some("Slug")
        } else {
            None
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.slug.as_str()]
    }

    fn list_query() -> Query {
        Query::select(Self::COLUMNS).order_asc("id")
    }
}

#[async_trait]
impl Entity for Resource {
    type Draft = ResourceDraft;
    type Lookup = Vec<CategoryOption>;

    const TABLE: &'static str = "resources";
    const COLUMNS: &'static str = "id, title, author, platform, image, overview, \
        category_id, compatibility, description, is_active, created_at, download_link";
    const LABEL: &'static str = "Resource";
    const SCOPE: &'static str = "resources";
    const STATE_PATH: &'static str = "resources/page";

    fn id(&self) -> i64 {
        self.id
    }

    fn to_draft(&self) -> ResourceDraft {
        ResourceDraft::from(self)
    }

    fn blank_draft(categories: &Vec<CategoryOption>) -> ResourceDraft {
        ResourceDraft::blank(categories)
    }

    fn missing_field(draft: &ResourceDraft) -> Option<&'static str> {
        draft.title.is_empty().then_some("Title")
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.author.as_str(),
            self.platform.as_str(),
            self.overview.as_str(),
            self.description.as_str(),
        ]
    }

    async fn load_lookup(
        service: &Arc<dyn DataService>,
    ) -> Result<Vec<CategoryOption>, ServiceError> {
        Table::<CategoryOption>::new(Arc::clone(service), Category::TABLE)
            .select(&Query::select("id, name"))
            .await
    }

    fn reset_view(store: &StateStore) {
        store.set(CategoryFilter::PATH, CategoryFilter::All);
    }
}
