use tracing::info;

use crate::model::{Category, CategoryDraft};
use crate::service::list::ListController;

/// Built-in categories offered by "Import defaults", as (name, slug).
pub const DEFAULT_CATEGORIES: [(&str, &str); 14] = [
    ("Website UI Kit", "website-ui-kit"),
    ("Mobile UI Kit", "mobile-ui-kit"),
    ("Dashboard UI Kit", "dashboard-ui-kit"),
    ("Device Mockup", "device-mockup"),
    ("Icons", "icons"),
    ("Templates", "templates"),
    ("Presentations", "presentations"),
    ("Fonts", "fonts"),
    ("Illustrations", "illustrations"),
    ("3D Assets", "3d-assets"),
    ("Branding Mockup", "branding-mockup"),
    ("Social Media", "social-media"),
    ("Motions", "motions"),
    ("Web Design Inspiration", "web-design-inspiration"),
];

impl ListController<Category> {
    /// Insert every default category in one request, then reload.
    pub async fn import_defaults(&self) {
        let rows: Vec<CategoryDraft> = DEFAULT_CATEGORIES
            .iter()
            .map(|(name, slug)| CategoryDraft {
                name: name.to_string(),
                slug: slug.to_string(),
                is_active: true,
            })
            .collect();
        let result = self.run(self.table().insert(&rows)).await;
        if let Some(Ok(())) = result {
            info!(count = rows.len(), "default categories imported");
        }
        self.finish_mutation(result).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use catalog_client::{DataService, MemoryService};
    use catalog_flux::StateStore;

    use crate::confirm::AlwaysConfirm;
    use crate::service::search::SearchContext;

    fn page(svc: &Arc<MemoryService>) -> ListController<Category> {
        let store = Arc::new(StateStore::new());
        ListController::new(
            svc.clone() as Arc<dyn DataService>,
            store.clone(),
            SearchContext::new(store),
            Arc::new(AlwaysConfirm),
        )
    }

    #[tokio::test]
    async fn import_adds_fourteen_active_categories() {
        let svc = Arc::new(MemoryService::new());
        let page = page(&svc);
        page.mount().await;

        page.import_defaults().await;

        let s = page.state();
        assert_eq!(s.items.len(), 14);
        assert_eq!(s.items[0].name, "Website UI Kit");
        assert_eq!(s.items[9].slug, "3d-assets");
        assert!(s.items.iter().all(|c| c.is_active));
        assert_eq!(s.error, None);
    }

    #[tokio::test]
    async fn import_failure_shows_banner() {
        let svc = Arc::new(MemoryService::new());
        let page = page(&svc);
        page.mount().await;

        svc.fail_with("permission denied for table categories");
        page.import_defaults().await;

        let s = page.state();
        assert_eq!(s.error.as_deref(), Some("permission denied for table categories"));
        assert!(s.items.is_empty());
        assert!(!s.loading);
    }

    #[test]
    fn default_slugs_are_kebab_case() {
        for (name, slug) in DEFAULT_CATEGORIES {
            assert_eq!(slug, name.to_lowercase().replace(' ', "-"));
        }
    }
}
