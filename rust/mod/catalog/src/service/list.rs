use std::future::Future;
use std::sync::{Arc, Mutex};

use catalog_client::{DataService, Filter, ServiceError, Table};
use catalog_flux::StateStore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::confirm::Confirm;
use crate::model::Entity;
use crate::service::filter;
use crate::service::search::SearchContext;
use crate::state::ListState;

/// Fetch/create/update/delete orchestration for one list page.
///
/// State lives in the Flux store at `E::STATE_PATH`; every operation reads
/// it, changes it and publishes it back. The full list is reloaded after
/// every mutation. Errors never escape: they land in `ListState::error`.
///
/// A controller is tied to its view through a cancellation token. After
/// `unmount` an in-flight request is dropped and nothing more is published
/// until the next `mount`.
pub struct ListController<E: Entity> {
    table: Table<E>,
    service: Arc<dyn DataService>,
    store: Arc<StateStore>,
    search: SearchContext,
    confirm: Arc<dyn Confirm>,
    cancel: Mutex<CancellationToken>,
}

impl<E: Entity> ListController<E> {
    pub fn new(
        service: Arc<dyn DataService>,
        store: Arc<StateStore>,
        search: SearchContext,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            table: Table::new(Arc::clone(&service), E::TABLE),
            service,
            store,
            search,
            confirm,
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    // ====================================================================
    // State
    // ====================================================================

    pub fn state(&self) -> ListState<E> {
        self.store.get_as(E::STATE_PATH).unwrap_or_default()
    }

    pub(crate) fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    pub(crate) fn table(&self) -> &Table<E> {
        &self.table
    }

    fn token(&self) -> CancellationToken {
        self.cancel.lock().unwrap().clone()
    }

    pub fn is_mounted(&self) -> bool {
        !self.token().is_cancelled()
    }

    fn publish(&self, state: ListState<E>) {
        if !self.is_mounted() {
            debug!(scope = E::SCOPE, "unmounted; state not published");
            return;
        }
        self.store.set(E::STATE_PATH, state);
    }

    fn update(&self, f: impl FnOnce(&mut ListState<E>)) {
        let mut state = self.state();
        f(&mut state);
        self.publish(state);
    }

    /// Run `fut` unless the view is unmounted first.
    async fn guarded<F: Future>(&self, fut: F) -> Option<F::Output> {
        let token = self.token();
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(scope = E::SCOPE, "request abandoned on unmount");
                None
            }
            out = fut => Some(out),
        }
    }

    // ====================================================================
    // Lifecycle
    // ====================================================================

    /// Show the page: fresh state, then the initial load.
    pub async fn mount(&self) {
        {
            let mut cancel = self.cancel.lock().unwrap();
            if cancel.is_cancelled() {
                *cancel = CancellationToken::new();
            }
        }
        E::reset_view(&self.store);
        self.publish(ListState::default());
        self.reload().await;
    }

    pub fn unmount(&self) {
        self.token().cancel();
    }

    // ====================================================================
    // Read path
    // ====================================================================

    /// Load all rows (and the entity's lookup data), clearing the banner.
    pub async fn reload(&self) {
        self.fetch(true).await;
    }

    /// The single read path. After a mutation the banner is kept so the
    /// mutation's error stays visible.
    pub(crate) async fn fetch(&self, clear_error: bool) {
        self.update(|s| {
            s.loading = true;
            if clear_error {
                s.error = None;
            }
        });

        let query = E::list_query();
        let loaded = self
            .guarded(async {
                let items = self.table.select(&query).await;
                let lookup = E::load_lookup(&self.service).await;
                (items, lookup)
            })
            .await;
        let Some((items, lookup)) = loaded else {
            return;
        };

        let mut state = self.state();
        let mut error = None;
        match items {
            Ok(items) => {
                debug!(scope = E::SCOPE, count = items.len(), "loaded");
                state.items = items;
            }
            Err(e) => {
                warn!(scope = E::SCOPE, error = %e, "load failed");
                error = Some(e.to_string());
            }
        }
        match lookup {
            Ok(lookup) => state.lookup = lookup,
            Err(e) => {
                warn!(scope = E::SCOPE, error = %e, "lookup load failed");
                error = error.or(Some(e.to_string()));
            }
        }
        if error.is_some() {
            state.error = error;
        }
        state.loading = false;
        self.publish(state);
    }

    /// Rows matching the search keyword.
    pub fn visible(&self) -> Vec<E> {
        filter::filter(&self.state().items, &self.search.keyword())
    }

    // ====================================================================
    // Modal
    // ====================================================================

    pub fn begin_create(&self) {
        self.update(|s| {
            s.draft = E::blank_draft(&s.lookup);
            s.edit_target = None;
            s.modal_open = true;
        });
    }

    pub fn begin_edit(&self, item: &E) {
        let draft = item.to_draft();
        let id = item.id();
        self.update(|s| {
            s.draft = draft;
            s.edit_target = Some(id);
            s.modal_open = true;
        });
    }

    /// Close the modal without saving.
    pub fn cancel(&self) {
        self.update(|s| {
            s.draft = E::blank_draft(&s.lookup);
            s.edit_target = None;
            s.modal_open = false;
        });
    }

    pub fn update_draft(&self, draft: E::Draft) {
        self.update(|s| s.draft = draft);
    }

    // ====================================================================
    // Mutations
    // ====================================================================

    /// Insert (create mode) or update (edit mode), then reload.
    ///
    /// A missing required field keeps the modal open. A service failure
    /// is shown in the banner; the modal still closes and the list still
    /// reloads.
    pub async fn submit(&self, draft: E::Draft) {
        if let Some(field) = E::missing_field(&draft) {
            self.update(|s| {
                s.draft = draft;
                s.error = Some(format!("{} is required.", field));
            });
            return;
        }

        let target = self.state().edit_target;
        self.update(|s| {
            s.draft = draft.clone();
            s.loading = true;
            s.error = None;
        });

        let result = self
            .guarded(async {
                match target {
                    Some(id) => self.table.update(&draft, &Filter::eq("id", id)).await,
                    None => self.table.insert(std::slice::from_ref(&draft)).await,
                }
            })
            .await;
        let Some(result) = result else {
            return;
        };

        match &result {
            Ok(()) => info!(scope = E::SCOPE, id = ?target, "saved"),
            Err(e) => warn!(scope = E::SCOPE, id = ?target, error = %e, "save failed"),
        }
        self.update(|s| {
            s.error = result.err().map(|e| e.to_string());
            s.modal_open = false;
            s.edit_target = None;
            s.draft = E::blank_draft(&s.lookup);
        });
        self.fetch(false).await;
    }

    /// Delete after confirmation, then reload. Returns whether the user
    /// confirmed.
    pub async fn remove(&self, id: i64) -> bool {
        let prompt = format!(
            "Are you sure you want to delete this {}?",
            E::LABEL.to_lowercase()
        );
        if !self.confirm.confirm(&prompt) {
            debug!(scope = E::SCOPE, id, "delete declined");
            return false;
        }

        let result = self.run(self.table.delete(&Filter::eq("id", id))).await;
        if let Some(Ok(())) = result {
            info!(scope = E::SCOPE, id, "deleted");
        }
        self.finish_mutation(result).await;
        true
    }

    /// Start a mutation: busy, banner cleared, request guarded.
    pub(crate) async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        self.update(|s| {
            s.loading = true;
            s.error = None;
        });
        self.guarded(fut).await
    }

    /// Record a mutation's outcome, then reload keeping the banner.
    pub(crate) async fn finish_mutation(&self, result: Option<Result<(), ServiceError>>) {
        let Some(result) = result else {
            return;
        };
        if let Err(e) = result {
            warn!(scope = E::SCOPE, error = %e, "mutation failed");
            self.update(|s| s.error = Some(e.to_string()));
        }
        self.fetch(false).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::{AlwaysConfirm, NeverConfirm};
    use crate::model::{Category, CategoryDraft, CategoryOption, Resource};
    use async_trait::async_trait;
    use catalog_client::{MemoryService, Query};
    use serde_json::{json, Value};
    use tokio::sync::Notify;

    struct Fixture {
        svc: Arc<MemoryService>,
        store: Arc<StateStore>,
        search: SearchContext,
    }

    impl Fixture {
        fn new() -> Self {
            let store = Arc::new(StateStore::new());
            Self {
                svc: Arc::new(MemoryService::new()),
                search: SearchContext::new(store.clone()),
                store,
            }
        }

        fn controller<E: Entity>(&self, confirm: Arc<dyn Confirm>) -> ListController<E> {
            ListController::new(
                self.svc.clone() as Arc<dyn DataService>,
                self.store.clone(),
                self.search.clone(),
                confirm,
            )
        }

        fn seed_categories(&self) {
            self.svc.seed(
                "categories",
                vec![
                    json!({
                        "id": 2, "name": "Icons", "slug": "icons",
                        "is_active": true, "created_at": "t2"
                    }),
                    json!({
                        "id": 1, "name": "Fonts", "slug": "fonts",
                        "is_active": false, "created_at": "t1"
                    }),
                ],
            );
        }
    }

    fn draft(name: &str, slug: &str) -> CategoryDraft {
        CategoryDraft {
            name: name.into(),
            slug: slug.into(),
            is_active: true,
        }
    }

    fn ids<E: Entity>(items: &[E]) -> Vec<i64> {
        items.iter().map(Entity::id).collect()
    }

    #[tokio::test]
    async fn mount_loads_categories_ordered_by_id() {
        let fx = Fixture::new();
        fx.seed_categories();
        let page = fx.controller::<Category>(Arc::new(AlwaysConfirm));

        page.mount().await;

        let s = page.state();
        assert_eq!(ids(&s.items), vec![1, 2]);
        assert!(!s.loading);
        assert_eq!(s.error, None);
        assert!(fx.store.contains("categories/page"));
    }

    #[tokio::test]
    async fn reload_twice_is_idempotent() {
        let fx = Fixture::new();
        fx.seed_categories();
        let page = fx.controller::<Category>(Arc::new(AlwaysConfirm));

        page.reload().await;
        let first = page.state();
        page.reload().await;
        assert_eq!(page.state(), first);
    }

    #[tokio::test]
    async fn reload_failure_keeps_items_and_sets_error() {
        let fx = Fixture::new();
        fx.seed_categories();
        let page = fx.controller::<Category>(Arc::new(AlwaysConfirm));
        page.reload().await;

        fx.svc.fail_with("connection refused");
        page.reload().await;

        let s = page.state();
        assert_eq!(ids(&s.items), vec![1, 2]);
        assert_eq!(s.error.as_deref(), Some("connection refused"));
        assert!(!s.loading);

        fx.svc.clear_failure();
        page.reload().await;
        assert_eq!(page.state().error, None);
    }

    #[tokio::test]
    async fn reload_success_with_no_rows_empties_list() {
        let fx = Fixture::new();
        fx.seed_categories();
        let page = fx.controller::<Category>(Arc::new(AlwaysConfirm));
        page.reload().await;

        fx.svc.delete("categories", &Filter::eq("id", 1)).await.unwrap();
        fx.svc.delete("categories", &Filter::eq("id", 2)).await.unwrap();
        page.reload().await;
        assert!(page.state().items.is_empty());
    }

    #[tokio::test]
    async fn create_adds_exactly_one_matching_row() {
        let fx = Fixture::new();
        fx.seed_categories();
        let page = fx.controller::<Category>(Arc::new(AlwaysConfirm));
        page.mount().await;
        let before = page.state().items.len();

        page.begin_create();
        assert!(page.state().modal_open);
        page.submit(draft("Templates", "templates")).await;

        let s = page.state();
        assert_eq!(s.items.len(), before + 1);
        assert!(s
            .items
            .iter()
            .any(|c| c.name == "Templates" && c.slug == "templates" && c.is_active));
        assert!(!s.modal_open);
        assert_eq!(s.draft, CategoryDraft::default());
        assert_eq!(s.error, None);
    }

    #[tokio::test]
    async fn edit_updates_only_the_target_row() {
        let fx = Fixture::new();
        fx.seed_categories();
        let page = fx.controller::<Category>(Arc::new(AlwaysConfirm));
        page.mount().await;
        let before = page.state().items;

        let icons = page.state().find(2).cloned().unwrap();
        page.begin_edit(&icons);
        let s = page.state();
        assert_eq!(s.edit_target, Some(2));
        assert_eq!(s.draft, draft("Icons", "icons"));
        assert_eq!(s.modal_title(), "Edit Category");

        let mut edited = s.draft.clone();
        edited.name = "Icon Sets".into();
        edited.is_active = false;
        page.submit(edited).await;

        let after = page.state().items;
        let row = after.iter().find(|c| c.id == 2).unwrap();
        assert_eq!(
            (row.name.as_str(), row.slug.as_str(), row.is_active),
            ("Icon Sets", "icons", false)
        );
        assert_eq!(
            after.iter().find(|c| c.id == 1),
            before.iter().find(|c| c.id == 1)
        );
        assert_eq!(page.state().edit_target, None);
    }

    #[tokio::test]
    async fn missing_required_field_blocks_submit() {
        let fx = Fixture::new();
        let page = fx.controller::<Category>(Arc::new(AlwaysConfirm));
        page.mount().await;
        page.begin_create();

        page.submit(draft("Templates", "")).await;

        let s = page.state();
        assert!(s.modal_open);
        assert_eq!(s.error.as_deref(), Some("Slug is required."));
        assert!(fx.svc.rows("categories").is_empty());
    }

    #[tokio::test]
    async fn whitespace_name_is_saved() {
        let fx = Fixture::new();
        let page = fx.controller::<Category>(Arc::new(AlwaysConfirm));
        page.mount().await;
        page.begin_create();

        page.submit(draft("  ", "blank")).await;

        let s = page.state();
        assert!(!s.modal_open);
        assert_eq!(s.error, None);
        assert_eq!(s.items.len(), 1);
        assert_eq!(s.items[0].name, "  ");
    }

    #[tokio::test]
    async fn failed_submit_still_closes_and_reloads() {
        let fx = Fixture::new();
        fx.seed_categories();
        let page = fx.controller::<Category>(Arc::new(AlwaysConfirm));
        page.mount().await;
        page.begin_create();

        fx.svc.fail_with("duplicate key value violates unique constraint");
        page.submit(draft("Icons", "icons")).await;

        let s = page.state();
        assert!(!s.modal_open);
        assert!(!s.loading);
        assert_eq!(
            s.error.as_deref(),
            Some("duplicate key value violates unique constraint")
        );
        assert_eq!(ids(&s.items), vec![1, 2]);
    }

    #[tokio::test]
    async fn mutation_error_survives_the_follow_up_reload() {
        struct RejectInsert(MemoryService);

        #[async_trait]
        impl DataService for RejectInsert {
            async fn select(&self, t: &str, q: &Query) -> Result<Vec<Value>, ServiceError> {
                self.0.select(t, q).await
            }
            async fn insert(&self, _: &str, _: Vec<Value>) -> Result<(), ServiceError> {
                Err(ServiceError::server(409, "slug already exists"))
            }
            async fn update(&self, t: &str, p: Value, f: &Filter) -> Result<(), ServiceError> {
                self.0.update(t, p, f).await
            }
            async fn delete(&self, t: &str, f: &Filter) -> Result<(), ServiceError> {
                self.0.delete(t, f).await
            }
        }

        let store = Arc::new(StateStore::new());
        let page = ListController::<Category>::new(
            Arc::new(RejectInsert(MemoryService::new())),
            store.clone(),
            SearchContext::new(store),
            Arc::new(AlwaysConfirm),
        );
        page.mount().await;
        page.submit(draft("Icons", "icons")).await;

        let s = page.state();
        assert_eq!(s.error.as_deref(), Some("slug already exists"));
        assert!(!s.loading);
    }

    #[tokio::test]
    async fn declined_delete_is_a_no_op() {
        let fx = Fixture::new();
        fx.seed_categories();
        let page = fx.controller::<Category>(Arc::new(NeverConfirm));
        page.mount().await;

        assert!(!page.remove(1).await);
        assert_eq!(ids(&page.state().items), vec![1, 2]);
        assert_eq!(fx.svc.rows("categories").len(), 2);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_row() {
        let fx = Fixture::new();
        fx.seed_categories();
        let page = fx.controller::<Category>(Arc::new(AlwaysConfirm));
        page.mount().await;

        assert!(page.remove(1).await);
        assert_eq!(ids(&page.state().items), vec![2]);
    }

    #[tokio::test]
    async fn delete_prompt_names_the_entity() {
        struct Recorder(Mutex<Vec<String>>);
        impl Confirm for Recorder {
            fn confirm(&self, message: &str) -> bool {
                self.0.lock().unwrap().push(message.to_string());
                false
            }
        }

        let fx = Fixture::new();
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        fx.controller::<Category>(recorder.clone()).remove(1).await;
        fx.controller::<Resource>(recorder.clone()).remove(1).await;
        assert_eq!(
            *recorder.0.lock().unwrap(),
            vec![
                "Are you sure you want to delete this category?".to_string(),
                "Are you sure you want to delete this resource?".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn visible_applies_shared_keyword() {
        let fx = Fixture::new();
        fx.seed_categories();
        let page = fx.controller::<Category>(Arc::new(AlwaysConfirm));
        page.mount().await;

        fx.search.set("FON");
        assert_eq!(ids(&page.visible()), vec![1]);
        fx.search.set("");
        assert_eq!(ids(&page.visible()), vec![1, 2]);
    }

    #[tokio::test]
    async fn cancel_resets_modal() {
        let fx = Fixture::new();
        fx.seed_categories();
        let page = fx.controller::<Category>(Arc::new(AlwaysConfirm));
        page.mount().await;
        let icons = page.state().find(2).cloned().unwrap();
        page.begin_edit(&icons);

        page.cancel();

        let s = page.state();
        assert!(!s.modal_open);
        assert_eq!(s.edit_target, None);
        assert_eq!(s.draft, CategoryDraft::default());
        assert_eq!(fx.svc.rows("categories").len(), 2);
    }

    #[tokio::test]
    async fn resource_page_loads_category_options() {
        let fx = Fixture::new();
        fx.seed_categories();
        fx.svc.seed("resources", vec![json!({"id": 7, "title": "Kit", "category_id": 2})]);
        let page = fx.controller::<Resource>(Arc::new(AlwaysConfirm));
        page.mount().await;

        let s = page.state();
        assert_eq!(ids(&s.items), vec![7]);
        assert_eq!(
            s.lookup,
            vec![
                CategoryOption { id: 2, name: "Icons".into() },
                CategoryOption { id: 1, name: "Fonts".into() },
            ]
        );
        page.begin_create();
        assert_eq!(page.state().draft.category_id, Some(2));

        page.cancel();
        assert_eq!(page.state().draft.category_id, Some(2));

        let mut kit = page.state().draft;
        kit.title = "Brush Kit".into();
        page.submit(kit).await;
        let s = page.state();
        assert_eq!(s.draft.category_id, Some(2));
        assert_eq!(s.draft.title, "");
    }

    #[tokio::test]
    async fn null_active_flag_does_not_break_the_list() {
        let fx = Fixture::new();
        fx.seed_categories();
        fx.svc.seed(
            "resources",
            vec![
                json!({"id": 1, "title": "A", "is_active": true, "category_id": 2}),
                json!({"id": 2, "title": "B", "is_active": null, "created_at": null}),
            ],
        );
        let page = fx.controller::<Resource>(Arc::new(AlwaysConfirm));
        page.mount().await;

        let s = page.state();
        assert_eq!(s.error, None);
        assert_eq!(ids(&s.items), vec![1, 2]);
        assert!(s.find(2).unwrap().is_active);
    }

    #[tokio::test]
    async fn nothing_published_after_unmount() {
        let fx = Fixture::new();
        fx.seed_categories();
        let page = fx.controller::<Category>(Arc::new(AlwaysConfirm));
        page.mount().await;
        let before = page.state();

        page.unmount();
        fx.svc.seed("categories", vec![json!({"id": 3, "name": "Motions", "slug": "motions"})]);
        page.reload().await;
        page.begin_create();

        assert_eq!(page.state(), before);
        assert!(!page.is_mounted());

        page.mount().await;
        assert_eq!(ids(&page.state().items), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn in_flight_load_abandoned_on_unmount() {
        struct Stall {
            entered: Notify,
        }

        #[async_trait]
        impl DataService for Stall {
            async fn select(&self, _: &str, _: &Query) -> Result<Vec<Value>, ServiceError> {
                self.entered.notify_one();
                std::future::pending().await
            }
            async fn insert(&self, _: &str, _: Vec<Value>) -> Result<(), ServiceError> {
                Ok(())
            }
            async fn update(&self, _: &str, _: Value, _: &Filter) -> Result<(), ServiceError> {
                Ok(())
            }
            async fn delete(&self, _: &str, _: &Filter) -> Result<(), ServiceError> {
                Ok(())
            }
        }

        let store = Arc::new(StateStore::new());
        let service = Arc::new(Stall { entered: Notify::new() });
        let page = Arc::new(ListController::<Category>::new(
            service.clone(),
            store.clone(),
            SearchContext::new(store),
            Arc::new(AlwaysConfirm),
        ));

        let task = {
            let page = page.clone();
            tokio::spawn(async move { page.reload().await })
        };
        service.entered.notified().await;
        page.unmount();
        task.await.unwrap();

        assert!(page.state().loading);
        assert!(page.state().items.is_empty());
    }
}
