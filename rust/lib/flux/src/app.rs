use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use crate::router::Router;
use crate::store::StateStore;
use crate::value::{StateValue, SubscriptionId};

/// Flux: the state engine handle shared by controllers and renderers.
///
/// ```ignore
/// let flux = Flux::new();
/// flux.on("app/open", |_, _, store| async move {
///     store.set("app/route", "/login".to_string());
/// });
/// flux.emit("app/open", ()).await;
/// ```
pub struct Flux {
    store: Arc<StateStore>,
    router: Router,
}

impl Flux {
    pub fn new() -> Self {
        Self::with_store(Arc::new(StateStore::new()))
    }

    /// Build a Flux around an existing store (shared with controllers).
    pub fn with_store(store: Arc<StateStore>) -> Self {
        Self {
            store,
            router: Router::new(),
        }
    }

    // ====================================================================
    // State
    // ====================================================================

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.store.get(path)
    }

    /// Read and clone the state at `path` as `T`.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.store.get_as(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.store.contains(path)
    }

    // ====================================================================
    // Requests
    // ====================================================================

    /// Emit a request and wait for all matching handlers to complete.
    pub async fn emit<T: Any + Send + Sync>(&self, path: &str, payload: T) {
        self.router
            .dispatch(path, Arc::new(payload), Arc::clone(&self.store))
            .await;
    }

    /// Register an async request handler for a path pattern.
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Arc<dyn Any + Send + Sync>, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.router.on(pattern, handler);
    }

    pub fn has_handler(&self, path: &str) -> bool {
        self.router.matches(path)
    }

    // ====================================================================
    // Subscriptions
    // ====================================================================

    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        self.store.subscribe(pattern, handler)
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) {
        self.store.unsubscribe(pattern, id);
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }
}

impl Default for Flux {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn emit_handler_subscribe_roundtrip() {
        let flux = Flux::new();
        flux.on("app/open", |_, _, store| async move {
            store.set("app/route", "/login".to_string());
        });

        let routes = Arc::new(Mutex::new(Vec::new()));
        let r = routes.clone();
        flux.subscribe("app/#", move |_, v| {
            r.lock().unwrap().push(v.cloned::<String>().unwrap_or_default());
        });

        flux.emit("app/open", ()).await;

        assert_eq!(flux.get_as::<String>("app/route").as_deref(), Some("/login"));
        assert_eq!(*routes.lock().unwrap(), vec!["/login".to_string()]);
    }

    #[tokio::test]
    async fn with_store_shares_state() {
        let store = Arc::new(StateStore::new());
        store.set("search/keyword", "icons".to_string());
        let flux = Flux::with_store(store.clone());

        assert!(flux.contains("search/keyword"));
        assert!(Arc::ptr_eq(flux.store(), &store));
    }

    #[tokio::test]
    async fn emit_without_handler_leaves_state_untouched() {
        let flux = Flux::new();
        flux.emit("nothing/here", 1u32).await;
        assert!(flux.store().is_empty());
        assert!(!flux.has_handler("nothing/here"));
    }
}
