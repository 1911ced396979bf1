use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::topic;
use crate::value::{StateValue, SubscriptionId};

/// Callback type for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

/// Per-path state store with pattern-matched change subscriptions.
///
/// - `set(path, value)` stores a value and notifies matching subscribers.
/// - `get(path)` / `get_as::<T>(path)` read the current value.
/// - `subscribe(pattern, handler)` registers a change handler.
pub struct StateStore {
    /// Current values keyed by exact path. BTreeMap for ordered snapshots.
    values: RwLock<BTreeMap<String, StateValue>>,
    /// Registered subscriptions, in registration order.
    handlers: RwLock<Vec<HandlerEntry>>,
    next_id: AtomicU64,
}

#[derive(Clone)]
struct HandlerEntry {
    id: SubscriptionId,
    pattern: String,
    handler: ChangeHandler,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            handlers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Set a typed value at the given path and notify matching subscribers.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    /// Set a pre-built StateValue and notify matching subscribers.
    ///
    /// Subscribers run synchronously on the caller's thread, after the
    /// write lock is released, so a handler may read the store.
    pub fn set_value(&self, path: &str, value: StateValue) {
        {
            let mut values = self.values.write().unwrap();
            values.insert(path.to_string(), value.clone());
        }
        let matched: Vec<ChangeHandler> = {
            let handlers = self.handlers.read().unwrap();
            handlers
                .iter()
                .filter(|e| topic::matches(&e.pattern, path))
                .map(|e| Arc::clone(&e.handler))
                .collect()
        };
        for handler in matched {
            handler(path, &value);
        }
    }

    pub fn get(&self, path: &str) -> Option<StateValue> {
        let values = self.values.read().unwrap();
        values.get(path).cloned()
    }

    /// Read and clone the value at `path` as `T`.
    ///
    /// Returns `None` if the path is unset or holds a different type.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(|v| v.cloned::<T>())
    }

    /// Remove the value at `path`. Does NOT notify subscribers.
    pub fn remove(&self, path: &str) -> Option<StateValue> {
        let mut values = self.values.write().unwrap();
        values.remove(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        let values = self.values.read().unwrap();
        values.contains_key(path)
    }

    pub fn len(&self) -> usize {
        let values = self.values.read().unwrap();
        values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all entries, ordered by path.
    pub fn snapshot(&self) -> Vec<(String, StateValue)> {
        let values = self.values.read().unwrap();
        values.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Subscribe to changes on paths matching `pattern`.
    ///
    /// An invalid pattern (`#` not in last position) never matches.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        if !topic::is_valid_pattern(pattern) {
            warn!(pattern, "subscription pattern will never match");
        }
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut handlers = self.handlers.write().unwrap();
        handlers.push(HandlerEntry {
            id,
            pattern: pattern.to_string(),
            handler: Arc::new(handler),
        });
        id
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) {
        let mut handlers = self.handlers.write().unwrap();
        handlers.retain(|e| !(e.id == id && e.pattern == pattern));
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
