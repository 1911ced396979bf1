use std::sync::Arc;

use catalog_flux::StateStore;
use tracing::debug;

use crate::state::SearchKeyword;

/// Shared keyword read by every list page.
///
/// One writer (the search input), many readers; reads are snapshots of
/// `search/keyword`.
#[derive(Clone)]
pub struct SearchContext {
    store: Arc<StateStore>,
}

impl SearchContext {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }

    pub fn keyword(&self) -> String {
        self.store
            .get_as::<SearchKeyword>(SearchKeyword::PATH)
            .map(|k| k.0)
            .unwrap_or_default()
    }

    pub fn set(&self, keyword: impl Into<String>) {
        let keyword = keyword.into();
        debug!(%keyword, "search keyword");
        self.store.set(SearchKeyword::PATH, SearchKeyword(keyword));
    }
}
