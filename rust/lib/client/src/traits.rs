use serde_json::Value;

use crate::error::ServiceError;
use crate::query::{Filter, Query};

/// DataService is the remote, table-oriented database contract.
///
/// Rows travel as JSON objects. Ids and `created_at` are assigned by the
/// service on insert; callers never send them.
#[async_trait::async_trait]
pub trait DataService: Send + Sync + 'static {
    /// Select rows from `table`.
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, ServiceError>;

    /// Insert one or more rows into `table`.
    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<(), ServiceError>;

    /// Apply `patch` to every row matching `filter`.
    async fn update(&self, table: &str, patch: Value, filter: &Filter) -> Result<(), ServiceError>;

    /// Delete every row matching `filter`.
    async fn delete(&self, table: &str, filter: &Filter) -> Result<(), ServiceError>;
}
