use serde_json::Value;
use tracing::debug;

use crate::error::ServiceError;
use crate::query::{Filter, Query};
use crate::traits::DataService;

/// PostgREST-dialect HTTP client (`{base_url}/rest/v1/{table}`).
///
/// Every request carries the project key both as `apikey` and as a
/// bearer token, the way hosted PostgREST gateways expect.
pub struct RestService {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestService {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Collection URL for a table.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Map a non-2xx response to `ServiceError::Server`.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let code = status.as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(ServiceError::server(code, error_message(code, &body)))
    }
}

/// Extract the human-readable message from an error body.
///
/// PostgREST returns `{"message": ...}`; auth gateways use `error` /
/// `error_description`. Anything else is passed through as text.
pub fn error_message(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error_description", "error", "msg"] {
            if let Some(msg) = json.get(key).and_then(Value::as_str) {
                return msg.to_string();
            }
        }
    }
    let text = body.trim();
    if text.is_empty() {
        format!("HTTP {}", status)
    } else {
        text.to_string()
    }
}

#[async_trait::async_trait]
impl DataService for RestService {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, ServiceError> {
        let params = query.to_params();
        debug!(table, ?params, "select");
        let req = self.authed(self.http.get(self.table_url(table)).query(&params));
        let resp = Self::check(req.send().await?).await?;
        resp.json::<Vec<Value>>()
            .await
            .map_err(|e| ServiceError::Decode(format!("{} rows: {}", table, e)))
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<(), ServiceError> {
        debug!(table, count = rows.len(), "insert");
        let req = self.authed(
            self.http
                .post(self.table_url(table))
                .header("Prefer", "return=minimal")
                .json(&rows),
        );
        Self::check(req.send().await?).await?;
        Ok(())
    }

    async fn update(&self, table: &str, patch: Value, filter: &Filter) -> Result<(), ServiceError> {
        debug!(table, column = %filter.column, "update");
        let req = self.authed(
            self.http
                .patch(self.table_url(table))
                .query(&[filter.to_param()])
                .header("Prefer", "return=minimal")
                .json(&patch),
        );
        Self::check(req.send().await?).await?;
        Ok(())
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<(), ServiceError> {
        debug!(table, column = %filter.column, "delete");
        let req = self.authed(
            self.http
                .delete(self.table_url(table))
                .query(&[filter.to_param()]),
        );
        Self::check(req.send().await?).await?;
        Ok(())
    }
}
