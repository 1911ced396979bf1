use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ServiceError;
use crate::query::{Filter, Query};
use crate::traits::DataService;

/// Typed view of one table.
///
/// Rows are decoded into `T` on select; inserts and patches are encoded
/// from any `Serialize` payload.
pub struct Table<T> {
    service: Arc<dyn DataService>,
    name: &'static str,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            name: self.name,
            _phantom: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> Table<T> {
    pub fn new(service: Arc<dyn DataService>, name: &'static str) -> Self {
        Self {
            service,
            name,
            _phantom: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn select(&self, query: &Query) -> Result<Vec<T>, ServiceError> {
        let rows = self.service.select(self.name, query).await?;
        rows.into_iter()
            .map(|row| {
                serde_json::from_value::<T>(row)
                    .map_err(|e| ServiceError::Decode(format!("{} row: {}", self.name, e)))
            })
            .collect()
    }

    pub async fn insert<P: Serialize>(&self, rows: &[P]) -> Result<(), ServiceError> {
        let rows = rows
            .iter()
            .map(encode)
            .collect::<Result<Vec<Value>, ServiceError>>()?;
        self.service.insert(self.name, rows).await
    }

    pub async fn update<P: Serialize>(
        &self,
        patch: &P,
        filter: &Filter,
    ) -> Result<(), ServiceError> {
        self.service.update(self.name, encode(patch)?, filter).await
    }

    pub async fn delete(&self, filter: &Filter) -> Result<(), ServiceError> {
        self.service.delete(self.name, filter).await
    }
}

fn encode<P: Serialize>(payload: &P) -> Result<Value, ServiceError> {
    serde_json::to_value(payload).map_err(|e| ServiceError::Encode(e.to_string()))
}
