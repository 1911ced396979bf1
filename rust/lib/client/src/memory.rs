use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::RwLock;

use serde_json::{Map, Value};

use crate::error::ServiceError;
use crate::query::{Direction, Filter, Query};
use crate::traits::DataService;

/// In-process DataService.
///
/// Tables are created on first use. Inserts get a sequential integer `id`
/// and an RFC 3339 `created_at`, like a hosted table with serial/default
/// columns. Selects without an order return insertion order.
///
/// `fail_with` makes every subsequent call fail with a server error until
/// `clear_failure` is called.
pub struct MemoryService {
    tables: RwLock<BTreeMap<String, MemTable>>,
    failure: RwLock<Option<String>>,
}

#[derive(Default)]
struct MemTable {
    next_id: i64,
    rows: Vec<Map<String, Value>>,
}

impl MemTable {
    fn bump_past(&mut self, id: Option<i64>) {
        if let Some(id) = id {
            if id >= self.next_id {
                self.next_id = id + 1;
            }
        }
    }

    fn take_id(&mut self) -> i64 {
        if self.next_id == 0 {
            self.next_id = 1;
        }
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl MemoryService {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(BTreeMap::new()),
            failure: RwLock::new(None),
        }
    }

    /// Load rows verbatim (ids included). Non-object values are skipped.
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        let mut tables = self.tables.write().unwrap();
        let t = tables.entry(table.to_string()).or_default();
        for row in rows {
            if let Value::Object(obj) = row {
                t.bump_past(obj.get("id").and_then(Value::as_i64));
                t.rows.push(obj);
            }
        }
    }

    /// All rows of a table, in storage order.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        let tables = self.tables.read().unwrap();
        tables
            .get(table)
            .map(|t| t.rows.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }

    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write().unwrap() = Some(message.into());
    }

    pub fn clear_failure(&self) {
        *self.failure.write().unwrap() = None;
    }

    fn check_failure(&self) -> Result<(), ServiceError> {
        match self.failure.read().unwrap().as_ref() {
            Some(msg) => Err(ServiceError::server(500, msg.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MemoryService {
    fn default() -> Self {
        Self::new()
    }
}

/// Order two JSON values: nulls first, then numbers, then strings/bools.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

fn project(row: &Map<String, Value>, query: &Query) -> Value {
    if query.selects_all() {
        return Value::Object(row.clone());
    }
    let out: Map<String, Value> = query
        .columns
        .iter()
        .map(|c| (c.clone(), row.get(c).cloned().unwrap_or(Value::Null)))
        .collect();
    Value::Object(out)
}

#[async_trait::async_trait]
impl DataService for MemoryService {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, ServiceError> {
        self.check_failure()?;
        let tables = self.tables.read().unwrap();
        let Some(t) = tables.get(table) else {
            return Ok(Vec::new());
        };

        let mut rows: Vec<&Map<String, Value>> = t
            .rows
            .iter()
            .filter(|row| {
                query
                    .filters
                    .iter()
                    .all(|f| row.get(&f.column) == Some(&f.value))
            })
            .collect();

        if let Some(ref order) = query.order {
            rows.sort_by(|a, b| {
                let ord = compare_values(a.get(&order.column), b.get(&order.column));
                match order.direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }
        if let Some(n) = query.limit {
            rows.truncate(n);
        }
        Ok(rows.into_iter().map(|r| project(r, query)).collect())
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<(), ServiceError> {
        self.check_failure()?;
        let mut objects = Vec::with_capacity(rows.len());
        for row in rows {
            match row {
                Value::Object(obj) => objects.push(obj),
                other => {
                    return Err(ServiceError::server(
                        400,
                        format!("row must be a JSON object, got {}", other),
                    ))
                }
            }
        }

        let mut tables = self.tables.write().unwrap();
        let t = tables.entry(table.to_string()).or_default();
        let now = chrono::Utc::now().to_rfc3339();
        for mut obj in objects {
            let id = t.take_id();
            obj.insert("id".to_string(), Value::from(id));
            obj.entry("created_at".to_string())
                .or_insert_with(|| Value::String(now.clone()));
            t.rows.push(obj);
        }
        Ok(())
    }

    async fn update(&self, table: &str, patch: Value, filter: &Filter) -> Result<(), ServiceError> {
        self.check_failure()?;
        let Value::Object(patch) = patch else {
            return Err(ServiceError::server(400, "patch must be a JSON object"));
        };
        let mut tables = self.tables.write().unwrap();
        if let Some(t) = tables.get_mut(table) {
            for row in t.rows.iter_mut() {
                if row.get(&filter.column) == Some(&filter.value) {
                    for (k, v) in &patch {
                        if k != "id" {
                            row.insert(k.clone(), v.clone());
                        }
                    }
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<(), ServiceError> {
        self.check_failure()?;
        let mut tables = self.tables.write().unwrap();
        if let Some(t) = tables.get_mut(table) {
            t.rows.retain(|row| row.get(&filter.column) != Some(&filter.value));
        }
        Ok(())
    }
}
