use std::path::Path;

use ::redb::{Database, TableDefinition};
use tracing::debug;

use crate::error::SessionError;
use crate::traits::SessionStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("session");

fn storage<E: std::fmt::Display>(e: E) -> SessionError {
    SessionError::Storage(e.to_string())
}

/// SessionStore backed by a redb database file.
pub struct RedbSessionStore {
    db: Database,
}

impl RedbSessionStore {
    /// Open or create the session database at `path`.
    ///
    /// Parent directories are created as needed.
    pub fn open(path: &Path) -> Result<Self, SessionError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(storage)?;
            }
        }
        let db = Database::create(path).map_err(storage)?;

        // Create the table up front so reads on a fresh file succeed.
        let write_txn = db.begin_write().map_err(storage)?;
        {
            let _table = write_txn.open_table(TABLE).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)?;

        debug!(path = %path.display(), "session store opened");
        Ok(Self { db })
    }
}

impl SessionStore for RedbSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let read_txn = self.db.begin_read().map_err(storage)?;
        let table = read_txn.open_table(TABLE).map_err(storage)?;

        match table.get(key).map_err(storage)? {
            Some(val) => String::from_utf8(val.value().to_vec())
                .map(Some)
                .map_err(|e| SessionError::Encoding(e.to_string())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let write_txn = self.db.begin_write().map_err(storage)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage)?;
            table.insert(key, value.as_bytes()).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let write_txn = self.db.begin_write().map_err(storage)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage)?;
            table.remove(key).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)
    }
}
