use crate::error::SessionError;

/// SessionStore is a persistent string key-value store.
///
/// Values survive process restarts for file-backed implementations. Keys
/// are plain names (the dashboard uses `user`).
pub trait SessionStore: Send + Sync {
    /// Get the value for a key. Returns None if the key is not set.
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Set a key, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}
