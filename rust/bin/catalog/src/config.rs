//! Client configuration.
//!
//! Reads/writes `~/.catalog/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the hosted data service (e.g. "https://xyz.supabase.co").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service_url: String,

    /// Project key sent as `apikey` and bearer token.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,

    /// Session database (default: ~/.catalog/session.redb).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub session_path: String,
}

impl ClientConfig {
    /// Default config file path: ~/.catalog/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn session_path(&self) -> PathBuf {
        if self.session_path.is_empty() {
            dirs_path().join("session.redb")
        } else {
            PathBuf::from(&self.session_path)
        }
    }
}

/// Return the catalog config directory (~/.catalog).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".catalog")
}
