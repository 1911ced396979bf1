//! `catalog config show|set`.

use std::path::Path;

use anyhow::Result;

use crate::config::ClientConfig;

pub fn show(config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    println!("# {}", config_path.display());
    let masked = ClientConfig {
        api_key: mask(&config.api_key),
        ..config.clone()
    };
    print!("{}", toml::to_string_pretty(&masked)?);
    println!("# session: {}", config.session_path().display());
    Ok(())
}

pub fn set(
    service_url: Option<&str>,
    api_key: Option<&str>,
    session_path: Option<&str>,
    config_path: &Path,
) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;
    if let Some(url) = service_url {
        config.service_url = url.trim_end_matches('/').to_string();
    }
    if let Some(key) = api_key {
        config.api_key = key.to_string();
    }
    if let Some(path) = session_path {
        config.session_path = path.to_string();
    }
    config.save(config_path)?;
    println!("Config saved to {}.", config_path.display());
    Ok(())
}

fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
