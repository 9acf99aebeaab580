//! Config file and `.env` loading
//!
//! Values resolve as: CLI flag > environment > config file > built-in default.
//! The file lives at `~/.stockroom/config.toml` unless `--config` points
//! elsewhere; a missing default file is not an error.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// `~/.stockroom`
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".stockroom"))
}

/// Default config file path: ~/.stockroom/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Load `.env` from the working directory, then `~/.stockroom/.env`.
///
/// Neither file overrides variables that are already set.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            dotenvy::from_path(&env_file).ok(); // Load but don't fail on parse errors
        }
    }
}

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StockroomConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub bind: Option<SocketAddr>,
    pub cors_permissive: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
}

impl StockroomConfig {
    /// Load an explicit path (must exist) or the default path (may be absent).
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {:?}", path))
    }
}
