//! # Configuration Persistence
//!
//! Load client settings from disk.

use grievancex_auth::AuthorityConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Session authority settings.
    pub authority: AuthorityConfig,

    /// File holding the persisted session.
    ///
    /// Defaults to `<data dir>/grievancex/storage.json`.
    pub storage_path: Option<PathBuf>,

    /// JSON identity directory replacing the built-in accounts.
    pub directory_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Returns the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("grievancex").join("config.json"))
    }

    /// Loads configuration from `path` (or the default path), returning
    /// defaults if the file is missing or unusable.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            tracing::warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    tracing::info!(?path, "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(?path, error = %e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Resolves where the session is persisted.
    pub fn storage_path(&self) -> PathBuf {
        self.storage_path.clone().unwrap_or_else(|| {
            dirs::data_dir().map_or_else(
                || PathBuf::from("grievancex-storage.json"),
                |p| p.join("grievancex").join("storage.json"),
            )
        })
    }
}
