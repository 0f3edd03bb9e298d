//! Plugin configuration.
//!
//! The only configurable value is the remote API key. It comes from the
//! `RIVALS_API_KEY` environment variable, or failing that from a JSON file
//! (`{"api_key": "..."}`) at a host-provided path. Configuration is loaded
//! once at startup and threaded into handler construction; an absent key is
//! not an error here - the affected handlers answer with a failure envelope
//! when they actually need it.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable overriding the config file.
pub const API_KEY_ENV: &str = "RIVALS_API_KEY";

/// Environment variable overriding the config-file path.
pub const CONFIG_PATH_ENV: &str = "RIVALS_CONFIG";

const CONFIG_FILE_NAME: &str = "config.json";

/// Plugin configuration, read-only after load.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginConfig {
    /// Remote API key, if configured.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl PluginConfig {
    /// Load configuration: environment variable first, then the JSON file.
    ///
    /// Never fails; a missing or unreadable file yields an empty config.
    pub fn load(path: &Path) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                tracing::debug!("using API key from environment");
                return Self { api_key: Some(key) };
            }
        }

        Self::from_file(path)
    }

    /// Load configuration from a JSON file only.
    pub fn from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "invalid config file");
                    Self::default()
                }
            },
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "no config file");
                Self::default()
            }
        }
    }

    /// Default config-file location: `RIVALS_CONFIG` if set, otherwise
    /// `config.json` next to the executable.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return PathBuf::from(path);
        }

        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// The configured API key, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}
