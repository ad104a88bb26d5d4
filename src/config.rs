//! Configuration handling for the TUI

use crate::api::DEFAULT_BASE_URL;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides the configured API base URL
pub const API_BASE_URL_ENV: &str = "CALLBOARD_API_BASE_URL";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TuiConfig {
    /// Base URL of the REST API, e.g. `http://localhost:3001/api`
    pub api_base_url: Option<String>,
    /// Per-request timeout
    pub request_timeout_secs: Option<u64>,
    /// JSON file with the campaigns to show instead of the sample data
    pub campaigns_file: Option<PathBuf>,
    /// Calling code prepended to test call numbers typed without `+`
    pub default_country_code: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "callboard", "callboard-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the default location, writing a default
    /// file there on first run
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_or_init(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load `path`, or create it with defaults when it does not exist yet.
    /// A failed write only logs; the defaults are still returned.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }
        let config = Self::default();
        match config.save_to(path) {
            Ok(()) => tracing::info!(path = %path.display(), "Wrote default config"),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Could not write default config")
            }
        }
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults when it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Save configuration to a file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Effective API base URL: environment, then config file, then default
    pub fn api_base_url(&self) -> String {
        self.resolve_api_base_url(std::env::var(API_BASE_URL_ENV).ok())
    }

    fn resolve_api_base_url(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
