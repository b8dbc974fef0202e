//! Configuration handling for the client

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::auth::DEFAULT_TOKEN_KEY;
use crate::state::DisplayOrderPolicy;

/// Default API address
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// User configuration for the client
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    /// Base URL of the forms API
    pub api_base_url: Option<String>,
    /// Session key the bearer token is read from
    pub token_key: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// Renumber display orders after removing a question
    pub normalize_display_order: Option<bool>,
}

impl ClientConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "form-builder", "form-builder")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: ClientConfig = serde_json::from_str(&content)?;
                tracing::debug!(path = %path.display(), "Loaded config");
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<Option<PathBuf>> {
        let Some(path) = Self::config_path() else {
            return Ok(None);
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(Some(path))
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn token_key(&self) -> &str {
        self.token_key.as_deref().unwrap_or(DEFAULT_TOKEN_KEY)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn display_order_policy(&self) -> DisplayOrderPolicy {
        DisplayOrderPolicy::from_normalize_flag(self.normalize_display_order.unwrap_or(false))
    }
}
