//! Application configuration management.
//!
//! The client can point at either a local development server or the
//! hosted deployment; the active environment, both base URLs, and the
//! request timeout live in `~/.config/herdbook/config.json`. The
//! `HERDBOOK_ENV` and `HERDBOOK_BASE_URL` environment variables override
//! the file.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Application name used for the config directory path
const APP_NAME: &str = "herdbook";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default base URL of the hosted deployment
const DEFAULT_REMOTE_BASE_URL: &str = "https://shopalali.com/farm-api/";

/// Default base URL of the local Django dev server. Physical devices need
/// the LAN address, not localhost, so the dev server must be started with
/// `runserver 0.0.0.0:8000`.
const DEFAULT_LOCAL_BASE_URL: &str = "http://192.168.9.136:8000/farm-api/";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    #[default]
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub environment: Environment,
    pub local_base_url: String,
    pub remote_base_url: String,
    pub timeout_secs: u64,
    pub last_username: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Remote,
            local_base_url: DEFAULT_LOCAL_BASE_URL.to_string(),
            remote_base_url: DEFAULT_REMOTE_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            last_username: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };
        config.apply_overrides(
            std::env::var("HERDBOOK_ENV").ok().as_deref(),
            std::env::var("HERDBOOK_BASE_URL").ok().as_deref(),
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply environment-variable overrides on top of the loaded file.
    fn apply_overrides(&mut self, env: Option<&str>, base_url: Option<&str>) {
        if let Some(env) = env {
            match env.to_ascii_lowercase().as_str() {
                "local" => self.environment = Environment::Local,
                "remote" => self.environment = Environment::Remote,
                other => warn!(value = other, "ignoring unknown HERDBOOK_ENV"),
            }
        }
        if let Some(url) = base_url {
            match self.environment {
                Environment::Local => self.local_base_url = url.to_string(),
                Environment::Remote => self.remote_base_url = url.to_string(),
            }
        }
    }

    /// Base URL for the active environment, always ending with a slash so
    /// relative endpoint paths append cleanly.
    pub fn base_url(&self) -> String {
        let url = match self.environment {
            Environment::Local => &self.local_base_url,
            Environment::Remote => &self.remote_base_url,
        };
        if url.ends_with('/') {
            url.clone()
        } else {
            format!("{url}/")
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
