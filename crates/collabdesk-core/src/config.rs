//! TOML-based application configuration.
//!
//! Stores the remote API origin and workspace, the optional bearer token,
//! and the calendar display window. Stored at
//! `~/.config/collabdesk/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::grid::GridConfig;

/// Returns `~/.config/collabdesk[-dev]/` based on COLLABDESK_ENV.
///
/// Set COLLABDESK_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("COLLABDESK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("collabdesk-dev")
    } else {
        base_dir.join("collabdesk")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Remote API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub workspace_id: String,
    #[serde(default = "default_user_id")]
    pub user_id: i64,
    /// Bearer token attached to requests when set. Acquiring one is the
    /// identity provider's business, not this client's.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

/// Calendar display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridPrefs {
    #[serde(default = "default_hour_start")]
    pub hour_start: u32,
    #[serde(default = "default_hour_end")]
    pub hour_end: u32,
    #[serde(default = "default_px_per_hour")]
    pub px_per_hour: f32,
}

impl GridPrefs {
    pub fn to_grid_config(&self) -> GridConfig {
        GridConfig {
            hour_start: self.hour_start,
            hour_end: self.hour_end,
            px_per_hour: self.px_per_hour,
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/collabdesk/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub grid: GridPrefs,
}

// Default functions
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_user_id() -> i64 {
    1
}
fn default_hour_start() -> u32 {
    6
}
fn default_hour_end() -> u32 {
    21
}
fn default_px_per_hour() -> f32 {
    64.0
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            workspace_id: String::new(),
            user_id: default_user_id(),
            bearer_token: None,
        }
    }
}

impl Default for GridPrefs {
    fn default() -> Self {
        Self {
            hour_start: default_hour_start(),
            hour_end: default_hour_end(),
            px_per_hour: default_px_per_hour(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            grid: GridPrefs::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api.base_url" => Some(self.api.base_url.clone()),
            "api.workspace_id" => Some(self.api.workspace_id.clone()),
            "api.user_id" => Some(self.api.user_id.to_string()),
            "api.bearer_token" => Some(self.api.bearer_token.clone().unwrap_or_default()),
            "grid.hour_start" => Some(self.grid.hour_start.to_string()),
            "grid.hour_end" => Some(self.grid.hour_end.to_string()),
            "grid.px_per_hour" => Some(self.grid.px_per_hour.to_string()),
            _ => None,
        }
    }

    /// Set a config value by key and persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        match key {
            "api.base_url" => self.api.base_url = value.to_string(),
            "api.workspace_id" => self.api.workspace_id = value.to_string(),
            "api.user_id" => self.api.user_id = value.parse()?,
            "api.bearer_token" => {
                self.api.bearer_token = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "grid.hour_start" => self.grid.hour_start = value.parse()?,
            "grid.hour_end" => self.grid.hour_end = value.parse()?,
            "grid.px_per_hour" => self.grid.px_per_hour = value.parse()?,
            _ => return Err(format!("unknown config key: {key}").into()),
        }
        self.save()?;
        Ok(())
    }
}
