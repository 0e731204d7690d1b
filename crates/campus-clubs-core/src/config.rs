//! Application configuration management.
//!
//! The config holds the API base endpoint override, the last email used to
//! sign in, the club chosen for event management, and where the bearer
//! token is stored.
//!
//! Configuration is stored at `~/.config/campus-clubs/config.json`; the
//! session lives under the platform data directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;
use crate::auth::TokenStorage;

/// Application name used for config/data directory paths
pub const APP_NAME: &str = "campus-clubs";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable that overrides the API base endpoint
pub const API_URL_ENV: &str = "CAMPUS_CLUBS_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub last_email: Option<String>,
    #[serde(default)]
    pub selected_club_uid: Option<String>,
    #[serde(default)]
    pub selected_club_name: Option<String>,
    #[serde(default)]
    pub token_storage: TokenStorage,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path).context("Failed to read config file")?;
            Ok(serde_json::from_str(&contents).context("Failed to parse config file")?)
        } else {
            Ok(Self::default())
        }
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

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for the session file and logs
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    /// Base endpoint: environment first, then the config file, then the default
    pub fn base_url(&self) -> String {
        self.resolve_base_url(std::env::var(API_URL_ENV).ok())
    }

    fn resolve_base_url(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn select_club(&mut self, uid: &str, name: &str) {
        self.selected_club_uid = Some(uid.to_string());
        self.selected_club_name = Some(name.to_string());
    }
}
