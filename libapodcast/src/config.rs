//! Configuration management for Apodcast
//!
//! A single [`Config`] is constructed at startup and passed by reference into
//! the fetcher and publisher; component logic never reads the environment
//! itself. Values come from an optional TOML file with environment variable
//! overrides applied on top.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub nasa: NasaConfig,
    #[serde(default)]
    pub bluesky: BlueskyConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NasaConfig {
    /// NASA API token. The shared demo token applies when nothing is set.
    #[serde(default = "default_api_key")]
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlueskyConfig {
    /// Bluesky handle or email used for login.
    #[serde(default)]
    pub identifier: String,
    /// App password for the account.
    #[serde(default)]
    pub app_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Earliest calendar date eligible for the random draw.
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    /// Random dates tried before giving up on finding an image-type record.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_api_key() -> String {
    "DEMO_KEY".to_string()
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 2, 1).expect("valid date")
}

fn default_max_attempts() -> u32 {
    10
}

impl Default for NasaConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
        }
    }
}

impl Default for BlueskyConfig {
    fn default() -> Self {
        Self {
            identifier: String::new(),
            app_password: String::new(),
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to
    /// defaults when no file exists, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        let mut config = if config_path.exists() {
            Self::load_from_path(&config_path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Environment variables win over file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("NASA_API_KEY") {
            self.nasa.api_key = key;
        }
        if let Ok(identifier) = std::env::var("BLUESKY_USERNAME") {
            self.bluesky.identifier = identifier;
        }
        if let Ok(password) = std::env::var("BLUESKY_PASSWORD") {
            self.bluesky.app_password = password;
        }
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("APODCAST_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("apodcast").join("config.toml"))
}
