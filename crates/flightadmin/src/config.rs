//! Configuration management for flightadmin.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "flightadmin";

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLIGHTADMIN_`, nested keys split on `__`)
/// 2. TOML config file at `~/.config/flightadmin/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend API configuration.
    pub api: ApiConfig,
    /// Terminal output configuration.
    pub output: OutputConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every request path is appended to.
    pub base_url: String,
    /// `User-Agent` header sent with each request.
    pub user_agent: String,
}

/// Output-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default rendering for command output.
    pub format: OutputFormat,
}

/// How command results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Plain,
    /// Pretty-printed JSON.
    Json,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("flightadm/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("FLIGHTADMIN_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.api.base_url).map_err(|e| Error::ConfigValidation {
            message: format!("invalid base_url {}: {e}", self.api.base_url),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::ConfigValidation {
                message: format!("base_url must use http or https, got {}", url.scheme()),
            });
        }

        if self.api.user_agent.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "user_agent must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Return a copy with the base URL replaced, re-validating the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the new base URL is invalid.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        self.api.base_url = base_url.into();
        self.validate()?;
        Ok(self)
    }
}
