//! Configuration module
//!
//! Settings are read from a TOML file (default
//! `~/.config/lumos-gateway/config.toml`). Every field has a default, so a
//! partial file is enough:
//!
//! ```toml
//! [server]
//! port = 3000
//!
//! [backend]
//! base_url = "http://search-backend:8080"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{MAX_VISIBLE_BUTTONS, MIN_VISIBLE_BUTTONS};
use crate::shared::RetryPolicy;

/// Environment variable overriding `backend.base_url`
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Default location of the configuration file
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lumos-gateway")
        .join("config.toml")
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub suggestions: SuggestionConfig,
    pub pagination: PaginationConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Search backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Page size requested from the backend
    pub results_per_page: u32,
    /// Upper bound on suggestions returned to the search box
    pub max_suggestions: usize,
    /// Attempts per backend call, including the first
    pub max_attempts: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 10,
            results_per_page: 10,
            max_suggestions: 5,
            max_attempts: 3,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::with_max_attempts(self.max_attempts)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Quiet period before a keystroke triggers a backend lookup
    pub debounce_ms: u64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

impl SuggestionConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub max_visible_buttons: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_visible_buttons: crate::domain::DEFAULT_VISIBLE_BUTTONS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `lumos_gateway=debug,tower_http=info`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file and apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                self.backend.base_url = url;
            }
        }
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.backend.base_url).map_err(|e| {
            ConfigError::Invalid(format!("backend.base_url '{}': {}", self.backend.base_url, e))
        })?;

        if self.backend.results_per_page == 0 {
            return Err(ConfigError::Invalid(
                "backend.results_per_page must be at least 1".into(),
            ));
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "backend.timeout_secs must be at least 1".into(),
            ));
        }

        let buttons = self.pagination.max_visible_buttons;
        if !(MIN_VISIBLE_BUTTONS..=MAX_VISIBLE_BUTTONS).contains(&buttons) {
            return Err(ConfigError::Invalid(format!(
                "pagination.max_visible_buttons must be between {} and {}, got {}",
                MIN_VISIBLE_BUTTONS, MAX_VISIBLE_BUTTONS, buttons
            )));
        }

        Ok(())
    }
}
