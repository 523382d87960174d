//! Application configuration
//!
//! Loaded from a TOML file, `CATALOG_*` environment variables and CLI flags.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Upper bound for `read_retries`.
pub const MAX_READ_RETRIES: u32 = 10;

/// Configuration error types
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid API URL: {0:?}. Must start with http:// or https://")]
    InvalidApiUrl(String),

    #[error("Invalid request timeout: {0}. Must be at least 1 second")]
    InvalidTimeout(u64),

    #[error("Invalid read retries: {0}. Must be at most {MAX_READ_RETRIES}")]
    InvalidReadRetries(u32),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the product backend
    pub api_url: String,
    /// Path of the product resource under `api_url`
    pub resource_path: String,
    pub request_timeout_secs: u64,
    /// Extra attempts for failed list reads
    pub read_retries: u32,
    pub log_level: LogLevel,
    /// Answer given to confirmation prompts in unattended runs
    pub auto_confirm: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            resource_path: crate::store::DEFAULT_RESOURCE_PATH.to_string(),
            request_timeout_secs: 10,
            read_retries: crate::store::DEFAULT_READ_RETRIES,
            log_level: LogLevel::Info,
            auto_confirm: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables. Values are parsed but not
    /// validated; [`build_config`] validates the merged result.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("CATALOG_API_URL") {
            config.api_url = url;
        }
        if let Ok(path) = std::env::var("CATALOG_RESOURCE_PATH") {
            config.resource_path = path;
        }
        if let Ok(timeout) = std::env::var("CATALOG_TIMEOUT_SECS") {
            config.request_timeout_secs = timeout
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("CATALOG_TIMEOUT_SECS={}", timeout)))?;
        }
        if let Ok(retries) = std::env::var("CATALOG_READ_RETRIES") {
            config.read_retries = retries
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("CATALOG_READ_RETRIES={}", retries)))?;
        }
        if let Ok(level) = std::env::var("CATALOG_LOG_LEVEL") {
            config.log_level = LogLevel::from_str(&level)?;
        }
        if let Ok(confirm) = std::env::var("CATALOG_AUTO_CONFIRM") {
            config.auto_confirm = confirm.to_lowercase() == "true";
        }

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_url.trim();
        if url.is_empty() || !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(self.api_url.clone()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(self.request_timeout_secs));
        }
        if self.read_retries > MAX_READ_RETRIES {
            return Err(ConfigError::InvalidReadRetries(self.read_retries));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(url) = &cli.api_url {
            self.api_url = url.clone();
        }
        if let Some(path) = &cli.resource_path {
            self.resource_path = path.clone();
        }
        if let Some(timeout) = cli.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }
        if let Some(retries) = cli.read_retries {
            self.read_retries = retries;
        }
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if let Some(confirm) = cli.auto_confirm {
            self.auto_confirm = confirm;
        }
        Ok(())
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config_file: Option<PathBuf>,
    pub api_url: Option<String>,
    pub resource_path: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub read_retries: Option<u32>,
    pub log_level: Option<String>,
    pub auto_confirm: Option<bool>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<AppConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };

    let env_config = AppConfig::from_env()?;
    if std::env::var("CATALOG_API_URL").is_ok() {
        config.api_url = env_config.api_url;
    }
    if std::env::var("CATALOG_RESOURCE_PATH").is_ok() {
        config.resource_path = env_config.resource_path;
    }
    if std::env::var("CATALOG_TIMEOUT_SECS").is_ok() {
        config.request_timeout_secs = env_config.request_timeout_secs;
    }
    if std::env::var("CATALOG_READ_RETRIES").is_ok() {
        config.read_retries = env_config.read_retries;
    }
    if std::env::var("CATALOG_LOG_LEVEL").is_ok() {
        config.log_level = env_config.log_level;
    }
    if std::env::var("CATALOG_AUTO_CONFIRM").is_ok() {
        config.auto_confirm = env_config.auto_confirm;
    }

    config.merge_with_cli(cli)?;
    config.validate()?;
    Ok(config)
}
