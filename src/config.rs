//! Configuration management for the Tourcast application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::TourcastError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the Tourcast application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourcastConfig {
    /// AI inference configuration
    #[serde(default)]
    pub inference: InferenceConfig,
    /// Data file locations
    #[serde(default)]
    pub data: DataConfig,
    /// Web server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// AI inference settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Anthropic API key (falls back to the ANTHROPIC_API_KEY env var)
    pub api_key: Option<String>,
    /// Model used for destination inference
    #[serde(default = "default_inference_model")]
    pub model: String,
    /// Base URL for the messages API
    #[serde(default = "default_inference_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_inference_timeout")]
    pub timeout_seconds: u32,
    /// Maximum response tokens
    #[serde(default = "default_inference_max_tokens")]
    pub max_tokens: u32,
}

/// Data file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the city database JSON file
    #[serde(default = "default_cities_path")]
    pub cities_path: String,
    /// Path to the categories JSON file
    #[serde(default = "default_categories_path")]
    pub categories_path: String,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the HTTP API listens on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_inference_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_inference_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_inference_timeout() -> u32 {
    30
}

fn default_inference_max_tokens() -> u32 {
    2000
}

fn default_cities_path() -> String {
    "cities.json".to_string()
}

fn default_categories_path() -> String {
    "categories.json".to_string()
}

fn default_server_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for TourcastConfig {
    fn default() -> Self {
        Self {
            inference: InferenceConfig::default(),
            data: DataConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_inference_model(),
            base_url: default_inference_base_url(),
            timeout_seconds: default_inference_timeout(),
            max_tokens: default_inference_max_tokens(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            cities_path: default_cities_path(),
            categories_path: default_categories_path(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl TourcastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with TOURCAST_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TOURCAST")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: TourcastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tourcast").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.inference.timeout_seconds == 0 || self.inference.timeout_seconds > 300 {
            return Err(TourcastError::config(
                "Inference timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.inference.max_tokens == 0 || self.inference.max_tokens > 8192 {
            return Err(
                TourcastError::config("Inference max_tokens must be between 1 and 8192").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TourcastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TourcastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.inference.base_url.starts_with("http://")
            && !self.inference.base_url.starts_with("https://")
        {
            return Err(TourcastError::config(
                "Inference base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}
