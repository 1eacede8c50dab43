//! Configuration management for the `AirCheck` client
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::{AirCheckError, chart};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `AirCheck` client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirCheckConfig {
    /// Air quality endpoint configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Chart dimensions
    #[serde(default)]
    pub chart: ChartConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Air quality endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Endpoint queried as `<base_url>?city=<name>`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds. `None` waits until the transport gives up.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    /// User-Agent header sent with each request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Chart size in terminal cells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_chart_width")]
    pub width: u16,
    #[serde(default = "default_chart_height")]
    pub height: u16,
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
fn default_base_url() -> String {
    "http://localhost:5000/airquality".to_string()
}

fn default_user_agent() -> String {
    format!("aircheck/{}", crate::VERSION)
}

fn default_chart_width() -> u16 {
    48
}

fn default_chart_height() -> u16 {
    14
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
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

impl AirCheckConfig {
    /// Load configuration from the default file location and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.or_else(Self::get_config_path);

        if let Some(config_file) = config_file.filter(|path| path.exists()) {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // AIRCHECK__API__BASE_URL, AIRCHECK__LOGGING__LEVEL, ...
        builder = builder.add_source(
            Environment::with_prefix("AIRCHECK")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AirCheckConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("aircheck").join("config.toml"))
    }

    /// Replace empty strings left by partial sources with defaults
    pub fn apply_defaults(&mut self) {
        if self.api.base_url.is_empty() {
            self.api.base_url = default_base_url();
        }
        if self.api.user_agent.is_empty() {
            self.api.user_agent = default_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if let Some(timeout) = self.api.timeout_seconds {
            if timeout == 0 || timeout > 300 {
                return Err(AirCheckError::config(
                    "API timeout must be between 1 and 300 seconds",
                )
                .into());
            }
        }

        if !(chart::MIN_WIDTH..=200).contains(&self.chart.width) {
            return Err(AirCheckError::config(format!(
                "Chart width must be between {} and 200",
                chart::MIN_WIDTH
            ))
            .into());
        }

        if !(chart::MIN_HEIGHT..=60).contains(&self.chart.height) {
            return Err(AirCheckError::config(format!(
                "Chart height must be between {} and 60",
                chart::MIN_HEIGHT
            ))
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AirCheckError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AirCheckError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(
                AirCheckError::config("API base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        if self.api.base_url.contains('?') {
            return Err(AirCheckError::config(
                "API base URL must not carry a query string; the city parameter is appended",
            )
            .into());
        }

        Ok(())
    }
}
