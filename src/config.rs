//! Configuration management for `Packwise`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::PackwiseError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `Packwise` service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PackwiseConfig {
    /// Chat-completion assistant settings
    pub assistant: AssistantConfig,
    /// Weather lookup settings
    pub weather: WeatherConfig,
    /// Persistent storage settings
    pub storage: StorageConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// HTTP server settings
    pub server: ServerConfig,
}

/// Chat-completion assistant settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// API key; the assistant is disabled without one
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Sampling temperature for packing list requests
    pub packing_temperature: f32,
    /// Sampling temperature for flight price requests
    pub flight_temperature: f32,
    pub timeout_seconds: u32,
}

/// Where the destination temperature comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherMode {
    /// Classify from the destination text only
    #[default]
    Off,
    /// Derive a reading from the destination text
    Simulated,
    /// Geocode and query OpenMeteo
    Live,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub mode: WeatherMode,
    /// Base URL for the geocoding API
    pub geocoding_url: String,
    /// Base URL for the forecast API
    pub forecast_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Retries for transient failures; 0 means a single attempt
    pub max_retries: u32,
    /// Geocoding cache TTL in hours
    pub cache_ttl_hours: u32,
}

/// Persistent storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database directory; a leading `~` is expanded
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty, compact or json)
    pub format: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// Default value functions
fn default_assistant_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_assistant_model() -> String {
    "gpt-4o".to_string()
}

fn default_assistant_timeout() -> u32 {
    30
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_cache_ttl() -> u32 {
    24
}

fn default_storage_location() -> String {
    "~/.cache/packwise".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_assistant_base_url(),
            model: default_assistant_model(),
            packing_temperature: 0.5,
            flight_temperature: 0.3,
            timeout_seconds: default_assistant_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            mode: WeatherMode::default(),
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            timeout_seconds: default_weather_timeout(),
            max_retries: 0,
            cache_ttl_hours: default_cache_ttl(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            location: default_storage_location(),
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

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl PackwiseConfig {
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

        // PACKWISE__WEATHER__MODE=live
        builder = builder.add_source(
            Environment::with_prefix("PACKWISE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: PackwiseConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("packwise").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.assistant.base_url.is_empty() {
            self.assistant.base_url = default_assistant_base_url();
        }
        if self.assistant.model.is_empty() {
            self.assistant.model = default_assistant_model();
        }
        if self.assistant.timeout_seconds == 0 {
            self.assistant.timeout_seconds = default_assistant_timeout();
        }
        if self.assistant.api_key.as_deref().is_some_and(|key| key.trim().is_empty()) {
            self.assistant.api_key = None;
        }
        if self.weather.geocoding_url.is_empty() {
            self.weather.geocoding_url = default_geocoding_url();
        }
        if self.weather.forecast_url.is_empty() {
            self.weather.forecast_url = default_forecast_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.weather.cache_ttl_hours == 0 {
            self.weather.cache_ttl_hours = default_cache_ttl();
        }
        if self.storage.location.is_empty() {
            self.storage.location = default_storage_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        if let Some(api_key) = &self.assistant.api_key {
            if !crate::assistant::is_valid_api_key(api_key) {
                return Err(PackwiseError::config(
                    "Assistant API key appears to be invalid. Expected 'sk-' followed by at least 32 letters or digits.",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.assistant.timeout_seconds > 300 {
            return Err(PackwiseError::config("Assistant timeout cannot exceed 300 seconds").into());
        }

        for (name, value) in [
            ("packing", self.assistant.packing_temperature),
            ("flight", self.assistant.flight_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(PackwiseError::config(format!(
                    "Assistant {name} temperature must be between 0.0 and 2.0"
                ))
                .into());
            }
        }

        if self.weather.timeout_seconds > 300 {
            return Err(PackwiseError::config("Weather API timeout cannot exceed 300 seconds").into());
        }

        if self.weather.max_retries > 5 {
            return Err(PackwiseError::config("Weather API max retries cannot exceed 5").into());
        }

        if self.weather.cache_ttl_hours > 168 {
            return Err(PackwiseError::config("Cache TTL cannot exceed 168 hours (1 week)").into());
        }

        if self.server.port == 0 {
            return Err(PackwiseError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PackwiseError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "compact", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PackwiseError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Assistant base URL", &self.assistant.base_url),
            ("Geocoding URL", &self.weather.geocoding_url),
            ("Forecast URL", &self.weather.forecast_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(
                    PackwiseError::config(format!("{name} must be a valid HTTP or HTTPS URL")).into(),
                );
            }
        }

        Ok(())
    }

    /// Storage directory with a leading `~` expanded to the home directory
    pub fn storage_path(&self) -> Result<PathBuf> {
        let location = self.storage.location.as_str();
        match location.strip_prefix("~") {
            Some(rest) => {
                let home = dirs::home_dir()
                    .ok_or_else(|| PackwiseError::config("Unable to determine home directory"))?;
                Ok(home.join(rest.trim_start_matches(['/', '\\'])))
            }
            None => Ok(PathBuf::from(location)),
        }
    }

    /// Whether the assistant can be used
    #[must_use]
    pub fn assistant_enabled(&self) -> bool {
        self.assistant.api_key.is_some()
    }
}
