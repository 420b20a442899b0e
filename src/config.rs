//! Configuration management for `CommuteOS`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::CommuteError;
use crate::models::Location;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `CommuteOS` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommuteConfig {
    /// Weather, routing and geocoding provider settings
    pub providers: ProvidersConfig,
    /// Route cache and location store settings
    pub storage: StorageConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Fallback home/work coordinates
    pub defaults: DefaultsConfig,
    /// HTTP API settings
    pub server: ServerConfig,
}

/// Provider endpoints and HTTP client behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Open-Meteo base URL
    pub weather_base_url: String,
    /// OSRM base URL
    pub routing_base_url: String,
    /// Nominatim base URL
    pub geocoding_base_url: String,
    /// Client-identifying header sent to every provider (Nominatim requires one)
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    pub max_retries: u32,
    /// Maximum number of geocoding results
    pub search_limit: u32,
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory of the fjall database
    pub location: String,
    /// Route cache TTL in hours
    pub route_ttl_hours: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

/// Locations used until the user saves their own
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub home: Location,
    pub work: Location,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Per-request timeout for the HTTP API in seconds
    pub request_timeout_seconds: u32,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_routing_base_url() -> String {
    "https://router.project-osrm.org".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_user_agent() -> String {
    "CommuteOS/1.0".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_max_retries() -> u32 {
    2
}

fn default_search_limit() -> u32 {
    5
}

fn default_storage_location() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("commuteos").to_string_lossy().into_owned())
        .unwrap_or_else(|| "./commuteos-data".to_string())
}

fn default_route_ttl() -> u32 {
    24 * 7
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_home() -> Location {
    Location::new(40.7128, -74.0060)
}

fn default_work() -> Location {
    Location::new(40.7580, -73.9855)
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u32 {
    60
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            weather_base_url: default_weather_base_url(),
            routing_base_url: default_routing_base_url(),
            geocoding_base_url: default_geocoding_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            search_limit: default_search_limit(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            location: default_storage_location(),
            route_ttl_hours: default_route_ttl(),
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

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            home: default_home(),
            work: default_work(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl CommuteConfig {
    /// Load configuration from file and environment variables
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

        // COMMUTEOS__PROVIDERS__TIMEOUT_SECONDS=10 and friends
        builder = builder.add_source(
            Environment::with_prefix("COMMUTEOS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: CommuteConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("commuteos").join("config.toml"))
    }

    /// Apply default values to empty or zeroed configuration fields
    pub fn apply_defaults(&mut self) {
        if self.providers.weather_base_url.is_empty() {
            self.providers.weather_base_url = default_weather_base_url();
        }
        if self.providers.routing_base_url.is_empty() {
            self.providers.routing_base_url = default_routing_base_url();
        }
        if self.providers.geocoding_base_url.is_empty() {
            self.providers.geocoding_base_url = default_geocoding_base_url();
        }
        if self.providers.user_agent.is_empty() {
            self.providers.user_agent = default_user_agent();
        }
        if self.providers.timeout_seconds == 0 {
            self.providers.timeout_seconds = default_timeout();
        }
        if self.providers.search_limit == 0 {
            self.providers.search_limit = default_search_limit();
        }
        if self.storage.location.is_empty() {
            self.storage.location = default_storage_location();
        }
        if self.storage.route_ttl_hours == 0 {
            self.storage.route_ttl_hours = default_route_ttl();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_default_locations()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.providers.timeout_seconds > 300 {
            return Err(CommuteError::config("Provider timeout cannot exceed 300 seconds").into());
        }

        if self.providers.max_retries > 10 {
            return Err(CommuteError::config("Provider max retries cannot exceed 10").into());
        }

        if !(1..=50).contains(&self.providers.search_limit) {
            return Err(CommuteError::config("Search limit must be between 1 and 50").into());
        }

        if self.storage.route_ttl_hours > 24 * 30 {
            return Err(CommuteError::config("Route cache TTL cannot exceed 720 hours (30 days)").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(CommuteError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(CommuteError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Weather", &self.providers.weather_base_url),
            ("Routing", &self.providers.routing_base_url),
            ("Geocoding", &self.providers.geocoding_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(CommuteError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }

    fn validate_default_locations(&self) -> Result<()> {
        self.defaults
            .home
            .validate()
            .with_context(|| "Invalid default home location")?;
        self.defaults
            .work
            .validate()
            .with_context(|| "Invalid default work location")?;
        Ok(())
    }
}
