//! Configuration management for the tourism planner
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::PlannerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Outbound request identification
    #[serde(default)]
    pub http: HttpConfig,
    /// Place-name resolution
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Current weather lookup
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Attraction search
    #[serde(default)]
    pub attractions: AttractionsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Embedded HTTP server
    #[serde(default)]
    pub server: ServerConfig,
}

/// Headers sent with every upstream request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Identifying client string required by upstream fair-use policies
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Referring origin, for services that ask for one
    #[serde(default)]
    pub referer: Option<String>,
}

/// Which geocoding service resolves place names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeocoderBackend {
    /// Name search returning a point only
    OpenMeteo,
    /// Search returning a point plus bounding rectangle
    Nominatim,
}

impl std::str::FromStr for GeocoderBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open-meteo" | "openmeteo" => Ok(Self::OpenMeteo),
            "nominatim" => Ok(Self::Nominatim),
            other => Err(format!(
                "Unknown geocoder '{other}'. Use 'open-meteo' or 'nominatim'."
            )),
        }
    }
}

/// Geocoding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    #[serde(default = "default_geocoder_backend")]
    pub backend: GeocoderBackend,
    /// Open-Meteo search endpoint
    #[serde(default = "default_open_meteo_geocoding_url")]
    pub open_meteo_url: String,
    /// Nominatim search endpoint
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,
    /// Number of candidates requested from the geocoder
    #[serde(default = "default_result_count")]
    pub result_count: u32,
    /// Candidates from this country win the tie-break; `None` disables it
    #[serde(default = "default_preferred_country")]
    pub preferred_country: Option<String>,
    /// Language requested for place names
    #[serde(default = "default_language")]
    pub language: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_ms: u64,
}

/// Weather API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Forecast endpoint
    #[serde(default = "default_weather_url")]
    pub url: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_ms: u64,
}

/// Attraction search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttractionsConfig {
    /// Overpass interpreter endpoint
    #[serde(default = "default_overpass_url")]
    pub url: String,
    /// Search radius in meters when the place has no bounding extent
    #[serde(default = "default_radius")]
    pub radius_m: u32,
    /// Raw results requested from Overpass
    #[serde(default = "default_raw_limit")]
    pub raw_limit: u32,
    /// Drop names that look like lodging ("hotel", "guest")
    #[serde(default = "default_exclude_lodging")]
    pub exclude_lodging: bool,
    /// Request timeout in milliseconds
    #[serde(default = "default_attractions_timeout")]
    pub timeout_ms: u64,
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

/// Embedded server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Whole-request timeout for inbound requests, in seconds
    #[serde(default = "default_server_timeout")]
    pub request_timeout_seconds: u64,
}

/// Upper bound for the geocoding and weather timeouts
pub const MAX_SHORT_TIMEOUT_MS: u64 = 5_000;
/// Upper bound for the attraction search timeout
pub const MAX_SEARCH_TIMEOUT_MS: u64 = 15_000;

// Default value functions
fn default_user_agent() -> String {
    "TourismPlanner/0.1 (contact@example.com)".to_string()
}

fn default_geocoder_backend() -> GeocoderBackend {
    GeocoderBackend::OpenMeteo
}

fn default_open_meteo_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_nominatim_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

fn default_result_count() -> u32 {
    10
}

fn default_preferred_country() -> Option<String> {
    Some("India".to_string())
}

fn default_language() -> String {
    "en".to_string()
}

fn default_geocoding_timeout() -> u64 {
    5_000
}

fn default_weather_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_weather_timeout() -> u64 {
    5_000
}

fn default_overpass_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_radius() -> u32 {
    30_000
}

fn default_raw_limit() -> u32 {
    20
}

fn default_exclude_lodging() -> bool {
    true
}

fn default_attractions_timeout() -> u64 {
    15_000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_server_timeout() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            referer: None,
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            backend: default_geocoder_backend(),
            open_meteo_url: default_open_meteo_geocoding_url(),
            nominatim_url: default_nominatim_url(),
            result_count: default_result_count(),
            preferred_country: default_preferred_country(),
            language: default_language(),
            timeout_ms: default_geocoding_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            url: default_weather_url(),
            timeout_ms: default_weather_timeout(),
        }
    }
}

impl Default for AttractionsConfig {
    fn default() -> Self {
        Self {
            url: default_overpass_url(),
            radius_m: default_radius(),
            raw_limit: default_raw_limit(),
            exclude_lodging: default_exclude_lodging(),
            timeout_ms: default_attractions_timeout(),
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
            host: default_server_host(),
            port: default_server_port(),
            request_timeout_seconds: default_server_timeout(),
        }
    }
}

impl GeocodingConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl WeatherConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl AttractionsConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl PlannerConfig {
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

        // Environment overrides, e.g. TOURPLAN_GEOCODING__PREFERRED_COUNTRY
        builder = builder.add_source(
            Environment::with_prefix("TOURPLAN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: PlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tourplan").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.geocoding.timeout_ms == 0 || self.geocoding.timeout_ms > MAX_SHORT_TIMEOUT_MS {
            return Err(PlannerError::config(format!(
                "Geocoding timeout must be between 1 and {MAX_SHORT_TIMEOUT_MS} ms"
            ))
            .into());
        }

        if self.weather.timeout_ms == 0 || self.weather.timeout_ms > MAX_SHORT_TIMEOUT_MS {
            return Err(PlannerError::config(format!(
                "Weather timeout must be between 1 and {MAX_SHORT_TIMEOUT_MS} ms"
            ))
            .into());
        }

        if self.attractions.timeout_ms == 0 || self.attractions.timeout_ms > MAX_SEARCH_TIMEOUT_MS
        {
            return Err(PlannerError::config(format!(
                "Attraction search timeout must be between 1 and {MAX_SEARCH_TIMEOUT_MS} ms"
            ))
            .into());
        }

        if !(1..=100).contains(&self.geocoding.result_count) {
            return Err(
                PlannerError::config("Geocoding result count must be between 1 and 100").into(),
            );
        }

        if !(1..=100_000).contains(&self.attractions.radius_m) {
            return Err(
                PlannerError::config("Search radius must be between 1 and 100000 meters").into(),
            );
        }

        if !(1..=100).contains(&self.attractions.raw_limit) {
            return Err(
                PlannerError::config("Raw attraction limit must be between 1 and 100").into(),
            );
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let endpoints = [
            ("geocoding.open_meteo_url", &self.geocoding.open_meteo_url),
            ("geocoding.nominatim_url", &self.geocoding.nominatim_url),
            ("weather.url", &self.weather.url),
            ("attractions.url", &self.attractions.url),
        ];
        for (key, url) in endpoints {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(
                    PlannerError::config(format!("{key} must be a valid HTTP or HTTPS URL")).into(),
                );
            }
        }

        if self.http.user_agent.trim().is_empty() {
            return Err(PlannerError::config("http.user_agent cannot be empty").into());
        }

        Ok(())
    }
}
