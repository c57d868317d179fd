//! Error types for the tourism planner
//!
//! Each pipeline component returns its own typed error; the planner turns
//! those into display sentinels so nothing escapes a component boundary.

use reqwest::StatusCode;
use thiserror::Error;

/// Top-level error for the planner's public surface
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl PlannerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PlannerError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            PlannerError::Validation { message } => format!("Invalid input: {message}"),
            PlannerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

/// Failure talking to one of the upstream services
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("{service} request failed: {source}")]
    Network {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} responded with HTTP {status}")]
    Status {
        service: &'static str,
        status: StatusCode,
    },

    #[error("{service} returned an unreadable payload: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl UpstreamError {
    /// Name of the service that failed
    #[must_use]
    pub fn service(&self) -> &'static str {
        match self {
            Self::Network { service, .. }
            | Self::Status { service, .. }
            | Self::Decode { service, .. } => service,
        }
    }

    /// Whether the failure was the per-call timeout firing
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Network { source, .. } | Self::Decode { source, .. } => source.is_timeout(),
            Self::Status { .. } => false,
        }
    }
}

/// Resolver failures; all of them surface to users as "not found"
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Location not found: '{query}'")]
    NotFound { query: String },

    #[error("Geocoder returned coordinates out of range: ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Weather lookup failures
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Weather response has no current conditions")]
    MissingCurrent,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Attraction search failures
#[derive(Error, Debug)]
pub enum AttractionError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
