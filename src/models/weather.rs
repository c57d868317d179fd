//! Current weather model and display

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current conditions at a point
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentWeather {
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Wind speed in km/h
    pub wind_speed_kmh: Option<f64>,
    /// Human-readable description of weather conditions
    pub conditions: Option<String>,
    /// Local observation time reported by the service
    pub observed_at: Option<NaiveDateTime>,
}

/// What the weather lookup shows the user
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeatherReading {
    Current(CurrentWeather),
    /// The service answered, but without current conditions
    NotApplicable,
    /// The service could not be reached or answered garbage
    Unavailable,
}

impl WeatherReading {
    /// Temperature string such as "24.3°C", or the sentinel text
    #[must_use]
    pub fn display_temperature(&self) -> String {
        match self {
            Self::Current(current) => format!("{:.1}°C", current.temperature_c),
            Self::NotApplicable => "N/A".to_string(),
            Self::Unavailable => "Unavailable".to_string(),
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Current(_))
    }
}

impl fmt::Display for WeatherReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_temperature())
    }
}

/// Convert a WMO weather code to a human-readable description
#[must_use]
pub fn weather_code_to_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}
