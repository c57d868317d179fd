use crate::config::WeatherConfig;
use crate::error::WeatherError;
use crate::http::HttpClient;
use crate::models::weather::weather_code_to_description;
use crate::models::{CurrentWeather, GeoPoint, WeatherReading};
use chrono::NaiveDateTime;
use std::time::Duration;
use tracing::{info, instrument, warn};

const SERVICE: &str = "open-meteo forecast";

/// Current conditions from the Open-Meteo forecast endpoint
pub struct WeatherClient {
    http: HttpClient,
    url: String,
    timeout: Duration,
}

impl WeatherClient {
    #[must_use]
    pub fn new(http: HttpClient, config: &WeatherConfig) -> Self {
        Self {
            http,
            url: config.url.clone(),
            timeout: config.timeout(),
        }
    }

    /// Fetch current weather for a point
    #[instrument(skip_all, fields(point = %point))]
    pub async fn current(&self, point: GeoPoint) -> Result<CurrentWeather, WeatherError> {
        let latitude = point.latitude().to_string();
        let longitude = point.longitude().to_string();
        let request = self.http.get(&self.url).query(&[
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("current_weather", "true"),
        ]);

        let response: openmeteo::ForecastResponse =
            self.http.fetch_json(SERVICE, request, self.timeout).await?;

        let current = response
            .into_current()
            .ok_or(WeatherError::MissingCurrent)?;
        info!(
            "Current temperature {:.1}°C ({})",
            current.temperature_c,
            current.conditions.as_deref().unwrap_or("unknown conditions")
        );
        Ok(current)
    }

    /// Like [`Self::current`], folded into the display sentinel
    pub async fn reading(&self, point: GeoPoint) -> WeatherReading {
        match self.current(point).await {
            Ok(current) => WeatherReading::Current(current),
            Err(WeatherError::MissingCurrent) => {
                warn!("Weather response for {} had no current conditions", point);
                WeatherReading::NotApplicable
            }
            Err(WeatherError::Upstream(e)) if e.is_timeout() => {
                warn!("{} timed out after {:?} for {}", e.service(), self.timeout, point);
                WeatherReading::Unavailable
            }
            Err(WeatherError::Upstream(e)) => {
                warn!("Weather lookup failed for {}: {}", point, e);
                WeatherReading::Unavailable
            }
        }
    }
}

/// `OpenMeteo` API response structures
mod openmeteo {
    use super::{CurrentWeather, NaiveDateTime, weather_code_to_description};
    use serde::Deserialize;
    use serde_json::Value;

    /// Forecast response when only `current_weather=true` is requested
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        #[serde(default)]
        pub current_weather: Option<CurrentWeatherData>,
    }

    /// Only `temperature` is decoded strictly; the extras are dropped when
    /// their type is off.
    #[derive(Debug, Deserialize)]
    pub struct CurrentWeatherData {
        #[serde(default)]
        pub temperature: Option<f64>,
        #[serde(default)]
        pub windspeed: Option<Value>,
        #[serde(default)]
        pub weathercode: Option<Value>,
        #[serde(default)]
        pub time: Option<Value>,
    }

    fn weather_code(value: &Value) -> Option<u8> {
        let code = value.as_f64()?;
        (code.fract() == 0.0)
            .then_some(code)
            .and_then(|code| u8::try_from(code as i64).ok())
    }

    impl ForecastResponse {
        /// `None` when the current block or its temperature is missing
        pub fn into_current(self) -> Option<CurrentWeather> {
            let data = self.current_weather?;
            let temperature_c = data.temperature?;
            Some(CurrentWeather {
                temperature_c,
                wind_speed_kmh: data.windspeed.as_ref().and_then(Value::as_f64),
                conditions: data
                    .weathercode
                    .as_ref()
                    .and_then(weather_code)
                    .map(|code| weather_code_to_description(code).to_string()),
                observed_at: data
                    .time
                    .as_ref()
                    .and_then(Value::as_str)
                    .and_then(|t| NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M").ok()),
            })
        }
    }
}
