//! Trip planning pipeline
//!
//! Resolve the place first; only when that succeeds are weather and
//! attractions fetched, concurrently and independently.

use crate::attractions::AttractionSearch;
use crate::config::PlannerConfig;
use crate::http::HttpClient;
use crate::location_resolver::LocationResolver;
use crate::models::TripPlan;
use crate::weather::WeatherClient;
use crate::{PlannerError, Result};
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Owns one client per upstream service
pub struct TripPlanner {
    resolver: LocationResolver,
    weather: WeatherClient,
    attractions: AttractionSearch,
}

impl TripPlanner {
    #[must_use]
    pub fn new(
        resolver: LocationResolver,
        weather: WeatherClient,
        attractions: AttractionSearch,
    ) -> Self {
        Self {
            resolver,
            weather,
            attractions,
        }
    }

    /// Wire up all three services from configuration
    pub fn from_config(config: &PlannerConfig) -> anyhow::Result<Self> {
        let http = HttpClient::new(&config.http)?;
        Ok(Self::new(
            LocationResolver::from_config(http.clone(), &config.geocoding),
            WeatherClient::new(http.clone(), &config.weather),
            AttractionSearch::new(http, &config.attractions),
        ))
    }

    /// Plan a trip for a free-text place name.
    ///
    /// Fails only for a blank query, before any request is made. Every
    /// upstream failure degrades the matching part of the plan instead.
    #[instrument(skip(self))]
    pub async fn plan_trip(&self, query: &str) -> Result<TripPlan> {
        if query.trim().is_empty() {
            return Err(PlannerError::validation("Location cannot be empty"));
        }
        let start = Instant::now();

        let place = match self.resolver.resolve(query).await {
            Ok(place) => place,
            Err(e) => {
                warn!("Could not locate '{}': {}", query, e);
                return Ok(TripPlan::NotFound {
                    query: query.to_string(),
                });
            }
        };

        let (weather, attractions) = tokio::join!(
            self.weather.reading(place.point()),
            self.attractions.attractions(&place.resolution),
        );

        info!(
            "Planned trip to {} in {:.3}s: weather {}, {} attractions",
            place.display_name,
            start.elapsed().as_secs_f64(),
            weather,
            attractions.len()
        );

        Ok(TripPlan::Located {
            query: query.to_string(),
            place,
            weather,
            attractions,
        })
    }
}
