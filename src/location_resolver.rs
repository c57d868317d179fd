//! Location Resolution Module
//!
//! Turns a free-text place name into a [`ResolvedPlace`] through one of two
//! geocoding backends, then applies the preferred-country tie-break.

use crate::config::{GeocoderBackend, GeocodingConfig};
use crate::error::{ResolveError, UpstreamError};
use crate::http::HttpClient;
use crate::models::{BoundingExtent, GeoPoint, Resolution, ResolvedPlace};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// A geocoder hit before selection
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub display_name: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub extent: Option<BoundingExtent>,
}

impl Candidate {
    fn into_place(self) -> Result<ResolvedPlace, ResolveError> {
        let point = GeoPoint::new(self.latitude, self.longitude).ok_or(
            ResolveError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            },
        )?;

        let resolution = match self.extent {
            Some(extent) => Resolution::PointWithExtent { point, extent },
            None => Resolution::PointOnly { point },
        };

        Ok(ResolvedPlace {
            display_name: self.display_name,
            country: self.country,
            resolution,
        })
    }
}

/// A place-name search service
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Short name used in logs and errors
    fn service(&self) -> &'static str;

    /// Candidates in the service's own ranking order
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, UpstreamError>;
}

/// Pick the first candidate from `preferred_country`, else the first overall
#[must_use]
pub fn select_candidate<'a>(
    candidates: &'a [Candidate],
    preferred_country: Option<&str>,
) -> Option<&'a Candidate> {
    preferred_country
        .and_then(|preferred| {
            candidates
                .iter()
                .find(|candidate| candidate.country.as_deref() == Some(preferred))
        })
        .or_else(|| candidates.first())
}

/// Service for resolving place names
pub struct LocationResolver {
    geocoder: Box<dyn Geocoder>,
    preferred_country: Option<String>,
}

impl LocationResolver {
    pub fn new(geocoder: Box<dyn Geocoder>, preferred_country: Option<String>) -> Self {
        Self {
            geocoder,
            preferred_country,
        }
    }

    /// Build the resolver for the configured backend
    #[must_use]
    pub fn from_config(http: HttpClient, config: &GeocodingConfig) -> Self {
        let geocoder: Box<dyn Geocoder> = match config.backend {
            GeocoderBackend::OpenMeteo => Box::new(OpenMeteoGeocoder::new(http, config)),
            GeocoderBackend::Nominatim => Box::new(NominatimGeocoder::new(http, config)),
        };
        Self::new(geocoder, config.preferred_country.clone())
    }

    /// Resolve a place name to a single place
    #[instrument(skip(self), fields(service = self.geocoder.service()))]
    pub async fn resolve(&self, query: &str) -> Result<ResolvedPlace, ResolveError> {
        debug!("Geocoding location name: {}", query);
        let start = Instant::now();

        let candidates = self.geocoder.search(query).await?;
        let chosen = select_candidate(&candidates, self.preferred_country.as_deref())
            .cloned()
            .ok_or_else(|| {
                warn!("No results found for location '{}'", query);
                ResolveError::NotFound {
                    query: query.to_string(),
                }
            })?;

        let place = chosen.into_place()?;
        info!(
            "Resolved '{}' to {} ({}) from {} candidates in {:.3}s",
            query,
            place.display_name,
            place.point(),
            candidates.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(place)
    }
}

// ─── Open-Meteo ──────────────────────────────────────────────────

/// Open-Meteo name search; returns points only
pub struct OpenMeteoGeocoder {
    http: HttpClient,
    url: String,
    count: u32,
    language: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    #[serde(default)]
    results: Option<Vec<OpenMeteoResult>>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoResult {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    country: Option<String>,
}

impl From<OpenMeteoResult> for Candidate {
    fn from(result: OpenMeteoResult) -> Self {
        let display_name = match &result.country {
            Some(country) => format!("{}, {}", result.name, country),
            None => result.name,
        };
        Self {
            display_name,
            country: result.country,
            latitude: result.latitude,
            longitude: result.longitude,
            extent: None,
        }
    }
}

impl OpenMeteoGeocoder {
    #[must_use]
    pub fn new(http: HttpClient, config: &GeocodingConfig) -> Self {
        Self {
            http,
            url: config.open_meteo_url.clone(),
            count: config.result_count,
            language: config.language.clone(),
            timeout: config.timeout(),
        }
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    fn service(&self) -> &'static str {
        "open-meteo geocoding"
    }

    async fn search(&self, query: &str) -> Result<Vec<Candidate>, UpstreamError> {
        let count = self.count.to_string();
        let request = self.http.get(&self.url).query(&[
            ("name", query),
            ("count", count.as_str()),
            ("language", self.language.as_str()),
            ("format", "json"),
        ]);

        let response: OpenMeteoResponse = self
            .http
            .fetch_json(self.service(), request, self.timeout)
            .await?;

        Ok(response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(Candidate::from)
            .collect())
    }
}

// ─── Nominatim ───────────────────────────────────────────────────

/// OpenStreetMap Nominatim search; returns points with bounding boxes
pub struct NominatimGeocoder {
    http: HttpClient,
    url: String,
    limit: u32,
    language: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
    /// `[south, north, west, east]` as strings
    #[serde(default)]
    boundingbox: Option<Vec<String>>,
    #[serde(default)]
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    #[serde(default)]
    country: Option<String>,
}

fn parse_bounding_box(raw: &[String]) -> Option<BoundingExtent> {
    let [south, north, west, east] = raw else {
        return None;
    };
    BoundingExtent::new(
        south.trim().parse().ok()?,
        north.trim().parse().ok()?,
        west.trim().parse().ok()?,
        east.trim().parse().ok()?,
    )
}

impl NominatimResult {
    /// `None` when the coordinates are not numbers; an unusable bounding box
    /// only drops the extent.
    fn into_candidate(self) -> Option<Candidate> {
        let latitude = self.lat.trim().parse().ok()?;
        let longitude = self.lon.trim().parse().ok()?;
        let extent = self.boundingbox.as_deref().and_then(parse_bounding_box);
        if extent.is_none() {
            debug!("No usable bounding box for {}", self.display_name);
        }

        Some(Candidate {
            display_name: self.display_name,
            country: self.address.and_then(|address| address.country),
            latitude,
            longitude,
            extent,
        })
    }
}

impl NominatimGeocoder {
    #[must_use]
    pub fn new(http: HttpClient, config: &GeocodingConfig) -> Self {
        Self {
            http,
            url: config.nominatim_url.clone(),
            limit: config.result_count,
            language: config.language.clone(),
            timeout: config.timeout(),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    fn service(&self) -> &'static str {
        "nominatim"
    }

    async fn search(&self, query: &str) -> Result<Vec<Candidate>, UpstreamError> {
        let limit = self.limit.to_string();
        let request = self.http.get(&self.url).query(&[
            ("q", query),
            ("limit", limit.as_str()),
            ("format", "json"),
            ("addressdetails", "1"),
            ("accept-language", self.language.as_str()),
        ]);

        let results: Vec<NominatimResult> = self
            .http
            .fetch_json(self.service(), request, self.timeout)
            .await?;

        Ok(results
            .into_iter()
            .filter_map(NominatimResult::into_candidate)
            .collect())
    }
}
