//! `tourism-planner` - resolve a place, check its weather, list nearby attractions
//!
//! This library wraps three public services (a geocoder, Open-Meteo weather
//! and the OpenStreetMap Overpass API) behind a single [`TripPlanner::plan_trip`]
//! call that always produces a display-ready [`TripPlan`].

pub mod api;
pub mod attractions;
pub mod config;
pub mod error;
pub mod http;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod planner;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use attractions::{AttractionSearch, SearchArea};
pub use config::{GeocoderBackend, PlannerConfig};
pub use error::{AttractionError, PlannerError, ResolveError, UpstreamError, WeatherError};
pub use location_resolver::{Geocoder, LocationResolver};
pub use models::{AttractionList, GeoPoint, ResolvedPlace, TripPlan, WeatherReading};
pub use planner::TripPlanner;
pub use weather::WeatherClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlannerError>;
