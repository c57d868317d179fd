//! Data models for the tourism planner
//!
//! This module contains the core domain models organized by concern:
//! - Location: validated points, bounding extents and resolved places
//! - Weather: current conditions and their display sentinels
//! - Attraction: the curated attraction list
//! - Trip: the combined answer for one query

pub mod attraction;
pub mod location;
pub mod trip;
pub mod weather;

// Re-export all public types for convenient access
pub use attraction::{AttractionList, MAX_ATTRACTIONS};
pub use location::{BoundingExtent, GeoPoint, Resolution, ResolvedPlace};
pub use trip::TripPlan;
pub use weather::{CurrentWeather, WeatherReading};
