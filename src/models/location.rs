//! Geographic types produced by the resolver

use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated point in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(try_from = "RawPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Create a point, or `None` when either coordinate is out of range
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        (valid_latitude(latitude) && valid_longitude(longitude)).then_some(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[derive(Deserialize)]
struct RawPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawPoint> for GeoPoint {
    type Error = String;

    fn try_from(raw: RawPoint) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude).ok_or_else(|| {
            format!(
                "coordinates out of range: ({}, {})",
                raw.latitude, raw.longitude
            )
        })
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_coordinates())
    }
}

/// A place's official rectangle
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(try_from = "RawExtent")]
pub struct BoundingExtent {
    south: f64,
    north: f64,
    west: f64,
    east: f64,
}

impl BoundingExtent {
    /// Create an extent, or `None` if any edge is out of range or south > north.
    /// West may exceed east for rectangles crossing the antimeridian.
    #[must_use]
    pub fn new(south: f64, north: f64, west: f64, east: f64) -> Option<Self> {
        let valid = valid_latitude(south)
            && valid_latitude(north)
            && valid_longitude(west)
            && valid_longitude(east)
            && south <= north;
        valid.then_some(Self {
            south,
            north,
            west,
            east,
        })
    }

    #[must_use]
    pub fn south(&self) -> f64 {
        self.south
    }

    #[must_use]
    pub fn north(&self) -> f64 {
        self.north
    }

    #[must_use]
    pub fn west(&self) -> f64 {
        self.west
    }

    #[must_use]
    pub fn east(&self) -> f64 {
        self.east
    }
}

#[derive(Deserialize)]
struct RawExtent {
    south: f64,
    north: f64,
    west: f64,
    east: f64,
}

impl TryFrom<RawExtent> for BoundingExtent {
    type Error = String;

    fn try_from(raw: RawExtent) -> Result<Self, Self::Error> {
        Self::new(raw.south, raw.north, raw.west, raw.east).ok_or_else(|| {
            format!(
                "invalid extent: south {} north {} west {} east {}",
                raw.south, raw.north, raw.west, raw.east
            )
        })
    }
}

/// What the geocoder told us about a place's geometry
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    PointOnly { point: GeoPoint },
    PointWithExtent { point: GeoPoint, extent: BoundingExtent },
}

impl Resolution {
    #[must_use]
    pub fn point(&self) -> GeoPoint {
        match self {
            Self::PointOnly { point } | Self::PointWithExtent { point, .. } => *point,
        }
    }

    #[must_use]
    pub fn extent(&self) -> Option<BoundingExtent> {
        match self {
            Self::PointOnly { .. } => None,
            Self::PointWithExtent { extent, .. } => Some(*extent),
        }
    }
}

/// The resolver's answer for one query
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResolvedPlace {
    /// Name shown to the user, e.g. "Munnar, India"
    pub display_name: String,
    /// Country as reported by the geocoder
    pub country: Option<String>,
    pub resolution: Resolution,
}

impl ResolvedPlace {
    #[must_use]
    pub fn point(&self) -> GeoPoint {
        self.resolution.point()
    }
}

fn valid_latitude(value: f64) -> bool {
    value.is_finite() && (-90.0..=90.0).contains(&value)
}

fn valid_longitude(value: f64) -> bool {
    value.is_finite() && (-180.0..=180.0).contains(&value)
}
