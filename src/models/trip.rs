//! Result of planning a trip for one query

use super::{AttractionList, ResolvedPlace, WeatherReading};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TripPlan {
    /// The place resolved; weather and attractions degrade independently
    Located {
        query: String,
        place: ResolvedPlace,
        weather: WeatherReading,
        attractions: AttractionList,
    },
    /// Nothing matched, or the geocoder failed
    NotFound { query: String },
}

impl TripPlan {
    #[must_use]
    pub fn query(&self) -> &str {
        match self {
            Self::Located { query, .. } | Self::NotFound { query } => query,
        }
    }

    #[must_use]
    pub fn is_located(&self) -> bool {
        matches!(self, Self::Located { .. })
    }
}
