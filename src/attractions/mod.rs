//! Attraction search
//!
//! Queries the OpenStreetMap Overpass API for named tourism, historic and
//! natural features inside a [`SearchArea`] and curates the names into an
//! [`AttractionList`].

pub mod query;

pub use query::{Category, SearchArea, TagKey, build_query};

use crate::config::AttractionsConfig;
use crate::error::AttractionError;
use crate::http::HttpClient;
use crate::models::{AttractionList, Resolution};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

const SERVICE: &str = "overpass";

/// Overpass interpreter response
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(default)]
    tags: HashMap<String, String>,
}

impl OverpassResponse {
    fn names(self) -> impl Iterator<Item = String> {
        self.elements
            .into_iter()
            .filter_map(|mut element| element.tags.remove("name"))
    }
}

/// Overpass client with the configured search strategy
pub struct AttractionSearch {
    http: HttpClient,
    url: String,
    radius_m: u32,
    raw_limit: u32,
    exclude_lodging: bool,
    timeout: Duration,
}

impl AttractionSearch {
    #[must_use]
    pub fn new(http: HttpClient, config: &AttractionsConfig) -> Self {
        Self {
            http,
            url: config.url.clone(),
            radius_m: config.radius_m,
            raw_limit: config.raw_limit,
            exclude_lodging: config.exclude_lodging,
            timeout: config.timeout(),
        }
    }

    /// Search area for a resolved place
    #[must_use]
    pub fn area_for(&self, resolution: &Resolution) -> SearchArea {
        SearchArea::for_resolution(resolution, self.radius_m)
    }

    /// Run one Overpass query and curate the names it returns
    #[instrument(skip(self))]
    pub async fn search(&self, area: &SearchArea) -> Result<AttractionList, AttractionError> {
        let start = Instant::now();
        let query = build_query(area, self.raw_limit);
        debug!("Overpass query:\n{}", query);

        let request = self.http.post(&self.url).form(&[("data", query.as_str())]);
        let response: OverpassResponse =
            self.http.fetch_json(SERVICE, request, self.timeout).await?;

        let raw_count = response.elements.len();
        let attractions = AttractionList::curate(response.names(), self.exclude_lodging);
        info!(
            "Kept {} of {} Overpass elements in {:.3}s",
            attractions.len(),
            raw_count,
            start.elapsed().as_secs_f64()
        );
        Ok(attractions)
    }

    /// Like [`Self::search`], with failures folded into an empty list
    pub async fn attractions(&self, resolution: &Resolution) -> AttractionList {
        let area = self.area_for(resolution);
        match self.search(&area).await {
            Ok(list) => list,
            Err(AttractionError::Upstream(e)) if e.is_timeout() => {
                warn!("{} timed out after {:?}", e.service(), self.timeout);
                AttractionList::empty()
            }
            Err(e) => {
                warn!("Attraction search failed: {}", e);
                AttractionList::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_skip_untagged_elements() {
        let response: OverpassResponse = serde_json::from_value(serde_json::json!({
            "version": 0.6,
            "elements": [
                { "type": "node", "id": 1, "tags": { "name": "Hill Palace Museum", "tourism": "museum" } },
                { "type": "node", "id": 2 },
                { "type": "way", "id": 3, "tags": { "historic": "ruins" } },
                { "type": "relation", "id": 4, "tags": { "name": "Fort Kochi Beach" } }
            ]
        }))
        .unwrap();

        let names: Vec<String> = response.names().collect();
        assert_eq!(names, ["Hill Palace Museum", "Fort Kochi Beach"]);
    }

    #[test]
    fn test_missing_elements_field() {
        let response: OverpassResponse =
            serde_json::from_value(serde_json::json!({ "remark": "runtime error" })).unwrap();
        assert_eq!(response.names().count(), 0);
    }

    #[test]
    fn test_raw_response_is_curated() {
        let response: OverpassResponse = serde_json::from_value(serde_json::json!({
            "elements": [
                { "tags": { "name": "Hotel Grand View" } },
                { "tags": { "name": "City Museum" } },
                { "tags": { "name": "City Museum" } },
                { "tags": { "name": "Green Guest House" } },
                { "tags": { "name": "Marine Drive" } }
            ]
        }))
        .unwrap();

        let list = AttractionList::curate(response.names(), true);
        assert_eq!(list.names(), ["City Museum", "Marine Drive"]);
    }
}
