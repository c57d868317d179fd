//! Overpass QL construction for attraction searches

use crate::models::{BoundingExtent, GeoPoint, Resolution};
use std::fmt::Write;

/// Server-side evaluation limit, in seconds, written into every query
pub const OVERPASS_QUERY_TIMEOUT_SECS: u32 = 25;

/// OpenStreetMap tag families an attraction may come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey {
    Tourism,
    Historic,
    Natural,
}

impl TagKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tourism => "tourism",
            Self::Historic => "historic",
            Self::Natural => "natural",
        }
    }
}

/// The fixed allow-list of attraction categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Museum,
    Zoo,
    ThemePark,
    Aquarium,
    Gallery,
    Viewpoint,
    Artwork,
    Castle,
    Monument,
    Ruins,
    Fort,
    Memorial,
    Beach,
}

impl Category {
    #[must_use]
    pub fn tag_key(self) -> TagKey {
        match self {
            Self::Museum
            | Self::Zoo
            | Self::ThemePark
            | Self::Aquarium
            | Self::Gallery
            | Self::Viewpoint
            | Self::Artwork => TagKey::Tourism,
            Self::Castle | Self::Monument | Self::Ruins | Self::Fort | Self::Memorial => {
                TagKey::Historic
            }
            Self::Beach => TagKey::Natural,
        }
    }

    #[must_use]
    pub fn tag_value(self) -> &'static str {
        match self {
            Self::Museum => "museum",
            Self::Zoo => "zoo",
            Self::ThemePark => "theme_park",
            Self::Aquarium => "aquarium",
            Self::Gallery => "gallery",
            Self::Viewpoint => "viewpoint",
            Self::Artwork => "artwork",
            Self::Castle => "castle",
            Self::Monument => "monument",
            Self::Ruins => "ruins",
            Self::Fort => "fort",
            Self::Memorial => "memorial",
            Self::Beach => "beach",
        }
    }
}

/// Categories searched around a point
pub const AROUND_CATEGORIES: &[Category] = &[
    Category::Museum,
    Category::Zoo,
    Category::ThemePark,
    Category::Aquarium,
    Category::Gallery,
    Category::Castle,
    Category::Monument,
    Category::Ruins,
    Category::Fort,
    Category::Memorial,
    Category::Beach,
];

/// Categories searched inside a place's bounding extent
pub const WITHIN_CATEGORIES: &[Category] = &[
    Category::Museum,
    Category::Zoo,
    Category::ThemePark,
    Category::Aquarium,
    Category::Gallery,
    Category::Viewpoint,
    Category::Artwork,
    Category::Castle,
    Category::Monument,
    Category::Ruins,
    Category::Fort,
    Category::Memorial,
];

/// The spatial predicate of one search; exactly one per query
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchArea {
    Around { center: GeoPoint, radius_m: u32 },
    Within(BoundingExtent),
}

impl SearchArea {
    /// Containment when the geocoder gave an extent, radius otherwise
    #[must_use]
    pub fn for_resolution(resolution: &Resolution, radius_m: u32) -> Self {
        match resolution {
            Resolution::PointWithExtent { extent, .. } => Self::Within(*extent),
            Resolution::PointOnly { point } => Self::Around {
                center: *point,
                radius_m,
            },
        }
    }

    #[must_use]
    pub fn categories(&self) -> &'static [Category] {
        match self {
            Self::Around { .. } => AROUND_CATEGORIES,
            Self::Within(_) => WITHIN_CATEGORIES,
        }
    }

    fn filter(&self) -> String {
        match self {
            Self::Around { center, radius_m } => format!(
                "(around:{},{},{})",
                radius_m,
                center.latitude(),
                center.longitude()
            ),
            // Overpass bbox order is south,west,north,east
            Self::Within(extent) => format!(
                "({},{},{},{})",
                extent.south(),
                extent.west(),
                extent.north(),
                extent.east()
            ),
        }
    }
}

/// Build the Overpass QL payload for `area`, capped at `raw_limit` elements
#[must_use]
pub fn build_query(area: &SearchArea, raw_limit: u32) -> String {
    let filter = area.filter();
    let mut query = format!("[out:json][timeout:{OVERPASS_QUERY_TIMEOUT_SECS}];\n(\n");

    for key in [TagKey::Tourism, TagKey::Historic, TagKey::Natural] {
        let values: Vec<&str> = area
            .categories()
            .iter()
            .filter(|category| category.tag_key() == key)
            .map(|category| category.tag_value())
            .collect();

        let selector = match values.as_slice() {
            [] => continue,
            [single] => format!("[\"{}\"=\"{}\"]", key.as_str(), single),
            many => format!("[\"{}\"~\"^({})$\"]", key.as_str(), many.join("|")),
        };
        // writing to a String cannot fail
        let _ = writeln!(query, "  nwr{selector}{filter};");
    }

    let _ = write!(query, ");\nout center {raw_limit};");
    query
}
