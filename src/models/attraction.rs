//! Curated list of nearby attractions

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Most attractions ever shown for one place
pub const MAX_ATTRACTIONS: usize = 5;

/// Substrings marking lodging that OpenStreetMap sometimes tags as an attraction
const LODGING_MARKERS: [&str; 2] = ["hotel", "guest"];

/// Up to five unique, non-blank attraction names in first-seen order
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(try_from = "Vec<String>")]
pub struct AttractionList(Vec<String>);

impl AttractionList {
    /// Build a list from raw names: blanks and (optionally) lodging are
    /// dropped, duplicates collapse onto their first occurrence, and the
    /// result is cut to [`MAX_ATTRACTIONS`].
    pub fn curate<I>(raw_names: I, exclude_lodging: bool) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut seen = HashSet::new();
        let names = raw_names
            .into_iter()
            .map(Into::<String>::into)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .filter(|name| !(exclude_lodging && looks_like_lodging(name)))
            .filter(|name| seen.insert(name.clone()))
            .take(MAX_ATTRACTIONS)
            .collect();
        Self(names)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Decoding accepts only a list that curation would leave unchanged
impl TryFrom<Vec<String>> for AttractionList {
    type Error = String;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        let curated = Self::curate(names.iter().map(String::as_str), false);
        if curated.0 == names {
            Ok(curated)
        } else {
            Err(format!(
                "expected at most {MAX_ATTRACTIONS} unique, trimmed, non-blank names"
            ))
        }
    }
}

fn looks_like_lodging(name: &str) -> bool {
    let lower = name.to_lowercase();
    LODGING_MARKERS.iter().any(|marker| lower.contains(marker))
}
