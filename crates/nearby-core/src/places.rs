use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::Coordinate;

/// Place type used as a nearby-search filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bar,
    Cafe,
    Restaurant,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Bar, Category::Cafe, Category::Restaurant];

    /// Wire name sent as the `type` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Bar => "bar",
            Category::Cafe => "cafe",
            Category::Restaurant => "restaurant",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown place category '{0}' (expected bar, cafe or restaurant)")]
pub struct ParseCategoryError(pub String);

impl std::str::FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(Category::Bar),
            "cafe" => Ok(Category::Cafe),
            "restaurant" => Ok(Category::Restaurant),
            _ => Err(ParseCategoryError(s.to_owned())),
        }
    }
}

/// One point of interest returned by a nearby search.
///
/// Identity is the provider's place id: two records with the same `id` are
/// equal (and hash equally) even when every other field differs. This is what
/// collapses a place found under several categories into one entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    pub categories: BTreeSet<String>,
    /// `None` when the provider reports no opening hours.
    pub open_now: Option<bool>,
    /// Set once by the aggregator, relative to the query origin.
    pub distance_meters: Option<f64>,
    pub vicinity: Option<String>,
    pub photo_reference: Option<String>,
}

impl PlaceRecord {
    /// Minimal record with only the identifying fields populated.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinate,
            rating: None,
            rating_count: None,
            categories: BTreeSet::new(),
            open_now: None,
            distance_meters: None,
            vicinity: None,
            photo_reference: None,
        }
    }
}

impl PartialEq for PlaceRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PlaceRecord {}

impl Hash for PlaceRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Input to one aggregation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub origin: Coordinate,
    pub radius_meters: u32,
    pub categories: BTreeSet<Category>,
}

impl SearchQuery {
    #[must_use]
    pub fn new(
        origin: Coordinate,
        radius_meters: u32,
        categories: impl IntoIterator<Item = Category>,
    ) -> Self {
        Self {
            origin,
            radius_meters,
            categories: categories.into_iter().collect(),
        }
    }
}
