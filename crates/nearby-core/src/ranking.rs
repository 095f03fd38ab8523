//! Ordering predicates for place lists.
//!
//! Each comparator answers "should `a` be listed before `b`?". Rating and
//! open-now are not strict total orders: two unrated places, or two places
//! with the same (or unknown) open status, are "not before" each other in
//! either direction. Sorting is stable, so such pairs keep their input order.

use std::cmp::Ordering;

use thiserror::Error;

use crate::places::PlaceRecord;

/// `a` before `b` when `a` has the higher rating. Missing ratings count as 0.
#[must_use]
pub fn by_rating(a: &PlaceRecord, b: &PlaceRecord) -> bool {
    a.rating.unwrap_or(0.0) > b.rating.unwrap_or(0.0)
}

/// Ascending by name in code-point order, without locale folding.
#[must_use]
pub fn by_name(a: &PlaceRecord, b: &PlaceRecord) -> bool {
    a.name < b.name
}

/// Open before closed, unknown before closed. Nothing else is "before".
#[must_use]
pub fn by_open_now(a: &PlaceRecord, b: &PlaceRecord) -> bool {
    matches!((a.open_now, b.open_now), (Some(true) | None, Some(false)))
}

/// Ascending by distance. Missing distances count as 0 and sort first.
#[must_use]
pub fn by_distance(a: &PlaceRecord, b: &PlaceRecord) -> bool {
    a.distance_meters.unwrap_or(0.0) < b.distance_meters.unwrap_or(0.0)
}

/// User-selectable list ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Rating,
    Name,
    OpenNow,
    Distance,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Rating,
        SortKey::Name,
        SortKey::OpenNow,
        SortKey::Distance,
    ];

    /// The "is before" predicate for this key.
    #[must_use]
    pub fn predicate(self) -> fn(&PlaceRecord, &PlaceRecord) -> bool {
        match self {
            SortKey::Rating => by_rating,
            SortKey::Name => by_name,
            SortKey::OpenNow => by_open_now,
            SortKey::Distance => by_distance,
        }
    }

    /// Three-way comparison derived from the predicate.
    #[must_use]
    pub fn compare(self, a: &PlaceRecord, b: &PlaceRecord) -> Ordering {
        let before = self.predicate();
        if before(a, b) {
            Ordering::Less
        } else if before(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Stable in-place sort of `places` by this key.
    pub fn sort(self, places: &mut [PlaceRecord]) {
        places.sort_by(|a, b| self.compare(a, b));
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Rating => write!(f, "rating"),
            SortKey::Name => write!(f, "name"),
            SortKey::OpenNow => write!(f, "open-now"),
            SortKey::Distance => write!(f, "distance"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key '{0}' (expected rating, name, open-now or distance)")]
pub struct ParseSortKeyError(pub String);

impl std::str::FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rating" => Ok(SortKey::Rating),
            "name" => Ok(SortKey::Name),
            "open-now" | "open_now" | "opennow" => Ok(SortKey::OpenNow),
            "distance" => Ok(SortKey::Distance),
            _ => Err(ParseSortKeyError(s.to_owned())),
        }
    }
}
