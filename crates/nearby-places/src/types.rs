//! Places API response types.
//!
//! The API wraps every response in a `{"status": "OK", ...}` envelope. Only the
//! fields the client actually uses are modelled; unknown fields are ignored.

use chrono::{DateTime, Utc};
use nearby_core::{Coordinate, PlaceRecord};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// nearbysearch
// ---------------------------------------------------------------------------

/// Body of a nearby-search response.
#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    /// Envelope status, checked on the raw body before decoding. May be absent.
    #[serde(default)]
    pub status: Option<String>,
    /// Present when more results exist. Never followed.
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
}

/// One entry of `results` in a nearby-search response.
#[derive(Debug, Deserialize)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: String,
    pub geometry: Geometry,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
    #[serde(default)]
    pub vicinity: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
}

impl From<PlaceResult> for PlaceRecord {
    fn from(result: PlaceResult) -> Self {
        let location = result.geometry.location;
        PlaceRecord {
            id: result.place_id,
            name: result.name,
            coordinate: Coordinate::new(location.lat, location.lng),
            rating: result.rating,
            rating_count: result.user_ratings_total,
            categories: result.types.into_iter().collect(),
            open_now: result.opening_hours.and_then(|h| h.open_now),
            distance_meters: None,
            vicinity: result.vicinity,
            photo_reference: result.photos.into_iter().next().map(|p| p.photo_reference),
        }
    }
}

// ---------------------------------------------------------------------------
// details
// ---------------------------------------------------------------------------

/// Body of a place-details response: `{ "result": { ... } }`.
#[derive(Debug, Deserialize)]
pub struct PlaceDetailsResponse {
    #[serde(default)]
    pub status: Option<String>,
    pub result: PlaceDetailRecord,
}

/// Detail payload for a single place, fetched on demand by place id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceDetailRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
}

impl PlaceDetailRecord {
    /// Address assembled from the component long names, in provider order.
    #[must_use]
    pub fn address(&self) -> Option<String> {
        if self.address_components.is_empty() {
            return None;
        }
        Some(
            self.address_components
                .iter()
                .map(|c| c.long_name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub author_name: String,
    /// 1–5 stars.
    pub rating: u8,
    #[serde(default)]
    pub relative_time_description: Option<String>,
    #[serde(default)]
    pub text: String,
    /// Unix timestamp in seconds.
    pub time: i64,
}

impl Review {
    /// Review timestamp as UTC, or `None` if out of range.
    #[must_use]
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }
}

/// Photo handle; the reference is turned into a URL by
/// [`crate::PlacesClient::photo_url`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoRef {
    pub photo_reference: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}
