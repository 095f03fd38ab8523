//! Nearby-search, details and photo endpoints.

use nearby_core::{Category, Coordinate, PlaceRecord};
use reqwest::Url;

use crate::error::PlacesError;
use crate::request::ApiRequest;
use crate::types::{NearbySearchResponse, PlaceDetailRecord, PlaceDetailsResponse};

use super::PlacesClient;

const NEARBY_SEARCH_PATH: &str = "/maps/api/place/nearbysearch/json";
const DETAILS_PATH: &str = "/maps/api/place/details/json";
const PHOTO_PATH: &str = "/maps/api/place/photo";

const DETAIL_FIELDS: &[&str] = &[
    "international_phone_number",
    "address_components",
    "reviews",
    "photos",
];

impl PlacesClient {
    /// Searches for places of one `category` within `radius_meters` of `origin`.
    ///
    /// Only the first result page is returned. Each record's `categories`
    /// includes the searched category in addition to the provider's types.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] if the provider envelope status is not OK.
    /// - Any error from [`PlacesClient::fetch`].
    pub async fn search_nearby(
        &self,
        origin: Coordinate,
        radius_meters: u32,
        category: Category,
    ) -> Result<Vec<PlaceRecord>, PlacesError> {
        let request = ApiRequest::<serde_json::Value>::get(NEARBY_SEARCH_PATH)
            .query("key", self.api_key.as_str())
            .query("location", origin.to_string())
            .query("radius", radius_meters.to_string())
            .query("type", category.as_str());

        let body = self.fetch(&request).await?;
        check_api_status(&body)?;

        let response: NearbySearchResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("nearbysearch(type={category})"),
                source: e,
            })?;

        if response.next_page_token.is_some() {
            tracing::debug!(%category, "more results available; next page not requested");
        }

        let places = response
            .results
            .into_iter()
            .map(|result| {
                let mut place = PlaceRecord::from(result);
                place.categories.insert(category.as_str().to_owned());
                place
            })
            .collect::<Vec<_>>();

        tracing::debug!(%category, count = places.len(), "nearby search completed");
        Ok(places)
    }

    /// Fetches the detail record (phone, address, reviews, photos) for one place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] if the provider envelope status is not OK
    ///   (e.g. `NOT_FOUND` for an unknown id).
    /// - Any error from [`PlacesClient::fetch`].
    pub async fn get_place_details(&self, place_id: &str) -> Result<PlaceDetailRecord, PlacesError> {
        let request = ApiRequest::<serde_json::Value>::get(DETAILS_PATH)
            .query("key", self.api_key.as_str())
            .query("place_id", place_id)
            .query("fields", DETAIL_FIELDS.join(","));

        let body = self.fetch(&request).await?;
        check_api_status(&body)?;

        let response: PlaceDetailsResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("details(place_id={place_id})"),
                source: e,
            })?;

        Ok(response.result)
    }

    /// URL of the photo for `photo_reference`, limited to the configured width.
    ///
    /// The URL embeds the API key; it is meant to be handed to an image loader,
    /// not logged.
    #[must_use]
    pub fn photo_url(&self, photo_reference: &str) -> Url {
        self.build_url(
            PHOTO_PATH,
            &[
                ("key".to_owned(), self.api_key.clone()),
                ("photoreference".to_owned(), photo_reference.to_owned()),
                ("maxwidth".to_owned(), self.photo_max_width.to_string()),
            ],
        )
    }
}

/// Checks the envelope `"status"` field. `OK` and `ZERO_RESULTS` pass;
/// anything else becomes [`PlacesError::Api`].
pub(crate) fn check_api_status(body: &serde_json::Value) -> Result<(), PlacesError> {
    let Some(status) = body.get("status").and_then(serde_json::Value::as_str) else {
        return Ok(());
    };
    if matches!(status, "OK" | "ZERO_RESULTS") {
        return Ok(());
    }
    let message = body
        .get("error_message")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("no error message given")
        .to_string();
    tracing::warn!(status, %message, "places API returned an error status");
    Err(PlacesError::Api {
        status: status.to_string(),
        message,
    })
}
