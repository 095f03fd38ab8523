//! HTTP client for the places REST API.
//!
//! [`PlacesClient::fetch`] is the one generic entry point: it turns an
//! [`ApiRequest`] into an HTTP call, classifies transport and status failures,
//! and decodes the JSON body. The endpoint-specific calls live in `search`.

mod search;

use std::time::Duration;

use nearby_core::AppConfig;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::PlacesError;
use crate::request::ApiRequest;

pub const DEFAULT_BASE_URL: &str = nearby_core::config::DEFAULT_PLACES_BASE_URL;
pub const DEFAULT_PHOTO_MAX_WIDTH: u32 = 256;

/// Client for the places REST API.
///
/// Holds one `reqwest::Client` whose connection pool is shared by every
/// request, including the concurrent calls of an aggregation run. Use
/// [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`] to
/// point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    photo_max_width: u32,
}

impl PlacesClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::ClientConstruction`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::ClientConstruction`] if the `reqwest::Client`
    /// cannot be built or `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .map_err(|e| PlacesError::ClientConstruction(e.to_string()))?;

        let base_url = Url::parse(base_url).map_err(|e| {
            PlacesError::ClientConstruction(format!("invalid base URL '{base_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PlacesError::ClientConstruction(format!(
                "base URL '{base_url}' cannot carry a path"
            )));
        }

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            photo_max_width: DEFAULT_PHOTO_MAX_WIDTH,
        })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`PlacesClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, PlacesError> {
        Ok(Self::with_base_url(
            &config.places_api_key,
            config.request_timeout_secs,
            &config.user_agent,
            &config.places_base_url,
        )?
        .with_photo_max_width(config.photo_max_width))
    }

    /// Overrides the `maxwidth` used for photo URLs.
    #[must_use]
    pub fn with_photo_max_width(mut self, photo_max_width: u32) -> Self {
        self.photo_max_width = photo_max_width;
        self
    }

    /// Performs the described request and decodes the JSON body into `R`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ClientConstruction`] if the request cannot be built
    ///   (e.g. an invalid header name).
    /// - [`PlacesError::NetworkUnreachable`] on connect failure or timeout.
    /// - [`PlacesError::RemoteStatus`] on a non-2xx HTTP status.
    /// - [`PlacesError::UnexpectedFormat`] if the body cannot be read.
    /// - [`PlacesError::Deserialize`] if the body does not decode into `R`.
    pub async fn fetch<R: DeserializeOwned>(
        &self,
        request: &ApiRequest<R>,
    ) -> Result<R, PlacesError> {
        let url = self.build_url(&request.path, &request.query);
        tracing::debug!(method = %request.method, path = %request.path, "sending places request");

        let mut builder = self.client.request(request.method.as_reqwest(), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(PlacesError::from_transport)?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), path = %request.path, "places request failed");
            return Err(PlacesError::RemoteStatus {
                status: status.as_u16(),
                path: request.path.clone(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| PlacesError::UnexpectedFormat(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: format!("{} {}", request.method, request.path),
            source: e,
        })
    }

    /// Builds the full request URL: base path + `path`, with percent-encoded
    /// query parameters.
    pub(crate) fn build_url(&self, path: &str, query: &[(String, String)]) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            self.base_url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url.set_query(None);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        url
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
