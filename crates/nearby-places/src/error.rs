use thiserror::Error;

/// Errors returned by the places client and the aggregation pipeline.
///
/// Nothing in this crate retries: every variant reaches the caller as-is.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// The outbound request could not be built (bad base URL, invalid header, ...).
    #[error("could not construct request: {0}")]
    ClientConstruction(String),

    /// Connection refused, DNS failure or timeout before a response arrived.
    #[error("network unreachable: {0}")]
    NetworkUnreachable(#[source] reqwest::Error),

    /// The server answered with a non-2xx HTTP status.
    #[error("unexpected HTTP status {status} from {path}")]
    RemoteStatus { status: u16, path: String },

    /// The response body did not match the expected schema.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response could not be read as an HTTP body at all.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),

    /// The provider returned a non-OK `status` in its JSON envelope.
    #[error("places API returned {status}: {message}")]
    Api { status: String, message: String },

    /// A newer search superseded this one before it completed.
    #[error("search was superseded by a newer request")]
    Cancelled,
}

impl PlacesError {
    /// HTTP status carried by [`PlacesError::RemoteStatus`], if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PlacesError::RemoteStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Map a `reqwest` transport error to the matching variant.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            PlacesError::ClientConstruction(err.to_string())
        } else if err.is_connect() || err.is_timeout() {
            PlacesError::NetworkUnreachable(err)
        } else {
            PlacesError::UnexpectedFormat(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_only_for_remote_status() {
        let err = PlacesError::RemoteStatus {
            status: 503,
            path: "/maps/api/place/nearbysearch/json".to_owned(),
        };
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(PlacesError::Cancelled.status_code(), None);
    }

    #[test]
    fn display_is_human_readable() {
        let err = PlacesError::Api {
            status: "REQUEST_DENIED".to_owned(),
            message: "The provided API key is invalid.".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "places API returned REQUEST_DENIED: The provided API key is invalid."
        );
    }

    #[tokio::test]
    async fn connection_refused_is_network_unreachable() {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1")
            .send()
            .await
            .unwrap_err();
        assert!(matches!(
            PlacesError::from_transport(err),
            PlacesError::NetworkUnreachable(_)
        ));
    }
}
