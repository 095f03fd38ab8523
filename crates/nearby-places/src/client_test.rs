use super::search::check_api_status;
use super::*;

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 30, "nearby-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

#[test]
fn build_url_appends_path_and_query() {
    let client = test_client("https://maps.googleapis.com");
    let url = client.build_url(
        "/maps/api/place/nearbysearch/json",
        &pairs(&[("key", "test-key"), ("radius", "1000")]),
    );
    assert_eq!(
        url.as_str(),
        "https://maps.googleapis.com/maps/api/place/nearbysearch/json?key=test-key&radius=1000"
    );
}

#[test]
fn build_url_keeps_base_path_prefix() {
    let client = test_client("http://localhost:9000/proxy/");
    let url = client.build_url("/maps/api/place/details/json", &[]);
    assert_eq!(
        url.as_str(),
        "http://localhost:9000/proxy/maps/api/place/details/json"
    );
}

#[test]
fn build_url_encodes_special_characters() {
    let client = test_client("https://maps.googleapis.com");
    let url = client.build_url("/x", &pairs(&[("location", "52.378,4.8996"), ("q", "a & b")]));
    assert!(
        url.as_str().contains("location=52.378%2C4.8996"),
        "comma should be percent-encoded: {url}"
    );
    assert!(
        url.as_str().contains("a+%26+b") || url.as_str().contains("a%20%26%20b"),
        "query param should be percent-encoded: {url}"
    );
}

#[test]
fn invalid_base_url_is_client_construction_error() {
    let result = PlacesClient::with_base_url("k", 30, "ua", "not a url");
    assert!(matches!(result, Err(PlacesError::ClientConstruction(_))));
}

#[test]
fn photo_url_uses_configured_width() {
    let client = test_client("https://maps.googleapis.com").with_photo_max_width(400);
    let url = client.photo_url("ref-123");
    assert_eq!(
        url.as_str(),
        "https://maps.googleapis.com/maps/api/place/photo?key=test-key&photoreference=ref-123&maxwidth=400"
    );
}

#[test]
fn photo_url_defaults_to_256_pixels() {
    let client = test_client("https://maps.googleapis.com");
    assert!(client.photo_url("r").as_str().ends_with("maxwidth=256"));
}

#[test]
fn check_api_status_accepts_ok_and_zero_results() {
    assert!(check_api_status(&serde_json::json!({ "status": "OK" })).is_ok());
    assert!(check_api_status(&serde_json::json!({ "status": "ZERO_RESULTS" })).is_ok());
}

#[test]
fn check_api_status_surfaces_error_message() {
    let body = serde_json::json!({
        "status": "REQUEST_DENIED",
        "error_message": "The provided API key is invalid."
    });
    let err = check_api_status(&body).unwrap_err();
    assert!(
        matches!(err, PlacesError::Api { ref status, ref message }
            if status == "REQUEST_DENIED" && message.contains("API key")),
        "got: {err:?}"
    );
}

#[test]
fn check_api_status_without_message_still_fails() {
    let err = check_api_status(&serde_json::json!({ "status": "OVER_QUERY_LIMIT" })).unwrap_err();
    assert!(err.to_string().contains("OVER_QUERY_LIMIT"));
}
