//! Integration tests for the Nominatim reverse-geocoding client using wiremock

use std::time::Duration;

use integration_geocoding::{
    GeocodingError, NominatimConfig, NominatimGeocodingClient, ReverseGeocodingClient,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header_exists, method, path, query_param},
};

fn seoul_response() -> serde_json::Value {
    serde_json::json!({
        "place_id": 123,
        "lat": "37.5665",
        "lon": "126.978",
        "display_name": "Sejong-daero, Jung-gu, Seoul, 04524, South Korea",
        "address": {
            "road": "Sejong-daero",
            "city_district": "Jung-gu",
            "city": "Seoul",
            "postcode": "04524",
            "country": "South Korea",
            "country_code": "kr"
        }
    })
}

fn create_test_client(mock_server: &MockServer) -> NominatimGeocodingClient {
    let config = NominatimConfig {
        base_url: mock_server.uri(),
        ..NominatimConfig::for_testing()
    };
    #[allow(clippy::expect_used)]
    NominatimGeocodingClient::new(&config).expect("Failed to create client")
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn test_reverse_geocode_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(seoul_response()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.reverse_geocode(37.5665, 126.978, 7).await;

    let candidates = tokio_test::assert_ok!(result);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].thoroughfare.as_deref(), Some("Sejong-daero"));
    assert_eq!(candidates[0].country.as_deref(), Some("South Korea"));
    assert_eq!(candidates[0].admin_area.as_deref(), Some("Seoul"));
}

#[tokio::test]
async fn test_request_contains_correct_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("lat", "37.5665"))
        .and(query_param("lon", "126.978"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("addressdetails", "1"))
        .and(query_param("accept-language", "ko"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(seoul_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = NominatimConfig {
        base_url: mock_server.uri(),
        language: "ko".to_string(),
        ..NominatimConfig::for_testing()
    };
    let client = NominatimGeocodingClient::new(&config).unwrap();
    let result = client.reverse_geocode(37.5665, 126.978, 7).await;

    tokio_test::assert_ok!(result);
}

#[tokio::test]
async fn test_no_address_found_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"error": "Unable to geocode"})),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.reverse_geocode(0.5, -30.0, 7).await;

    assert!(
        matches!(result, Ok(ref c) if c.is_empty()),
        "Expected empty list, got: {result:?}"
    );
}

#[tokio::test]
async fn test_zero_max_results_skips_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(seoul_response()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.reverse_geocode(37.5665, 126.978, 0).await;

    assert!(matches!(result, Ok(ref c) if c.is_empty()));
}

// ============================================================================
// Error handling scenarios
// ============================================================================

#[tokio::test]
async fn test_bad_request_maps_to_invalid_coordinates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {"code": 400, "message": "Floating-point number expected for parameter 'lat'"}
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.reverse_geocode(37.5665, 126.978, 7).await;

    assert!(
        matches!(result, Err(GeocodingError::InvalidCoordinates(_))),
        "Expected InvalidCoordinates, got: {result:?}"
    );
}

#[tokio::test]
async fn test_server_error_is_service_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.reverse_geocode(37.5665, 126.978, 7).await;

    assert!(
        matches!(result, Err(GeocodingError::ServiceUnavailable(_))),
        "Expected ServiceUnavailable, got: {result:?}"
    );
}

#[tokio::test]
async fn test_rate_limited_by_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.reverse_geocode(37.5665, 126.978, 7).await;

    assert!(
        matches!(result, Err(GeocodingError::RateLimitExceeded)),
        "Expected RateLimitExceeded, got: {result:?}"
    );
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(seoul_response())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = NominatimConfig {
        base_url: mock_server.uri(),
        timeout_secs: 1,
        ..NominatimConfig::for_testing()
    };
    let client = NominatimGeocodingClient::new(&config).unwrap();
    let result = client.reverse_geocode(37.5665, 126.978, 7).await;

    assert!(
        matches!(result, Err(GeocodingError::Timeout)),
        "Expected Timeout, got: {result:?}"
    );
}

#[tokio::test]
async fn test_invalid_json_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.reverse_geocode(37.5665, 126.978, 7).await;

    assert!(
        matches!(result, Err(GeocodingError::ParseError(_))),
        "Expected ParseError, got: {result:?}"
    );
}

#[tokio::test]
async fn test_connection_refused() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let config = NominatimConfig {
        base_url: uri,
        ..NominatimConfig::for_testing()
    };
    let client = NominatimGeocodingClient::new(&config).unwrap();
    let result = client.reverse_geocode(37.5665, 126.978, 7).await;

    assert!(
        result.as_ref().is_err_and(GeocodingError::is_unavailable),
        "Expected transport failure, got: {result:?}"
    );
}

#[tokio::test]
async fn test_out_of_range_coordinates_skip_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.reverse_geocode(95.0, 126.978, 7).await;

    assert!(
        matches!(result, Err(GeocodingError::InvalidCoordinates(_))),
        "Expected InvalidCoordinates, got: {result:?}"
    );
}
