//! Integration tests for the AirVisual client using wiremock
//!
//! These tests verify the client's behavior against a mock HTTP server,
//! ensuring proper handling of various response scenarios.

use std::time::Duration;

use integration_airvisual::{AirQualityClient, AirVisualClient, AirVisualConfig, AirVisualError};
use secrecy::SecretString;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Sample AirVisual `nearest_city` response for testing
fn sample_response(aqius: i32, ts: &str) -> serde_json::Value {
    serde_json::json!({
        "status": "success",
        "data": {
            "city": "Jongno-gu",
            "state": "Seoul",
            "country": "South Korea",
            "location": {"type": "Point", "coordinates": [126.978, 37.5665]},
            "current": {
                "pollution": {
                    "ts": ts,
                    "aqius": aqius,
                    "mainus": "p2",
                    "aqicn": 15,
                    "maincn": "p2"
                },
                "weather": {"ts": ts, "tp": 2, "pr": 1021, "hu": 40, "ws": 1.5, "wd": 270, "ic": "01d"}
            }
        }
    })
}

/// Create a test client configured to use the mock server
fn create_test_client(mock_server: &MockServer, timeout_secs: u64) -> AirVisualClient {
    let config = AirVisualConfig {
        base_url: mock_server.uri(),
        api_key: Some(SecretString::from("test-key")),
        timeout_secs,
    };
    #[allow(clippy::expect_used)]
    AirVisualClient::new(config).expect("Failed to create client")
}

/// Setup a mock for the /nearest_city endpoint with the given response
async fn setup_nearest_city_mock(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/nearest_city"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn test_nearest_city_success() {
    let mock_server = MockServer::start().await;

    setup_nearest_city_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(sample_response(42, "2023-01-01T00:00:00.000Z")),
    )
    .await;

    let client = create_test_client(&mock_server, 5);
    let result = client.nearest_city(37.5665, 126.978).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");

    let city = result.unwrap();
    assert_eq!(city.pollution.aqius, 42);
    assert_eq!(city.pollution.main_pollutant.as_deref(), Some("p2"));
    assert_eq!(city.country.as_deref(), Some("South Korea"));
    assert_eq!(
        city.pollution.timestamp.format("%Y-%m-%dT%H:%M").to_string(),
        "2023-01-01T00:00"
    );
}

#[tokio::test]
async fn test_request_contains_correct_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearest_city"))
        .and(query_param("lat", "37.5665"))
        .and(query_param("lon", "126.978"))
        .and(query_param("key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(sample_response(42, "2023-01-01T00:00:00Z")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, 5);
    let result = client.nearest_city(37.5665, 126.978).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
}

#[tokio::test]
async fn test_nearest_city_body_without_status() {
    let mock_server = MockServer::start().await;

    setup_nearest_city_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"current": {"pollution": {"aqius": 42, "ts": "2023-01-01T00:00:00Z"}}}
        })),
    )
    .await;

    let client = create_test_client(&mock_server, 5);
    let result = client.nearest_city(37.5665, 126.978).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
    let city = result.unwrap();
    assert_eq!(city.pollution.aqius, 42);
    assert!(city.pollution.main_pollutant.is_none());
}

// ============================================================================
// Error handling scenarios
// ============================================================================

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearest_city"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, 5);
    let result = client.nearest_city(37.5665, 126.978).await;

    assert!(
        matches!(result, Err(AirVisualError::ServiceUnavailable(_))),
        "Expected ServiceUnavailable, got: {result:?}"
    );
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearest_city"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_response(42, "2023-01-01T00:00:00Z"))
                .set_delay(Duration::from_secs(3)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, 1);
    let result = client.nearest_city(37.5665, 126.978).await;

    assert!(
        matches!(result, Err(AirVisualError::Timeout { timeout_secs: 1 })),
        "Expected Timeout, got: {result:?}"
    );
}

#[tokio::test]
async fn test_rate_limit_error() {
    let mock_server = MockServer::start().await;

    setup_nearest_city_mock(
        &mock_server,
        ResponseTemplate::new(429).set_body_string("Too Many Requests"),
    )
    .await;

    let client = create_test_client(&mock_server, 5);
    let result = client.nearest_city(37.5665, 126.978).await;

    assert!(
        matches!(result, Err(AirVisualError::RateLimitExceeded)),
        "Expected RateLimitExceeded, got: {result:?}"
    );
}

#[tokio::test]
async fn test_incorrect_api_key() {
    let mock_server = MockServer::start().await;

    setup_nearest_city_mock(
        &mock_server,
        ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "status": "fail",
            "data": {"message": "incorrect_api_key"}
        })),
    )
    .await;

    let client = create_test_client(&mock_server, 5);
    let result = client.nearest_city(37.5665, 126.978).await;

    assert!(
        matches!(result, Err(AirVisualError::ApiError(ref m)) if m == "incorrect_api_key"),
        "Expected ApiError, got: {result:?}"
    );
}

#[tokio::test]
async fn test_invalid_json_response() {
    let mock_server = MockServer::start().await;

    setup_nearest_city_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("not valid json"),
    )
    .await;

    let client = create_test_client(&mock_server, 5);
    let result = client.nearest_city(37.5665, 126.978).await;

    assert!(
        matches!(result, Err(AirVisualError::ParseError(_))),
        "Expected ParseError, got: {result:?}"
    );
}

#[tokio::test]
async fn test_connection_refused() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let config = AirVisualConfig {
        base_url: uri,
        api_key: Some(SecretString::from("test-key")),
        timeout_secs: 2,
    };
    let client = AirVisualClient::new(config).unwrap();
    let result = client.nearest_city(37.5665, 126.978).await;

    assert!(
        matches!(
            result,
            Err(AirVisualError::ConnectionFailed(_) | AirVisualError::Timeout { .. })
        ),
        "Expected transport failure, got: {result:?}"
    );
}

// ============================================================================
// Input validation scenarios
// ============================================================================

#[tokio::test]
async fn test_invalid_coordinates_skip_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, 5);
    let result = client.nearest_city(91.0, 126.978).await;

    assert!(
        matches!(result, Err(AirVisualError::InvalidCoordinates)),
        "Expected InvalidCoordinates, got: {result:?}"
    );
}
