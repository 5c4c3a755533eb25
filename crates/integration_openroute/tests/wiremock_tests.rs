//! Integration tests for the openrouteservice clients (wiremock-based)

use domain::{Coordinate, VehicleProfile};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_openroute::{
    DirectionsClient, GeocodingClient, OpenRouteConfig, OpenRouteDirectionsClient, OpenRouteError,
    OpenRouteGeocodingClient,
};

fn config_for_mock(base_url: &str) -> OpenRouteConfig {
    OpenRouteConfig {
        base_url: base_url.to_string(),
        api_key: "test-key".to_string(),
        timeout_secs: 5,
        cache_ttl_minutes: 0,
        ..OpenRouteConfig::default()
    }
}

const fn sample_geocode_json() -> &'static str {
    r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [-0.37739, 39.46975] },
            "properties": { "label": "Valencia, VC, España" }
        }]
    }"#
}

const fn sample_directions_json() -> &'static str {
    r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": [[-0.3774, 39.4698], [-1.0, 39.5], [-3.7038, 40.4168]]
            },
            "properties": {
                "segments": [{ "distance": 357000.0, "duration": 14400.0 }],
                "summary": { "distance": 357000.0, "duration": 14400.0 }
            }
        }]
    }"#
}

fn valencia() -> Coordinate {
    Coordinate::new(-0.3774, 39.4698).unwrap()
}

fn madrid() -> Coordinate {
    Coordinate::new(-3.7038, 40.4168).unwrap()
}

#[tokio::test]
async fn test_geocode_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/search"))
        .and(query_param("text", "Valencia, España"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("boundary.country", "ES"))
        .and(query_param("size", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_geocode_json()))
        .mount(&server)
        .await;

    let client = OpenRouteGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();
    let found = client.geocode("Valencia, España").await.unwrap();

    assert!((found.coordinate.latitude() - 39.46975).abs() < 1e-9);
    assert_eq!(found.label.as_deref(), Some("Valencia, VC, España"));
}

#[tokio::test]
async fn test_geocode_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{ "type": "FeatureCollection", "features": [] }"#),
        )
        .mount(&server)
        .await;

    let client = OpenRouteGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client.geocode("Nowhere Town").await.unwrap_err();

    assert!(matches!(err, OpenRouteError::AddressNotFound(ref a) if a == "Nowhere Town"));
}

#[tokio::test]
async fn test_geocode_empty_address_sends_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_geocode_json()))
        .expect(0)
        .mount(&server)
        .await;

    let client = OpenRouteGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client.geocode("   ").await.unwrap_err();

    assert!(matches!(err, OpenRouteError::InvalidInput(_)));
}

#[tokio::test]
async fn test_geocode_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/search"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = OpenRouteGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client.geocode("Valencia").await.unwrap_err();

    assert!(matches!(err, OpenRouteError::Unauthorized(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_geocode_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = OpenRouteGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client.geocode("Valencia").await.unwrap_err();

    assert!(matches!(err, OpenRouteError::ParseError(_)));
}

#[tokio::test]
async fn test_geocode_cache_avoids_second_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_geocode_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = OpenRouteConfig {
        cache_ttl_minutes: 10,
        ..config_for_mock(&server.uri())
    };
    let client = OpenRouteGeocodingClient::new(&config).unwrap();

    let first = client.geocode("Valencia, España").await.unwrap();
    let second = client.geocode("  valencia, españa ").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_directions_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/directions/driving-hgv/geojson"))
        .and(header("authorization", "test-key"))
        .and(body_json(serde_json::json!({
            "coordinates": [[-0.3774, 39.4698], [-3.7038, 40.4168]],
            "instructions": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_directions_json()))
        .mount(&server)
        .await;

    let client = OpenRouteDirectionsClient::new(&config_for_mock(&server.uri())).unwrap();
    let directions = client
        .directions(&[valencia(), madrid()], VehicleProfile::HeavyGoodsVehicle)
        .await
        .unwrap();

    assert_eq!(directions.geometry.len(), 3);
    assert_eq!(directions.segments.len(), 1);
    assert!((directions.duration_seconds() - 14_400.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_directions_uses_profile_in_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/directions/driving-car/geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_directions_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenRouteDirectionsClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client
        .directions(&[valencia(), madrid()], VehicleProfile::Car)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_directions_provider_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/directions/driving-hgv/geojson"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            r#"{"error": {"code": 2010, "message": "Could not find routable point within a radius of 350.0 meters of specified coordinate 1"}}"#,
        ))
        .mount(&server)
        .await;

    let client = OpenRouteDirectionsClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client
        .directions(&[valencia(), madrid()], VehicleProfile::HeavyGoodsVehicle)
        .await
        .unwrap_err();

    match err {
        OpenRouteError::RoutingRejected { code, message } => {
            assert_eq!(code, Some(2010));
            assert!(message.contains("routable point"));
        },
        other => unreachable!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_directions_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/directions/driving-hgv/geojson"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let client = OpenRouteDirectionsClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client
        .directions(&[valencia(), madrid()], VehicleProfile::HeavyGoodsVehicle)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OpenRouteError::RateLimitExceeded {
            retry_after_secs: Some(30)
        }
    ));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_directions_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/directions/driving-hgv/geojson"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = OpenRouteDirectionsClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client
        .directions(&[valencia(), madrid()], VehicleProfile::HeavyGoodsVehicle)
        .await;

    assert!(matches!(result, Err(OpenRouteError::RequestFailed(_))));
}

#[tokio::test]
async fn test_directions_requires_two_coordinates() {
    let client = OpenRouteDirectionsClient::new(&OpenRouteConfig::for_testing()).unwrap();
    let result = client
        .directions(&[valencia()], VehicleProfile::HeavyGoodsVehicle)
        .await;

    assert!(matches!(result, Err(OpenRouteError::InvalidInput(_))));
}

#[tokio::test]
async fn test_directions_health_check() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":"ready"}"#))
        .mount(&server)
        .await;

    let client = OpenRouteDirectionsClient::new(&config_for_mock(&server.uri())).unwrap();
    assert!(client.is_healthy().await);
}
