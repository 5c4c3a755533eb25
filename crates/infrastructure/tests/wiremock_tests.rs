//! Integration tests for infrastructure crate
//!
//! Tests cover:
//! - Journey planning end to end through the openrouteservice adapter
//! - Error mapping from provider responses to the application taxonomy

use std::sync::Arc;

use application::{
    ApplicationError, JourneyPlannerService, JourneyRequest, PlaceRole, parse_departure_time,
};
use chrono::NaiveTime;
use integration_openroute::OpenRouteConfig;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use infrastructure::OpenRouteAdapter;

fn config_for_mock(base_url: &str) -> OpenRouteConfig {
    OpenRouteConfig {
        base_url: base_url.to_string(),
        api_key: "test-key".to_string(),
        timeout_secs: 5,
        cache_ttl_minutes: 0,
        ..OpenRouteConfig::default()
    }
}

fn planner(server: &MockServer) -> JourneyPlannerService {
    let adapter = Arc::new(OpenRouteAdapter::new(&config_for_mock(&server.uri())).unwrap());
    JourneyPlannerService::new(adapter.clone(), adapter)
}

fn feature_collection(lon: f64, lat: f64, label: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [lon, lat] },
            "properties": { "label": label }
        }]
    })
}

fn directions(legs: &[(f64, f64)]) -> serde_json::Value {
    let segments: Vec<serde_json::Value> = legs
        .iter()
        .map(|(distance, duration)| serde_json::json!({ "distance": distance, "duration": duration }))
        .collect();
    serde_json::json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": [[-0.3774, 39.4698], [-1.8585, 38.9943], [-3.7038, 40.4168]]
            },
            "properties": { "segments": segments }
        }]
    })
}

async fn mount_place(server: &MockServer, text: &str, lon: f64, lat: f64) {
    Mock::given(method("GET"))
        .and(path("/geocode/search"))
        .and(query_param("text", text))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(feature_collection(lon, lat, text)),
        )
        .mount(server)
        .await;
}

async fn mount_unknown_place(server: &MockServer, text: &str) {
    Mock::given(method("GET"))
        .and(path("/geocode/search"))
        .and(query_param("text", text))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "FeatureCollection",
            "features": []
        })))
        .mount(server)
        .await;
}

fn eight_am() -> NaiveTime {
    parse_departure_time("08:00").unwrap()
}

#[tokio::test]
async fn plans_single_shift_journey() {
    let server = MockServer::start().await;
    mount_place(&server, "Valencia", -0.3774, 39.4698).await;
    mount_place(&server, "Madrid", -3.7038, 40.4168).await;

    Mock::given(method("POST"))
        .and(path("/v2/directions/driving-hgv/geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(directions(&[(357_000.0, 14_400.0)])))
        .expect(1)
        .mount(&server)
        .await;

    let plan = planner(&server)
        .plan(&JourneyRequest::new("Valencia", "Madrid", eight_am()))
        .await
        .unwrap();

    assert_eq!(plan.origin.label.as_deref(), Some("Valencia"));
    assert!((plan.estimate.total_distance_km - 357.0).abs() < 1e-9);
    assert_eq!(plan.estimate.rest_break_count, 0);
    assert!(!plan.estimate.mandatory_daily_rest_applied);
    assert_eq!(plan.estimate.estimated_arrival.to_string(), "12:00");
    assert_eq!(plan.route.geometry.len(), 3);
}

#[tokio::test]
async fn plans_multi_day_journey_through_stop() {
    let server = MockServer::start().await;
    mount_place(&server, "Valencia", -0.3774, 39.4698).await;
    mount_place(&server, "Albacete", -1.8585, 38.9943).await;
    mount_place(&server, "Madrid", -3.7038, 40.4168).await;

    // 15 hours of driving across two legs
    Mock::given(method("POST"))
        .and(path("/v2/directions/driving-hgv/geojson"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(directions(&[(600_000.0, 27_000.0), (600_000.0, 27_000.0)])),
        )
        .mount(&server)
        .await;

    let request =
        JourneyRequest::new("Valencia", "Madrid", eight_am()).with_stops_text("Albacete");
    let plan = planner(&server).plan(&request).await.unwrap();

    assert_eq!(plan.stops.len(), 1);
    assert_eq!(plan.estimate.rest_break_count, 3);
    assert!(plan.estimate.mandatory_daily_rest_applied);
    assert!((plan.estimate.total_duration_with_daily_rest_hours - 28.25).abs() < 1e-9);
    assert_eq!(plan.estimate.estimated_arrival.to_string(), "12:15 (+1 day)");
}

#[tokio::test]
async fn unknown_places_are_reported_before_routing() {
    let server = MockServer::start().await;
    mount_unknown_place(&server, "Atlantis").await;
    mount_place(&server, "Madrid", -3.7038, 40.4168).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(directions(&[(1.0, 1.0)])))
        .expect(0)
        .mount(&server)
        .await;

    let err = planner(&server)
        .plan(&JourneyRequest::new("Atlantis", "Madrid", eight_am()))
        .await
        .unwrap_err();

    match err {
        ApplicationError::PlacesNotFound(places) => {
            assert_eq!(places.len(), 1);
            assert_eq!(places[0].role, PlaceRole::Origin);
            assert_eq!(places[0].address, "Atlantis");
        },
        other => unreachable!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn geocoder_outage_names_the_place() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = planner(&server)
        .plan(&JourneyRequest::new("Valencia", "Madrid", eight_am()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::GeocodingFailed { role: PlaceRole::Origin, .. }
    ));
}

#[tokio::test]
async fn routing_rejection_is_routing_failed() {
    let server = MockServer::start().await;
    mount_place(&server, "Valencia", -0.3774, 39.4698).await;
    mount_place(&server, "Madrid", -3.7038, 40.4168).await;

    Mock::given(method("POST"))
        .and(path("/v2/directions/driving-hgv/geojson"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": { "code": 2010, "message": "Could not find routable point within a radius of 350.0 meters" }
        })))
        .mount(&server)
        .await;

    let err = planner(&server)
        .plan(&JourneyRequest::new("Valencia", "Madrid", eight_am()))
        .await
        .unwrap_err();

    match err {
        ApplicationError::RoutingFailed(message) => assert!(message.contains("routable point")),
        other => unreachable!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn rejected_api_key_is_configuration_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/search"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = planner(&server)
        .plan(&JourneyRequest::new("Valencia", "Madrid", eight_am()))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Configuration(_)));
}

#[tokio::test]
async fn routing_health_probe() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(planner(&server).is_routing_available().await);
}
