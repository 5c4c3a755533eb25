//! openrouteservice directions client
//!
//! Requests a drivable route through an ordered list of coordinates using
//! `POST /v2/directions/{profile}/geojson` and returns the route polyline
//! together with per-leg distance and duration.

use std::time::Duration;

use async_trait::async_trait;
use domain::{Coordinate, VehicleProfile};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::OpenRouteConfig;
use crate::error::{OpenRouteError, retry_after};
use crate::models::{Directions, DirectionsSegment};

/// Trait for routing service clients
#[async_trait]
pub trait DirectionsClient: Send + Sync {
    /// Route through `coordinates` in order (origin, waypoints, destination)
    ///
    /// Returns one segment per consecutive pair of coordinates. Provider-side
    /// rejections surface as errors, never as partial routes.
    async fn directions(
        &self,
        coordinates: &[Coordinate],
        profile: VehicleProfile,
    ) -> Result<Directions, OpenRouteError>;

    /// Check if the routing service is reachable
    async fn is_healthy(&self) -> bool;
}

/// Directions client using the openrouteservice v2 API
#[derive(Debug)]
pub struct OpenRouteDirectionsClient {
    client: Client,
    config: OpenRouteConfig,
}

impl OpenRouteDirectionsClient {
    /// Create a new directions client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &OpenRouteConfig) -> Result<Self, OpenRouteError> {
        config
            .validate()
            .map_err(OpenRouteError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("truckplanner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| OpenRouteError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Parse the raw GeoJSON directions response into typed models
    fn parse_directions_response(
        body: &str,
        expected_segments: usize,
    ) -> Result<Directions, OpenRouteError> {
        let raw: RawDirectionsResponse =
            serde_json::from_str(body).map_err(|e| OpenRouteError::ParseError(e.to_string()))?;

        let feature = raw
            .features
            .into_iter()
            .next()
            .ok_or(OpenRouteError::NoRouteFound)?;

        let geometry = feature
            .geometry
            .coordinates
            .iter()
            .map(|position| match position.as_slice() {
                [lon, lat, ..] => Coordinate::new(*lon, *lat)
                    .map_err(|e| OpenRouteError::ParseError(e.to_string())),
                _ => Err(OpenRouteError::ParseError(
                    "route position needs longitude and latitude".to_string(),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let segments: Vec<DirectionsSegment> = feature
            .properties
            .segments
            .into_iter()
            .map(|s| DirectionsSegment {
                distance: s.distance,
                duration: s.duration,
            })
            .collect();

        if segments.len() != expected_segments {
            return Err(OpenRouteError::ParseError(format!(
                "expected {expected_segments} route segments, got {}",
                segments.len()
            )));
        }

        Ok(Directions { geometry, segments })
    }

    /// Turn a non-success response into the most specific error
    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> OpenRouteError {
        match serde_json::from_str::<RawErrorResponse>(body) {
            Ok(RawErrorResponse {
                error: RawError::Detailed { code, message },
            }) => OpenRouteError::RoutingRejected { code, message },
            Ok(RawErrorResponse {
                error: RawError::Message(message),
            }) => OpenRouteError::RoutingRejected {
                code: None,
                message,
            },
            Err(_) => OpenRouteError::RequestFailed(format!("HTTP {status}")),
        }
    }
}

#[async_trait]
impl DirectionsClient for OpenRouteDirectionsClient {
    #[instrument(skip(self, coordinates, profile), fields(stops = coordinates.len(), %profile))]
    async fn directions(
        &self,
        coordinates: &[Coordinate],
        profile: VehicleProfile,
    ) -> Result<Directions, OpenRouteError> {
        if coordinates.len() < 2 {
            return Err(OpenRouteError::InvalidInput(format!(
                "at least 2 coordinates are required, got {}",
                coordinates.len()
            )));
        }

        let url = format!(
            "{}/v2/directions/{}/geojson",
            self.config.base(),
            profile.as_str()
        );

        let body = RawDirectionsRequest {
            coordinates: coordinates.iter().map(Coordinate::to_position).collect(),
            instructions: false,
        };

        debug!(?url, "Requesting directions");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| OpenRouteError::from_reqwest(&e, self.config.timeout_secs))?;

        let status = response.status();
        if let Some(err) = OpenRouteError::from_status(status, retry_after(&response)) {
            return Err(err);
        }

        let text = response
            .text()
            .await
            .map_err(|e| OpenRouteError::ParseError(e.to_string()))?;

        if !status.is_success() {
            let err = Self::parse_error_response(status, &text);
            warn!(%status, error = %err, "Routing request rejected");
            return Err(err);
        }

        let directions = Self::parse_directions_response(&text, coordinates.len() - 1)?;

        debug!(
            distance_m = directions.distance_meters(),
            duration_s = directions.duration_seconds(),
            points = directions.geometry.len(),
            "Route found"
        );
        Ok(directions)
    }

    async fn is_healthy(&self) -> bool {
        let url = format!("{}/v2/health", self.config.base());
        self.client
            .get(&url)
            .send()
            .await
            .is_ok_and(|r| r.status().is_success())
    }
}

// --- Raw API request/response types ---

#[derive(Debug, Serialize)]
struct RawDirectionsRequest {
    coordinates: Vec<[f64; 2]>,
    instructions: bool,
}

#[derive(Debug, Deserialize)]
struct RawDirectionsResponse {
    #[serde(default)]
    features: Vec<RawRouteFeature>,
}

#[derive(Debug, Deserialize)]
struct RawRouteFeature {
    geometry: RawLineString,
    properties: RawRouteProperties,
}

#[derive(Debug, Deserialize)]
struct RawLineString {
    // Positions may carry a third elevation value
    coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct RawRouteProperties {
    #[serde(default)]
    segments: Vec<RawSegment>,
}

#[derive(Debug, Deserialize)]
struct RawSegment {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct RawErrorResponse {
    error: RawError,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawError {
    Detailed { code: Option<i64>, message: String },
    Message(String),
}
