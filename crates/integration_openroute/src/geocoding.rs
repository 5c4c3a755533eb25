//! openrouteservice geocoding client
//!
//! Converts free-form address strings to coordinates using the
//! `/geocode/search` endpoint, restricted to one country and a single match.
//! Successful lookups are cached in-process to avoid repeated requests for
//! the same depot or customer address.

use std::time::Duration;

use async_trait::async_trait;
use domain::Coordinate;
use moka::future::Cache;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::OpenRouteConfig;
use crate::error::{OpenRouteError, retry_after};
use crate::models::GeocodeMatch;

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Resolve a free-form address to its best-matching coordinate
    ///
    /// Returns [`OpenRouteError::AddressNotFound`] when the provider has no match.
    async fn geocode(&self, address: &str) -> Result<GeocodeMatch, OpenRouteError>;
}

/// openrouteservice geocoding client with result caching
#[derive(Debug)]
pub struct OpenRouteGeocodingClient {
    client: Client,
    config: OpenRouteConfig,
    cache: Option<Cache<String, GeocodeMatch>>,
}

impl OpenRouteGeocodingClient {
    /// Create a new geocoding client
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

        let cache = config.caching_enabled().then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(u64::from(config.cache_ttl_minutes) * 60))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            cache,
        })
    }

    /// Parse the raw GeoJSON feature collection into the best match
    fn parse_search_response(address: &str, body: &str) -> Result<GeocodeMatch, OpenRouteError> {
        let raw: RawFeatureCollection =
            serde_json::from_str(body).map_err(|e| OpenRouteError::ParseError(e.to_string()))?;

        let feature = raw
            .features
            .into_iter()
            .next()
            .ok_or_else(|| OpenRouteError::AddressNotFound(address.to_string()))?;

        let coordinate = Coordinate::from_position(feature.geometry.coordinates)
            .map_err(|e| OpenRouteError::ParseError(e.to_string()))?;

        Ok(GeocodeMatch {
            coordinate,
            label: feature.properties.and_then(|p| p.label),
        })
    }
}

#[async_trait]
impl GeocodingClient for OpenRouteGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<GeocodeMatch, OpenRouteError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(OpenRouteError::InvalidInput(
                "Address must not be empty".to_string(),
            ));
        }

        let cache_key = address.to_lowercase();
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&cache_key).await {
                debug!(%address, "Geocoding cache hit");
                return Ok(hit);
            }
        }

        let url = format!("{}/geocode/search", self.config.base());
        let mut params = vec![
            ("api_key", self.config.api_key.clone()),
            ("text", address.to_string()),
            ("size", "1".to_string()),
        ];

        if !self.config.country_filter.is_empty() {
            params.push(("boundary.country", self.config.country_filter.clone()));
        }

        debug!(%address, "Geocoding address");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| OpenRouteError::from_reqwest(&e, self.config.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            return Err(
                OpenRouteError::from_status(status, retry_after(&response))
                    .unwrap_or_else(|| OpenRouteError::RequestFailed(format!("HTTP {status}"))),
            );
        }

        let body = response
            .text()
            .await
            .map_err(|e| OpenRouteError::ParseError(e.to_string()))?;

        let found = Self::parse_search_response(address, &body)?;

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, found.clone()).await;
        }
        debug!(%address, coordinate = %found.coordinate, "Geocoded address");

        Ok(found)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawFeatureCollection {
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    geometry: RawPoint,
    properties: Option<RawProperties>,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    coordinates: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct RawProperties {
    label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-0.37739, 39.46975] },
                "properties": { "label": "Valencia, VC, España", "confidence": 1 }
            }]
        }"#;

        let found = OpenRouteGeocodingClient::parse_search_response("Valencia", json).unwrap();
        assert!((found.coordinate.longitude() + 0.37739).abs() < 1e-9);
        assert!((found.coordinate.latitude() - 39.46975).abs() < 1e-9);
        assert_eq!(found.label.as_deref(), Some("Valencia, VC, España"));
    }

    #[test]
    fn test_parse_empty_features_is_not_found() {
        let json = r#"{ "type": "FeatureCollection", "features": [] }"#;
        let err = OpenRouteGeocodingClient::parse_search_response("Atlantis", json).unwrap_err();
        assert!(matches!(err, OpenRouteError::AddressNotFound(ref a) if a == "Atlantis"));
    }

    #[test]
    fn test_parse_missing_features_is_not_found() {
        let err = OpenRouteGeocodingClient::parse_search_response("x", "{}").unwrap_err();
        assert!(matches!(err, OpenRouteError::AddressNotFound(_)));
    }

    #[test]
    fn test_parse_out_of_range_coordinates() {
        let json = r#"{ "features": [{ "geometry": { "coordinates": [500.0, 0.0] } }] }"#;
        let err = OpenRouteGeocodingClient::parse_search_response("x", json).unwrap_err();
        assert!(matches!(err, OpenRouteError::ParseError(_)));
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = OpenRouteGeocodingClient::parse_search_response("x", "not json").unwrap_err();
        assert!(matches!(err, OpenRouteError::ParseError(_)));
    }

    #[test]
    fn test_new_rejects_missing_api_key() {
        let err = OpenRouteGeocodingClient::new(&OpenRouteConfig::default()).unwrap_err();
        assert!(matches!(err, OpenRouteError::ConfigurationError(_)));
    }

    #[test]
    fn test_cache_disabled_for_testing_config() {
        let client = OpenRouteGeocodingClient::new(&OpenRouteConfig::for_testing()).unwrap();
        assert!(client.cache.is_none());
    }
}
