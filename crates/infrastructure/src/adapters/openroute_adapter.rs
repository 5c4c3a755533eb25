//! openrouteservice adapter - Implements GeocodingPort and RoutingPort using integration_openroute

use application::error::ApplicationError;
use application::ports::{GeocodedPlace, GeocodingPort, RoutingPort};
use async_trait::async_trait;
use domain::{Coordinate, Route, RouteSegment, VehicleProfile};
use integration_openroute::{
    Directions, DirectionsClient, GeocodingClient, OpenRouteConfig, OpenRouteDirectionsClient,
    OpenRouteError, OpenRouteGeocodingClient,
};
use tracing::{debug, instrument, warn};

/// Adapter for geocoding and HGV routing via openrouteservice
pub struct OpenRouteAdapter {
    geocoding_client: Box<dyn GeocodingClient>,
    directions_client: Box<dyn DirectionsClient>,
}

impl std::fmt::Debug for OpenRouteAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouteAdapter")
            .field("geocoding_client", &"GeocodingClient")
            .field("directions_client", &"DirectionsClient")
            .finish()
    }
}

impl OpenRouteAdapter {
    /// Create an adapter backed by the openrouteservice HTTP clients
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] if the configuration is
    /// invalid or the HTTP clients cannot be created.
    pub fn new(config: &OpenRouteConfig) -> Result<Self, ApplicationError> {
        let geocoding_client = OpenRouteGeocodingClient::new(config).map_err(map_error)?;
        let directions_client = OpenRouteDirectionsClient::new(config).map_err(map_error)?;

        Ok(Self::with_clients(
            Box::new(geocoding_client),
            Box::new(directions_client),
        ))
    }

    /// Create an adapter from existing clients
    #[must_use]
    pub fn with_clients(
        geocoding_client: Box<dyn GeocodingClient>,
        directions_client: Box<dyn DirectionsClient>,
    ) -> Self {
        Self {
            geocoding_client,
            directions_client,
        }
    }

    /// Convert provider directions into a domain route
    fn convert_directions(directions: Directions) -> Result<Route, ApplicationError> {
        let segments = directions
            .segments
            .iter()
            .map(|s| {
                RouteSegment::new(s.distance, s.duration)
                    .map_err(|e| ApplicationError::RoutingFailed(format!("invalid segment: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Route::new(directions.geometry, segments))
    }
}

/// Map an integration error to the application taxonomy
fn map_error(err: OpenRouteError) -> ApplicationError {
    match err {
        OpenRouteError::InvalidInput(msg) => ApplicationError::InvalidInput(msg),
        OpenRouteError::NoRouteFound => {
            ApplicationError::RoutingFailed("no route between the given places".to_string())
        },
        OpenRouteError::RoutingRejected { code, message } => match code {
            Some(code) => ApplicationError::RoutingFailed(format!("{message} (code {code})")),
            None => ApplicationError::RoutingFailed(message),
        },
        OpenRouteError::Unauthorized(msg) => {
            ApplicationError::Configuration(format!("openrouteservice rejected the API key: {msg}"))
        },
        OpenRouteError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
        e => ApplicationError::ExternalService(e.to_string()),
    }
}

#[async_trait]
impl GeocodingPort for OpenRouteAdapter {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedPlace>, ApplicationError> {
        match self.geocoding_client.geocode(address).await {
            Ok(found) => Ok(Some(GeocodedPlace {
                query: address.trim().to_string(),
                label: found.label,
                coordinate: found.coordinate,
            })),
            Err(OpenRouteError::AddressNotFound(_)) => {
                debug!(%address, "Address not found");
                Ok(None)
            },
            Err(e) => {
                warn!(error = %e, "Geocoding request failed");
                Err(map_error(e))
            },
        }
    }
}

#[async_trait]
impl RoutingPort for OpenRouteAdapter {
    #[instrument(skip(self, waypoints, profile), fields(waypoints = waypoints.len(), %profile))]
    async fn route(
        &self,
        waypoints: &[Coordinate],
        profile: VehicleProfile,
    ) -> Result<Route, ApplicationError> {
        let directions = self
            .directions_client
            .directions(waypoints, profile)
            .await
            .map_err(|e| {
                warn!(error = %e, "Routing request failed");
                map_error(e)
            })?;

        Self::convert_directions(directions)
    }

    async fn is_available(&self) -> bool {
        self.directions_client.is_healthy().await
    }
}
