//! Journey planning use case
//!
//! Resolves origin, intermediate stops and destination to coordinates,
//! routes through them with the configured vehicle profile and turns the
//! route into a rest-adjusted [`JourneyEstimate`].

use std::fmt;
use std::sync::Arc;

use chrono::NaiveTime;
use domain::{Coordinate, JourneyEstimate, RestPolicy, Route, VehicleProfile};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::{ApplicationError, PlaceRole, UnresolvedPlace};
use crate::ports::{GeocodedPlace, GeocodingPort, RoutingPort};

/// Parse a departure time given as `HH:MM` or `HH:MM:SS`
///
/// # Errors
///
/// Returns [`ApplicationError::InvalidInput`] for anything else.
pub fn parse_departure_time(text: &str) -> Result<NaiveTime, ApplicationError> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .map_err(|_| {
            ApplicationError::InvalidInput(format!(
                "departure time must be HH:MM, got \"{text}\""
            ))
        })
}

/// A journey to plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyRequest {
    /// Starting address
    pub origin: String,
    /// Final address
    pub destination: String,
    /// Intermediate addresses, visited in order
    #[serde(default)]
    pub stops: Vec<String>,
    /// Time of day the truck leaves the origin
    pub departure_time: NaiveTime,
}

impl JourneyRequest {
    /// Create a request without intermediate stops
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_time: NaiveTime,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            stops: Vec::new(),
            departure_time,
        }
    }

    /// Append a stop; blank entries are ignored
    #[must_use]
    pub fn with_stop(mut self, stop: impl Into<String>) -> Self {
        let stop = stop.into();
        let trimmed = stop.trim();
        if !trimmed.is_empty() {
            self.stops.push(trimmed.to_string());
        }
        self
    }

    /// Append stops from one-per-line text, skipping blank lines
    #[must_use]
    pub fn with_stops_text(self, text: &str) -> Self {
        text.lines().fold(self, Self::with_stop)
    }

    /// Check that origin and destination are present
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::InvalidInput`] naming the missing field.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.origin.trim().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "origin must not be empty".to_string(),
            ));
        }
        if self.destination.trim().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "destination must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// All places in visiting order, tagged with their role
    fn places(&self) -> impl Iterator<Item = (PlaceRole, &str)> {
        std::iter::once((PlaceRole::Origin, self.origin.trim()))
            .chain(
                self.stops
                    .iter()
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .enumerate()
                    .map(|(i, s)| (PlaceRole::Stop(i + 1), s)),
            )
            .chain(std::iter::once((
                PlaceRole::Destination,
                self.destination.trim(),
            )))
    }
}

/// A planned journey: resolved places, route and time estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyPlan {
    /// Resolved starting point
    pub origin: GeocodedPlace,
    /// Resolved intermediate stops, in visiting order
    pub stops: Vec<GeocodedPlace>,
    /// Resolved final point
    pub destination: GeocodedPlace,
    /// Vehicle profile the route was computed for
    pub profile: VehicleProfile,
    /// Route through all places
    pub route: Route,
    /// Rest-adjusted duration and arrival
    pub estimate: JourneyEstimate,
}

/// Plans truck journeys through geocoding and routing ports
pub struct JourneyPlannerService {
    geocoder: Arc<dyn GeocodingPort>,
    router: Arc<dyn RoutingPort>,
    profile: VehicleProfile,
    policy: RestPolicy,
}

impl fmt::Debug for JourneyPlannerService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JourneyPlannerService")
            .field("profile", &self.profile)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl JourneyPlannerService {
    /// Create a planner for heavy goods vehicles under the regulatory policy
    pub fn new(geocoder: Arc<dyn GeocodingPort>, router: Arc<dyn RoutingPort>) -> Self {
        Self {
            geocoder,
            router,
            profile: VehicleProfile::default(),
            policy: RestPolicy::default(),
        }
    }

    /// Use a different vehicle profile for routing
    #[must_use]
    pub const fn with_profile(mut self, profile: VehicleProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Use a different rest policy
    #[must_use]
    pub const fn with_policy(mut self, policy: RestPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Vehicle profile used for routing
    #[must_use]
    pub const fn profile(&self) -> VehicleProfile {
        self.profile
    }

    /// Plan a journey
    ///
    /// Places are geocoded one after another. Places without a match are
    /// collected and reported together; a transport failure stops at once.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::InvalidInput`] if origin or destination is blank
    /// - [`ApplicationError::Domain`] if the configured rest policy is invalid
    /// - [`ApplicationError::PlacesNotFound`] if any place has no match
    /// - [`ApplicationError::GeocodingFailed`] if a lookup fails
    /// - [`ApplicationError::RoutingFailed`] if the provider rejects the route
    #[instrument(skip(self, request), fields(origin = %request.origin, destination = %request.destination, stops = request.stops.len()))]
    pub async fn plan(&self, request: &JourneyRequest) -> Result<JourneyPlan, ApplicationError> {
        request.validate()?;
        self.policy.validate()?;

        let mut resolved: Vec<GeocodedPlace> = Vec::new();
        let mut unresolved: Vec<UnresolvedPlace> = Vec::new();

        for (role, address) in request.places() {
            match self.geocoder.geocode(address).await {
                Ok(Some(place)) => {
                    debug!(%role, %address, coordinate = %place.coordinate, "Resolved place");
                    resolved.push(place);
                },
                Ok(None) => {
                    warn!(%role, %address, "No geocoding match");
                    unresolved.push(UnresolvedPlace {
                        role,
                        address: address.to_string(),
                    });
                },
                Err(e @ (ApplicationError::InvalidInput(_) | ApplicationError::Configuration(_))) => {
                    return Err(e);
                },
                Err(e) => {
                    return Err(ApplicationError::GeocodingFailed {
                        role,
                        address: address.to_string(),
                        message: e.to_string(),
                    });
                },
            }
        }

        if !unresolved.is_empty() {
            return Err(ApplicationError::PlacesNotFound(unresolved));
        }

        let (origin, rest) = resolved
            .split_first()
            .ok_or_else(|| ApplicationError::InvalidInput("origin must not be empty".to_string()))?;
        let (destination, stops) = rest.split_last().ok_or_else(|| {
            ApplicationError::InvalidInput("destination must not be empty".to_string())
        })?;

        let waypoints: Vec<Coordinate> = resolved.iter().map(|p| p.coordinate).collect();
        let route = self.router.route(&waypoints, self.profile).await?;

        let estimate = JourneyEstimate::from_route(&route, &self.policy, request.departure_time)?;

        info!(
            distance_km = estimate.total_distance_km,
            driving_hours = estimate.driving_duration_hours,
            daily_rest = estimate.mandatory_daily_rest_applied,
            arrival = %estimate.estimated_arrival,
            "Journey planned"
        );

        Ok(JourneyPlan {
            origin: origin.clone(),
            stops: stops.to_vec(),
            destination: destination.clone(),
            profile: self.profile,
            route,
            estimate,
        })
    }

    /// Estimate a journey from known driving time, without any lookups
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Domain`] for negative or non-finite input.
    pub fn estimate(
        &self,
        driving_hours: f64,
        distance_km: f64,
        departure_time: NaiveTime,
    ) -> Result<JourneyEstimate, ApplicationError> {
        Ok(self
            .policy
            .estimate(driving_hours, distance_km, departure_time)?)
    }

    /// Check if the routing provider answers
    pub async fn is_routing_available(&self) -> bool {
        self.router.is_available().await
    }
}
