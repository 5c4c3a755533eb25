//! Application-level errors

use std::fmt;

use domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position of a place within a journey request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceRole {
    /// Starting point
    Origin,
    /// Intermediate stop, numbered from 1
    Stop(usize),
    /// Final destination
    Destination,
}

impl fmt::Display for PlaceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => f.write_str("origin"),
            Self::Stop(n) => write!(f, "stop {n}"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// A place name the geocoder had no match for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedPlace {
    /// Where the place appears in the request
    pub role: PlaceRole,
    /// Address text as entered
    pub address: String,
}

impl fmt::Display for UnresolvedPlace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\"", self.role, self.address)
    }
}

fn join_places(places: &[UnresolvedPlace]) -> String {
    places
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur in the application layer
///
/// Every variant is terminal for the current planning request.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request rejected before any lookup
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// One or more addresses resolved to zero results
    #[error("Could not geocode {}", join_places(.0))]
    PlacesNotFound(Vec<UnresolvedPlace>),

    /// Network or HTTP failure while geocoding a place
    #[error("Geocoding failed for {role} \"{address}\": {message}")]
    GeocodingFailed {
        /// Where the place appears in the request
        role: PlaceRole,
        /// Address text as entered
        address: String,
        /// Underlying failure
        message: String,
    },

    /// The routing provider rejected the coordinate set
    #[error("Routing failed: {0}")]
    RoutingFailed(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}
