//! Geographic coordinate value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A geographic position in `(longitude, latitude)` order
///
/// The order matches GeoJSON and the routing provider's wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedCoordinate")]
pub struct Coordinate {
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
}

/// Wire form, range-checked on the way into [`Coordinate`]
#[derive(Deserialize)]
struct UncheckedCoordinate {
    longitude: f64,
    latitude: f64,
}

impl TryFrom<UncheckedCoordinate> for Coordinate {
    type Error = InvalidCoordinates;

    fn try_from(raw: UncheckedCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.longitude, raw.latitude)
    }
}

/// Error type for invalid coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidCoordinates {
    /// Rejected longitude
    pub longitude: f64,
    /// Rejected latitude
    pub latitude: f64,
}

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}): longitude must be -180 to 180 and latitude -90 to 90",
            self.longitude, self.latitude
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

impl From<InvalidCoordinates> for DomainError {
    fn from(err: InvalidCoordinates) -> Self {
        Self::InvalidCoordinates(err.to_string())
    }
}

impl Coordinate {
    /// Create a new coordinate with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if either value is not finite, the
    /// longitude is not in [-180, 180] or the latitude is not in [-90, 90].
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, InvalidCoordinates> {
        // NaN fails both range checks
        if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinates {
                longitude,
                latitude,
            });
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Build from a GeoJSON position `[longitude, latitude]`
    ///
    /// # Errors
    ///
    /// Same as [`Coordinate::new`].
    pub fn from_position(position: [f64; 2]) -> Result<Self, InvalidCoordinates> {
        Self::new(position[0], position[1])
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// GeoJSON position `[longitude, latitude]`
    #[must_use]
    pub const fn to_position(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
