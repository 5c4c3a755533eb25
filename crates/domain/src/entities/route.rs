//! Routed path through an ordered list of stops

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::Coordinate;

/// Distance and driving time of one leg between consecutive stops
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedSegment")]
pub struct RouteSegment {
    distance_meters: f64,
    duration_seconds: f64,
}

#[derive(Deserialize)]
struct UncheckedSegment {
    distance_meters: f64,
    duration_seconds: f64,
}

impl TryFrom<UncheckedSegment> for RouteSegment {
    type Error = DomainError;

    fn try_from(raw: UncheckedSegment) -> Result<Self, Self::Error> {
        Self::new(raw.distance_meters, raw.duration_seconds)
    }
}

impl RouteSegment {
    /// Create a segment
    ///
    /// # Errors
    ///
    /// Returns an error if either value is negative or not finite.
    pub fn new(distance_meters: f64, duration_seconds: f64) -> Result<Self, DomainError> {
        if !distance_meters.is_finite() || distance_meters < 0.0 {
            return Err(DomainError::InvalidDistance(format!(
                "segment distance {distance_meters} m"
            )));
        }
        if !duration_seconds.is_finite() || duration_seconds < 0.0 {
            return Err(DomainError::InvalidDuration(format!(
                "segment duration {duration_seconds} s"
            )));
        }
        Ok(Self {
            distance_meters,
            duration_seconds,
        })
    }

    /// Leg distance in meters
    #[must_use]
    pub const fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    /// Leg driving time in seconds
    #[must_use]
    pub const fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }
}

/// Route geometry plus per-leg metrics, in stop order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Polyline points for display
    pub geometry: Vec<Coordinate>,
    /// One segment per leg: origin→stop1, …, last stop→destination
    pub segments: Vec<RouteSegment>,
}

impl Route {
    /// Create a route
    #[must_use]
    pub const fn new(geometry: Vec<Coordinate>, segments: Vec<RouteSegment>) -> Self {
        Self { geometry, segments }
    }

    /// Sum of all leg distances in meters
    #[must_use]
    pub fn total_distance_meters(&self) -> f64 {
        self.segments.iter().map(RouteSegment::distance_meters).sum()
    }

    /// Sum of all leg durations in seconds
    #[must_use]
    pub fn total_duration_seconds(&self) -> f64 {
        self.segments.iter().map(RouteSegment::duration_seconds).sum()
    }

    /// Total distance in kilometers
    #[must_use]
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_meters() / 1000.0
    }

    /// Total driving time in hours
    #[must_use]
    pub fn driving_hours(&self) -> f64 {
        self.total_duration_seconds() / 3600.0
    }
}
