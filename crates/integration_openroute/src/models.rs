//! Typed results of geocoding and directions requests

use domain::Coordinate;
use serde::{Deserialize, Serialize};

/// Best geocoding match for an address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeMatch {
    /// Resolved position
    pub coordinate: Coordinate,
    /// Provider display label, e.g. "Valencia, VC, España"
    pub label: Option<String>,
}

/// Distance and duration of one leg as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionsSegment {
    /// Leg distance in meters
    pub distance: f64,
    /// Leg duration in seconds
    pub duration: f64,
}

/// A route through the requested coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directions {
    /// Polyline of the full route
    pub geometry: Vec<Coordinate>,
    /// One entry per leg, in request order
    pub segments: Vec<DirectionsSegment>,
}

impl Directions {
    /// Total distance in meters
    #[must_use]
    pub fn distance_meters(&self) -> f64 {
        self.segments.iter().map(|s| s.distance).sum()
    }

    /// Total duration in seconds
    #[must_use]
    pub fn duration_seconds(&self) -> f64 {
        self.segments.iter().map(|s| s.duration).sum()
    }
}
