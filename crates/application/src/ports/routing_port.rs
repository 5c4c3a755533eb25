//! Routing service port
//!
//! Defines the interface for drivable-route requests through an ordered
//! list of coordinates.

use async_trait::async_trait;
use domain::{Coordinate, Route, VehicleProfile};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for routing operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Route through `waypoints` in order for the given vehicle
    ///
    /// The returned route has one segment per consecutive waypoint pair.
    /// Provider rejections are errors; partial routes are never returned.
    async fn route(
        &self,
        waypoints: &[Coordinate],
        profile: VehicleProfile,
    ) -> Result<Route, ApplicationError>;

    /// Check if the routing service is available
    async fn is_available(&self) -> bool;
}
