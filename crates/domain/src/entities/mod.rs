//! Domain entities and the journey time calculator

mod journey_estimate;
mod route;

pub use journey_estimate::{ArrivalTime, JourneyEstimate, RestPolicy};
pub use route::{Route, RouteSegment};
