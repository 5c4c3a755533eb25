//! Application services - Use case implementations

mod journey_planner;

pub use journey_planner::{
    JourneyPlan, JourneyPlannerService, JourneyRequest, parse_departure_time,
};
