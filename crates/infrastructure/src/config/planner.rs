//! Planner defaults: departure time and vehicle profile.

use chrono::NaiveTime;
use domain::{RestPolicy, VehicleProfile};
use serde::{Deserialize, Serialize};

/// Journey planner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Departure time used when none is given, `HH:MM`
    #[serde(default = "default_departure")]
    pub default_departure: String,

    /// Vehicle profile for routing
    #[serde(default)]
    pub vehicle_profile: VehicleProfile,

    /// Driver-hours constants
    #[serde(default)]
    pub rest_policy: RestPolicy,
}

fn default_departure() -> String {
    "08:00".to_string()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_departure: default_departure(),
            vehicle_profile: VehicleProfile::default(),
            rest_policy: RestPolicy::default(),
        }
    }
}

impl PlannerConfig {
    /// Parsed default departure time
    ///
    /// # Errors
    ///
    /// Returns an error message if the configured value is not `HH:MM`.
    pub fn departure_time(&self) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(self.default_departure.trim(), "%H:%M").map_err(|_| {
            format!(
                "planner.default_departure must be HH:MM, got \"{}\"",
                self.default_departure
            )
        })
    }

    /// Check the departure time and the rest policy constants
    ///
    /// # Errors
    ///
    /// Returns an error message naming the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        self.departure_time()?;
        self.rest_policy
            .validate()
            .map_err(|e| format!("planner.rest_policy: {e}"))
    }
}
