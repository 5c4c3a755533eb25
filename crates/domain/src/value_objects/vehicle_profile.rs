//! Routing vehicle profile

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vehicle class the route must be drivable for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VehicleProfile {
    /// Heavy goods vehicle: roads legally and physically suitable for trucks
    #[default]
    #[serde(rename = "driving-hgv")]
    HeavyGoodsVehicle,
    /// Passenger car
    #[serde(rename = "driving-car")]
    Car,
}

impl VehicleProfile {
    /// Provider identifier used in routing requests
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HeavyGoodsVehicle => "driving-hgv",
            Self::Car => "driving-car",
        }
    }
}

impl fmt::Display for VehicleProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driving-hgv" | "hgv" | "truck" => Ok(Self::HeavyGoodsVehicle),
            "driving-car" | "car" => Ok(Self::Car),
            _ => Err(format!(
                "Invalid vehicle profile: {s}. Use 'driving-hgv' or 'driving-car'"
            )),
        }
    }
}
