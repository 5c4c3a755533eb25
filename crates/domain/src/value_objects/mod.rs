//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod hours_minutes;
mod vehicle_profile;

pub use coordinate::{Coordinate, InvalidCoordinates};
pub use hours_minutes::HoursMinutes;
pub use vehicle_profile::VehicleProfile;
