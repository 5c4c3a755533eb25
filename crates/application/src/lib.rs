//! Application layer - Use cases and orchestration
//!
//! Defines the geocoding and routing ports and the journey planning use case
//! that strings them together with the domain calculator.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, PlaceRole, UnresolvedPlace};
pub use ports::*;
pub use services::*;
