//! Domain layer for the truck journey planner
//!
//! Contains the driving-time and mandatory-rest rules, route entities and
//! value objects. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
