//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Driving duration is negative, not finite, or too large to schedule
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// Distance is negative or not finite
    #[error("Invalid distance: {0}")]
    InvalidDistance(String),

    /// Coordinates are not finite or out of range
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Rest policy constant is out of range
    #[error("Invalid rest policy: {0}")]
    InvalidPolicy(String),
}
