//! Geocoding service port
//!
//! Resolves free-text place names to coordinates. Adapters in the
//! infrastructure layer implement this port on top of a geocoding API.

use async_trait::async_trait;
use domain::Coordinate;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A place name resolved to its best-matching coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    /// Address text as entered
    pub query: String,
    /// Provider display label, if any
    pub label: Option<String>,
    /// Resolved position
    pub coordinate: Coordinate,
}

impl GeocodedPlace {
    /// Label if the provider gave one, otherwise the query text
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.query)
    }
}

/// Port for geocoding operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve an address to a single best match
    ///
    /// Returns `Ok(None)` when the address has no match. Transport and
    /// protocol failures are errors.
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedPlace>, ApplicationError>;
}
