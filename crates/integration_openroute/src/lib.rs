//! openrouteservice integration for the truck journey planner
//!
//! Provides address geocoding via the
//! [openrouteservice geocoder](https://openrouteservice.org/dev/#/api-docs/geocode)
//! and heavy-goods-vehicle routing via the
//! [directions API](https://openrouteservice.org/dev/#/api-docs/v2/directions).
//!
//! # Architecture
//!
//! [`GeocodingClient`] defines address-to-coordinate lookup, implemented by
//! [`OpenRouteGeocodingClient`]. [`DirectionsClient`] defines route requests
//! through an ordered list of coordinates, implemented by
//! [`OpenRouteDirectionsClient`]. Both share one [`OpenRouteConfig`].
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::VehicleProfile;
//! use integration_openroute::{
//!     DirectionsClient, GeocodingClient, OpenRouteConfig, OpenRouteDirectionsClient,
//!     OpenRouteGeocodingClient,
//! };
//!
//! let config = OpenRouteConfig::with_api_key("my-key");
//! let geocoder = OpenRouteGeocodingClient::new(&config)?;
//! let directions = OpenRouteDirectionsClient::new(&config)?;
//!
//! let valencia = geocoder.geocode("Valencia, España").await?;
//! let madrid = geocoder.geocode("Madrid, España").await?;
//! let route = directions
//!     .directions(&[valencia.coordinate, madrid.coordinate], VehicleProfile::HeavyGoodsVehicle)
//!     .await?;
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;

pub use client::{DirectionsClient, OpenRouteDirectionsClient};
pub use config::OpenRouteConfig;
pub use error::OpenRouteError;
pub use geocoding::{GeocodingClient, OpenRouteGeocodingClient};
pub use models::{Directions, DirectionsSegment, GeocodeMatch};
