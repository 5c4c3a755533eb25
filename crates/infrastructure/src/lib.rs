//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of openrouteservice and provides
//! configuration loading and log output setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::OpenRouteAdapter;
pub use config::{AppConfig, OpenRouteAppConfig, PlannerConfig};
pub use telemetry::{LoggingConfig, TelemetryError, init_logging};
