//! Logging infrastructure
//!
//! Structured `tracing` output to stderr, text or JSON.

mod logging;

pub use logging::{LoggingConfig, TelemetryError, init_logging};
