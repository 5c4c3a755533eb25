//! Application configuration
//!
//! Layered in this order, later sources winning:
//! 1. built-in defaults
//! 2. `truckplanner.toml` in the working directory, or an explicit file
//! 3. `TRUCKPLANNER_` environment variables, `__` between nested keys
//!    (e.g. `TRUCKPLANNER_OPENROUTE__API_KEY`)
//!
//! Split into sub-modules:
//! - `openroute`: provider endpoint, API key, geocoding cache
//! - `planner`: default departure, vehicle profile, rest policy

mod openroute;
mod planner;

use std::path::Path;

use integration_openroute::OpenRouteConfig;
use serde::{Deserialize, Serialize};

use crate::telemetry::LoggingConfig;

pub use openroute::OpenRouteAppConfig;
pub use planner::PlannerConfig;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_NAME: &str = "truckplanner";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "TRUCKPLANNER";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// openrouteservice configuration
    #[serde(default)]
    pub openroute: OpenRouteAppConfig,

    /// Journey planner defaults
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Log output configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment
    ///
    /// With `path` set the file must exist; otherwise `truckplanner.toml` is
    /// read if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a value has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Load with an explicit environment map instead of the process environment
    fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("openroute.base_url", "https://api.openrouteservice.org")?
            .set_default("planner.default_departure", "08:00")?
            .add_source(file)
            // Override with environment variables (e.g., TRUCKPLANNER_PLANNER__DEFAULT_DEPARTURE)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Check the settings every command relies on
    ///
    /// # Errors
    ///
    /// Returns [`config::ConfigError::Message`] naming the invalid setting.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.planner.validate().map_err(config::ConfigError::Message)?;
        self.logging.validate().map_err(config::ConfigError::Message)
    }

    /// Client configuration for commands that call openrouteservice
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or a provider setting is invalid.
    pub fn openroute_client_config(&self) -> Result<OpenRouteConfig, config::ConfigError> {
        if !self.openroute.has_api_key() {
            return Err(config::ConfigError::Message(format!(
                "openroute.api_key is not set (use {ENV_PREFIX}_OPENROUTE__API_KEY or {DEFAULT_CONFIG_NAME}.toml)"
            )));
        }

        let client = self.openroute.to_client_config();
        client
            .validate()
            .map_err(|e| config::ConfigError::Message(format!("openroute: {e}")))?;
        Ok(client)
    }
}
