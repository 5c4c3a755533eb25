//! openrouteservice client configuration

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration shared by the geocoding and directions clients
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenRouteConfig {
    /// Base URL for the openrouteservice API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (sent as `api_key` query parameter or `Authorization` header)
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// ISO 3166-1 alpha-2 country restriction for geocoding (empty to disable)
    #[serde(default = "default_country_filter")]
    pub country_filter: String,

    /// Geocoding cache TTL in minutes (0 to disable caching)
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u32,
}

fn default_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

fn default_country_filter() -> String {
    "ES".to_string()
}

const fn default_cache_ttl_minutes() -> u32 {
    60
}

impl Default for OpenRouteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            country_filter: default_country_filter(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
        }
    }
}

impl fmt::Debug for OpenRouteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRouteConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("country_filter", &self.country_filter)
            .field("cache_ttl_minutes", &self.cache_ttl_minutes)
            .finish()
    }
}

impl OpenRouteConfig {
    /// Default configuration with the given API key
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: "test-key".to_string(),
            timeout_secs: 5,
            cache_ttl_minutes: 0,
            ..Default::default()
        }
    }

    /// Check if geocode caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_minutes > 0
    }

    /// Base URL without a trailing slash
    #[must_use]
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        Url::parse(&self.base_url).map_err(|e| format!("base_url is not a valid URL: {e}"))?;

        if self.api_key.trim().is_empty() {
            return Err("api_key must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if !self.country_filter.is_empty()
            && (self.country_filter.len() != 2
                || !self.country_filter.chars().all(|c| c.is_ascii_alphabetic()))
        {
            return Err(format!(
                "country_filter must be a two-letter country code, got '{}'",
                self.country_filter
            ));
        }

        Ok(())
    }
}
