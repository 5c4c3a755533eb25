//! openrouteservice settings: endpoint, API key, timeouts, geocoding filter.

use integration_openroute::OpenRouteConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// openrouteservice configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenRouteAppConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Country restriction for geocoding, ISO alpha-2 (empty for worldwide)
    #[serde(default = "default_country")]
    pub country: String,

    /// Geocoding cache TTL in minutes (0 disables the cache)
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u32,
}

impl std::fmt::Debug for OpenRouteAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouteAppConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("country", &self.country)
            .field("cache_ttl_minutes", &self.cache_ttl_minutes)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

fn default_country() -> String {
    "ES".to_string()
}

const fn default_cache_ttl_minutes() -> u32 {
    60
}

impl Default for OpenRouteAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            country: default_country(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
        }
    }
}

impl OpenRouteAppConfig {
    /// Whether a non-empty API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Convert to `integration_openroute`'s `OpenRouteConfig`
    #[must_use]
    pub fn to_client_config(&self) -> OpenRouteConfig {
        OpenRouteConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|k| k.expose_secret().trim().to_string())
                .unwrap_or_default(),
            timeout_secs: self.timeout_secs,
            country_filter: self.country.clone(),
            cache_ttl_minutes: self.cache_ttl_minutes,
        }
    }
}
