//! openrouteservice error types

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur during geocoding and routing requests
#[derive(Debug, Error)]
pub enum OpenRouteError {
    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request failed with an unexpected status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the service response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// API key missing, invalid or without quota
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Address could not be resolved to coordinates
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// Request rejected before it was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The provider answered without a route
    #[error("No route found")]
    NoRouteFound,

    /// The provider refused to route the coordinate set
    #[error("Routing rejected (code {code:?}): {message}")]
    RoutingRejected {
        /// Provider error code, e.g. 2010 for an unroutable point
        code: Option<i64>,
        /// Provider error message
        message: String,
    },

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl OpenRouteError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::ServiceUnavailable(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }

    /// Map a transport error from reqwest
    pub(crate) fn from_reqwest(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else {
            Self::ConnectionFailed(err.to_string())
        }
    }

    /// Map a non-success status that is not specific to one endpoint
    ///
    /// Returns `None` for statuses the caller should interpret itself.
    pub(crate) fn from_status(status: StatusCode, retry_after_secs: Option<u64>) -> Option<Self> {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Some(Self::Unauthorized(format!("HTTP {status}")))
            },
            StatusCode::TOO_MANY_REQUESTS => Some(Self::RateLimitExceeded { retry_after_secs }),
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                Some(Self::ServiceUnavailable(format!("HTTP {status}")))
            },
            _ => None,
        }
    }
}

/// Parse the `retry-after` header in seconds
pub(crate) fn retry_after(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}
