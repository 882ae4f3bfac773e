//! Error types for the discovery client.

use std::fmt;

/// Error type for discovery operations.
///
/// The convenience functions swallow these and return an empty list; use
/// [`crate::try_get_from`] to observe them.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The discovery service could not be reached
    NetworkError(String),
    /// The service answered with a non-success status
    ServiceError(u16),
    /// The response body was not a device list
    ParseError(String),
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DiscoveryError::ServiceError(status) => {
                write!(f, "Discovery service responded with status {}", status)
            }
            DiscoveryError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for DiscoveryError {}

impl From<reqwest::Error> for DiscoveryError {
    fn from(error: reqwest::Error) -> Self {
        DiscoveryError::NetworkError(error.to_string())
    }
}

impl From<serde_json::Error> for DiscoveryError {
    fn from(error: serde_json::Error) -> Self {
        DiscoveryError::ParseError(error.to_string())
    }
}

/// Convenience Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
