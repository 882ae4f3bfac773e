use thiserror::Error;

/// Errors returned by device control calls
#[derive(Debug, Error)]
pub enum ApiError {
    /// The device could not be reached: connection refused, timeout or
    /// the request was aborted before a response arrived
    #[error("Device unreachable: {0}")]
    Unreachable(String),

    /// The device answered but refused the command
    #[error("Command rejected by device (HTTP {status})")]
    CommandRejected {
        /// HTTP status returned by the device
        status: u16,
    },

    /// The device answered with a body that could not be decoded
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The device address could not be turned into a request URL
    #[error("Invalid device address: {0}")]
    InvalidAddress(String),
}

impl ApiError {
    /// True when the failure is a transport-level problem rather than a refusal
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ApiError::Unreachable(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            ApiError::CommandRejected {
                status: status.as_u16(),
            }
        } else if error.is_decode() {
            ApiError::Malformed(error.to_string())
        } else if error.is_builder() {
            ApiError::InvalidAddress(error.to_string())
        } else {
            ApiError::Unreachable(error.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Malformed(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
