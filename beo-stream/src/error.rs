//! Error types for the beo-stream crate.

/// Failures observed by a notification stream
///
/// None of these escape the stream loop as a failure: transport and decode
/// problems lead to a backoff and retry, cancellation ends the loop cleanly.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The notification endpoint could not be reached
    #[error("Notification endpoint unreachable: {0}")]
    Unreachable(String),

    /// The event payload failed to decode or lacked expected fields
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    /// The stream was stopped on purpose
    #[error("Stream cancelled")]
    Cancelled,

    /// The background task panicked or was aborted
    #[error("Stream task failed: {0}")]
    TaskJoin(String),
}

impl StreamError {
    /// True when the loop should back off and retry after this error
    pub fn is_retryable(&self) -> bool {
        matches!(self, StreamError::Unreachable(_) | StreamError::MalformedEvent(_))
    }
}

impl From<reqwest::Error> for StreamError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            StreamError::MalformedEvent(error.to_string())
        } else {
            StreamError::Unreachable(error.to_string())
        }
    }
}

impl From<serde_json::Error> for StreamError {
    fn from(error: serde_json::Error) -> Self {
        StreamError::MalformedEvent(error.to_string())
    }
}

impl From<tokio::task::JoinError> for StreamError {
    fn from(error: tokio::task::JoinError) -> Self {
        StreamError::TaskJoin(error.to_string())
    }
}

pub type StreamResult<T> = Result<T, StreamError>;
