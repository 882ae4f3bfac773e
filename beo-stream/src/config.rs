//! Configuration types for the beo-stream crate

use std::time::Duration;

/// Settings for a notification stream
#[derive(Debug, Clone, PartialEq)]
pub struct StreamConfig {
    /// Fixed delay before re-polling after a failure
    /// Default: 5 seconds
    pub retry_delay: Duration,

    /// Upper bound on a single long poll; `None` leaves it to the device
    /// Default: None
    pub poll_timeout: Option<Duration>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            retry_delay: Duration::from_secs(5),
            poll_timeout: None,
        }
    }
}

impl StreamConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Short retry delay, useful on a bench or in tests
    pub fn fast_retry() -> Self {
        Self {
            retry_delay: Duration::from_millis(500),
            ..Self::default()
        }
    }

    /// Bounded polls for networks where idle connections get dropped silently
    pub fn bounded_polls(poll_timeout: Duration) -> Self {
        Self {
            poll_timeout: Some(poll_timeout),
            ..Self::default()
        }
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }
}
