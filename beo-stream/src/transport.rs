//! Wire boundary for the long-poll notification channel

use std::time::Duration;

use async_trait::async_trait;
use beo_api::{paths, ClientConfig};
use reqwest::StatusCode;
use tracing::trace;

use crate::error::StreamResult;

/// Outcome of one long poll that reached the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResponse {
    /// Success with one event envelope as body
    Event(String),
    /// No content: the channel was closed on purpose
    Closed,
    /// Any other non-success status
    Failed { status: u16 },
}

/// Source of long-poll responses for a device address
///
/// Errors returned here are transport failures; the stream treats them
/// like a failed status and retries after its delay.
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    async fn poll(&self, address: &str) -> StreamResult<PollResponse>;
}

/// Long polls `BeoNotify/Notifications` over HTTP
#[derive(Debug, Clone)]
pub struct HttpNotificationTransport {
    http: reqwest::Client,
    client_config: ClientConfig,
    poll_timeout: Option<Duration>,
}

impl HttpNotificationTransport {
    pub fn new(client_config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_config,
            poll_timeout: None,
        }
    }

    pub fn with_poll_timeout(mut self, poll_timeout: Option<Duration>) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }
}

impl Default for HttpNotificationTransport {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

#[async_trait]
impl NotificationTransport for HttpNotificationTransport {
    async fn poll(&self, address: &str) -> StreamResult<PollResponse> {
        let url = self.client_config.endpoint_url(address, paths::NOTIFICATIONS);
        let mut request = self.http.get(&url);
        if let Some(timeout) = self.poll_timeout {
            request = request.timeout(timeout);
        }

        trace!(%address, "Issuing long poll");
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(PollResponse::Closed);
        }
        if !status.is_success() {
            return Ok(PollResponse::Failed {
                status: status.as_u16(),
            });
        }
        Ok(PollResponse::Event(response.text().await?))
    }
}
