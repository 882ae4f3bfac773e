//! Reachability probing

use futures::future::join_all;
use tracing::debug;

use crate::command::paths;
use crate::config::ClientConfig;

/// Bounded-time online check for device addresses
///
/// A probe never fails: connection errors, timeouts and non-success
/// responses all read as offline.
#[derive(Debug, Clone)]
pub struct DeviceHealth {
    http: reqwest::Client,
    config: ClientConfig,
}

impl DeviceHealth {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    pub fn with_http_client(http: reqwest::Client, config: ClientConfig) -> Self {
        Self { http, config }
    }

    /// Returns true when the device answers its info resource in time
    pub async fn probe(&self, address: &str) -> bool {
        let url = self.config.endpoint_url(address, paths::DEVICE);
        match self
            .http
            .get(&url)
            .timeout(self.config.probe_timeout)
            .send()
            .await
        {
            Ok(response) => {
                let online = response.status().is_success();
                debug!(%address, status = %response.status(), online, "Probe answered");
                online
            }
            Err(error) => {
                debug!(%address, %error, "Probe failed");
                false
            }
        }
    }

    /// Probe several addresses concurrently, preserving input order
    pub async fn probe_all<S: AsRef<str>>(&self, addresses: &[S]) -> Vec<bool> {
        join_all(addresses.iter().map(|address| self.probe(address.as_ref()))).await
    }
}

impl Default for DeviceHealth {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}
