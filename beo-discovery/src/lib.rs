//! Bang & Olufsen device discovery client
//!
//! Devices advertise themselves over mDNS. Scanning is long-running, so it
//! lives in a separate local service; this crate only asks that service for
//! the devices it has seen.
//!
//! Discovery is best effort: an unreachable service or a bad answer reads
//! as "nothing found".
//!
//! # Quick Start
//!
//! ```no_run
//! use beo_discovery::get;
//!
//! for device in get() {
//!     println!("Found {} at {}", device.name, device.address);
//! }
//! ```

mod error;

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

pub use error::{DiscoveryError, Result};

/// Where the local discovery service listens by default
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:9003/discover";

/// Default bound on a discovery request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// A candidate device reported by the discovery service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiscoveredDevice {
    /// Service-assigned identifier (usually the mDNS name), if any
    #[serde(default)]
    pub id: Option<String>,
    /// Advertised device name
    pub name: String,
    /// Network address, preferring IPv4
    #[serde(rename = "ip", alias = "address")]
    pub address: String,
}

/// Ask the default discovery service, waiting at most 3 seconds.
pub fn get() -> Vec<DiscoveredDevice> {
    get_with_timeout(DEFAULT_TIMEOUT)
}

/// Ask the default discovery service with a custom timeout.
pub fn get_with_timeout(timeout: Duration) -> Vec<DiscoveredDevice> {
    get_from(DEFAULT_SERVICE_URL, timeout)
}

/// Ask the discovery service at `url`; any failure yields an empty list.
///
/// This blocks the calling thread. From async code, run it on a blocking
/// task.
pub fn get_from(url: &str, timeout: Duration) -> Vec<DiscoveredDevice> {
    try_get_from(url, timeout).unwrap_or_else(|error| {
        warn!(%url, %error, "Discovery service unavailable");
        Vec::new()
    })
}

/// Ask the discovery service at `url`, reporting failures.
pub fn try_get_from(url: &str, timeout: Duration) -> Result<Vec<DiscoveredDevice>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;
    let response = client.get(url).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(DiscoveryError::ServiceError(status.as_u16()));
    }

    let body = response.text()?;
    let devices: Vec<DiscoveredDevice> = serde_json::from_str(&body)?;
    debug!(count = devices.len(), "Discovery service answered");
    Ok(devices)
}
