use std::time::Duration;

/// Default control port of the device's HTTP surface
pub const DEFAULT_PORT: u16 = 8080;

/// Settings for talking to a device's control surface
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Port used when the device address carries none
    /// Default: 8080
    pub port: u16,

    /// Upper bound on a reachability probe
    /// Default: 1 second
    pub probe_timeout: Duration,

    /// Upper bound on a single command or state fetch
    /// Default: 5 seconds
    pub command_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            probe_timeout: Duration::from_secs(1),
            command_timeout: Duration::from_secs(5),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Short timeouts for wired networks where devices answer quickly
    pub fn fast_network() -> Self {
        Self {
            probe_timeout: Duration::from_millis(500),
            command_timeout: Duration::from_secs(2),
            ..Self::default()
        }
    }

    /// Generous timeouts for congested or wireless networks
    pub fn slow_network() -> Self {
        Self {
            probe_timeout: Duration::from_secs(2),
            command_timeout: Duration::from_secs(10),
            ..Self::default()
        }
    }

    /// Build the URL for `path` on the device at `address`
    ///
    /// `address` may be a bare host, a `host:port` pair or a full
    /// `http://` base URL; only a bare host gets the configured port.
    pub fn endpoint_url(&self, address: &str, path: &str) -> String {
        let address = address.trim().trim_end_matches('/');
        let base = if address.starts_with("http://") || address.starts_with("https://") {
            address.to_string()
        } else if address.contains(':') {
            format!("http://{address}")
        } else {
            format!("http://{address}:{}", self.port)
        };
        format!("{base}/{}", path.trim_start_matches('/'))
    }
}
