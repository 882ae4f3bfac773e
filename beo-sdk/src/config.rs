//! SDK configuration
//!
//! Settings come from code, a TOML file or the environment. File values
//! override the defaults and `BEO_*` variables override both.
//!
//! ```toml
//! [device]
//! port = 8080
//! probe_timeout_ms = 1000
//! command_timeout_ms = 5000
//!
//! [stream]
//! retry_delay_ms = 5000
//! poll_timeout_ms = 60000
//!
//! [discovery]
//! url = "http://localhost:9003/discover"
//! timeout_ms = 3000
//!
//! [notices]
//! capacity = 64
//! ```

use std::path::Path;
use std::time::Duration;

use beo_api::ClientConfig;
use beo_stream::StreamConfig;
use serde::Deserialize;

use crate::error::{Result, SdkError};

pub const ENV_DEVICE_PORT: &str = "BEO_DEVICE_PORT";
pub const ENV_RETRY_DELAY_MS: &str = "BEO_RETRY_DELAY_MS";
pub const ENV_DISCOVERY_URL: &str = "BEO_DISCOVERY_URL";

/// Where and how long to ask the discovery service
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryConfig {
    /// Default: `http://localhost:9003/discover`
    pub service_url: String,
    /// Default: 3 seconds
    pub timeout: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            service_url: beo_discovery::DEFAULT_SERVICE_URL.to_string(),
            timeout: beo_discovery::DEFAULT_TIMEOUT,
        }
    }
}

/// Configuration for an [`Orchestrator`](crate::Orchestrator)
#[derive(Debug, Clone, PartialEq)]
pub struct SdkConfig {
    pub client: ClientConfig,
    pub stream: StreamConfig,
    pub discovery: DiscoveryConfig,

    /// Buffered notices per subscriber before the slowest one lags
    /// Default: 64
    pub notice_capacity: usize,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            stream: StreamConfig::default(),
            discovery: DiscoveryConfig::default(),
            notice_capacity: 64,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    device: DeviceSection,
    stream: StreamSection,
    discovery: DiscoverySection,
    notices: NoticeSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DeviceSection {
    port: Option<u16>,
    probe_timeout_ms: Option<u64>,
    command_timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct StreamSection {
    retry_delay_ms: Option<u64>,
    poll_timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DiscoverySection {
    url: Option<String>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct NoticeSection {
    capacity: Option<usize>,
}

impl SdkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: FileConfig =
            toml::from_str(text).map_err(|e| SdkError::Config(e.to_string()))?;
        let mut config = Self::default();

        if let Some(port) = file.device.port {
            config.client.port = port;
        }
        if let Some(ms) = file.device.probe_timeout_ms {
            config.client.probe_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = file.device.command_timeout_ms {
            config.client.command_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = file.stream.retry_delay_ms {
            config.stream.retry_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = file.stream.poll_timeout_ms {
            config.stream.poll_timeout = Some(Duration::from_millis(ms));
        }
        if let Some(url) = file.discovery.url {
            config.discovery.service_url = url;
        }
        if let Some(ms) = file.discovery.timeout_ms {
            config.discovery.timeout = Duration::from_millis(ms);
        }
        if let Some(capacity) = file.notices.capacity {
            config.notice_capacity = capacity;
        }

        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file, then apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SdkError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)?.with_env_overrides()
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `BEO_*` overrides read through `lookup`
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_DEVICE_PORT) {
            self.client.port = parse_env(ENV_DEVICE_PORT, &value)?;
        }
        if let Some(value) = lookup(ENV_RETRY_DELAY_MS) {
            let ms: u64 = parse_env(ENV_RETRY_DELAY_MS, &value)?;
            self.stream.retry_delay = Duration::from_millis(ms);
        }
        if let Some(value) = lookup(ENV_DISCOVERY_URL) {
            self.discovery.service_url = value.trim().to_string();
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.client.port == 0 {
            return Err(SdkError::Config("device port must be non-zero".into()));
        }
        if self.notice_capacity == 0 {
            return Err(SdkError::Config("notice capacity must be at least 1".into()));
        }
        if self.discovery.service_url.is_empty() {
            return Err(SdkError::Config("discovery url must not be empty".into()));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| SdkError::Config(format!("{key}: invalid value {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = SdkConfig::default();
        assert_eq!(config.client.port, 8080);
        assert_eq!(config.stream.retry_delay, Duration::from_secs(5));
        assert_eq!(config.discovery.service_url, "http://localhost:9003/discover");
        assert_eq!(config.notice_capacity, 64);
    }

    #[test]
    fn test_partial_toml() {
        let config = SdkConfig::from_toml_str(
            r#"
            [device]
            port = 8090

            [stream]
            retry_delay_ms = 250
            poll_timeout_ms = 30000
            "#,
        )
        .unwrap();

        assert_eq!(config.client.port, 8090);
        assert_eq!(config.client.command_timeout, Duration::from_secs(5));
        assert_eq!(config.stream.retry_delay, Duration::from_millis(250));
        assert_eq!(config.stream.poll_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = SdkConfig::from_toml_str("[device]\nhost = \"x\"\n").unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[rstest]
    #[case::zero_port("[device]\nport = 0\n", "port")]
    #[case::zero_capacity("[notices]\ncapacity = 0\n", "capacity")]
    #[case::empty_url("[discovery]\nurl = \"\"\n", "url")]
    fn test_invalid_values_rejected(#[case] toml: &str, #[case] field: &str) {
        let err = SdkConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, SdkError::Config(msg) if msg.contains(field)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_DEVICE_PORT, "9000"),
            (ENV_RETRY_DELAY_MS, "1500"),
            (ENV_DISCOVERY_URL, "http://10.0.0.2:9003/discover"),
        ]
        .into_iter()
        .collect();

        let config = SdkConfig::default()
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.client.port, 9000);
        assert_eq!(config.stream.retry_delay, Duration::from_millis(1500));
        assert_eq!(config.discovery.service_url, "http://10.0.0.2:9003/discover");
    }

    #[test]
    fn test_bad_env_value() {
        let result = SdkConfig::default()
            .apply_overrides(|key| (key == ENV_DEVICE_PORT).then(|| "eighty".to_string()));
        assert!(matches!(result, Err(SdkError::Config(msg)) if msg.contains("BEO_DEVICE_PORT")));
    }
}
