use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::command::{paths, Command};
use crate::config::ClientConfig;
use crate::health::DeviceHealth;
use crate::models::{parse_sources, PlayMode, PlaybackSnapshot, StreamInfo, VolumeInfo, WireSource};
use crate::{ApiError, Result};

/// Remote control surface of a device
///
/// Implementations never mutate shared state and never retry on their own.
/// Every failure comes back as an [`ApiError`].
#[async_trait]
pub trait DeviceControl: Send + Sync {
    /// Online check with a short bound; never errors
    async fn probe(&self, address: &str) -> bool;

    /// Send one transport command
    async fn send(&self, address: &str, command: Command) -> Result<()>;

    /// Fetch the device's current playback state
    async fn fetch_snapshot(&self, address: &str) -> Result<PlaybackSnapshot>;

    /// Fetch the playback sources the device currently offers
    async fn fetch_sources(&self, address: &str) -> Result<Vec<WireSource>>;

    async fn set_playing(&self, address: &str, playing: bool) -> Result<()> {
        self.send(address, Command::set_playing(playing)).await
    }

    async fn seek(&self, address: &str, seconds: u32) -> Result<()> {
        self.send(address, Command::Seek { seconds }).await
    }

    async fn set_volume(&self, address: &str, level: u8) -> Result<()> {
        self.send(address, Command::SetVolume { level }).await
    }

    async fn next(&self, address: &str) -> Result<()> {
        self.send(address, Command::Next).await
    }

    async fn previous(&self, address: &str) -> Result<()> {
        self.send(address, Command::Previous).await
    }

    async fn change_source(&self, address: &str, source_id: &str) -> Result<()> {
        self.send(
            address,
            Command::ChangeSource {
                id: source_id.to_string(),
            },
        )
        .await
    }

    async fn set_play_mode(&self, address: &str, mode: PlayMode) -> Result<()> {
        self.send(address, Command::SetPlayMode { mode }).await
    }
}

/// HTTP client for the device control surface
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct BeoClient {
    http: reqwest::Client,
    config: ClientConfig,
    health: DeviceHealth,
}

impl BeoClient {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let http = reqwest::Client::new();
        Self {
            health: DeviceHealth::with_http_client(http.clone(), config.clone()),
            http,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn health(&self) -> &DeviceHealth {
        &self.health
    }

    /// Send `command` and require a success status
    pub async fn execute(&self, address: &str, command: &Command) -> Result<()> {
        let url = self.config.endpoint_url(address, command.path());
        debug!(%address, command = command.name(), "Sending command");

        let response = self
            .http
            .request(command.method().as_reqwest(), &url)
            .timeout(self.config.command_timeout)
            .json(&command.body())
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%address, command = command.name(), %status, "Device rejected command");
            return Err(ApiError::CommandRejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    async fn get_text(&self, address: &str, path: &str) -> Result<String> {
        let url = self.config.endpoint_url(address, path);
        let response = self
            .http
            .get(&url)
            .timeout(self.config.command_timeout)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::CommandRejected {
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, address: &str, path: &str) -> Result<T> {
        let body = self.get_text(address, path).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Default for BeoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceControl for BeoClient {
    async fn probe(&self, address: &str) -> bool {
        self.health.probe(address).await
    }

    async fn send(&self, address: &str, command: Command) -> Result<()> {
        self.execute(address, &command).await
    }

    async fn fetch_snapshot(&self, address: &str) -> Result<PlaybackSnapshot> {
        let (stream, volume) = futures::join!(
            self.get_json::<StreamInfo>(address, paths::STREAM),
            self.get_json::<VolumeInfo>(address, paths::VOLUME),
        );

        let volume = volume.unwrap_or_else(|error| {
            warn!(%address, %error, "Volume fetch failed, leaving level unset");
            VolumeInfo::default()
        });
        Ok(PlaybackSnapshot::from_parts(stream?, volume))
    }

    async fn fetch_sources(&self, address: &str) -> Result<Vec<WireSource>> {
        let body = self.get_text(address, paths::SOURCES).await?;
        Ok(parse_sources(&body)?)
    }
}
