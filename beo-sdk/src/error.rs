use beo_api::ApiError;
use beo_discovery::DiscoveryError;
use beo_state::{DeviceId, PlaylistId, TrackId};
use thiserror::Error;

use crate::logging::LoggingError;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("No device selected")]
    NoDeviceSelected,

    #[error("Device not found: {0}")]
    DeviceNotFound(DeviceId),

    #[error("Device offline: {0}")]
    DeviceOffline(String),

    #[error("Command {command} failed: {source}")]
    Command {
        command: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("The active source is not the local queue")]
    SourceNotLocal,

    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    #[error("Track not in queue: {0}")]
    TrackNotInQueue(TrackId),

    #[error("Discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),
}

impl SdkError {
    /// The device-level error behind a failed command, if any
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            SdkError::Command { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SdkError>;
