//! # Beo SDK - playback control for Bang & Olufsen network audio devices
//!
//! One [`Orchestrator`] drives the whole client: it keeps the list of known
//! devices, follows the selected device's notification stream, holds that
//! device's playback state and dispatches user commands.
//!
//! ```rust,no_run
//! use beo_sdk::{Orchestrator, SdkConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), beo_sdk::SdkError> {
//!     beo_sdk::logging::init_logging_from_env()?;
//!
//!     let orchestrator = Orchestrator::builder()
//!         .with_config(SdkConfig::from_env()?)
//!         .build();
//!     orchestrator.add_device("Living Room", "192.168.1.40").await?;
//!
//!     let mut playback = orchestrator.watch_playback().expect("device selected");
//!     orchestrator.set_playing(true).await?;
//!
//!     while playback.changed().await.is_ok() {
//!         let state = playback.borrow().clone();
//!         println!("{} {}s vol {}", state.play_state, state.progress_secs, state.volume);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Optimistic commands**: the display changes at once; play/pause revert when
//!   the device rejects them, volume and seek keep the guess until the device reports
//! - **Device wins**: stream events and fetched snapshots always overwrite local guesses
//! - **One live stream**: selecting a device cancels the previous device's stream
//!   before the new one starts, and late events from it are discarded
//! - **Local queue**: next/previous on the local source follow the play mode
//!   without asking the device
//! - **Notices**: failed commands are published for the UI on a broadcast channel
//!
//! ## Architecture
//!
//! ```text
//! beo-sdk       Orchestrator, registry, playlists, notices, config, logging
//!     ↓
//! beo-state     PlaybackStore (precedence), QueueController
//!     ↓
//! beo-stream    NotificationStream (long poll, backoff, cancellation)
//!     ↓
//! beo-api       DeviceControl / BeoClient, DeviceHealth, wire models
//! ```

pub mod catalogue;
pub mod config;
pub mod error;
pub mod logging;
pub mod notice;
pub mod orchestrator;
pub mod playlists;
pub mod registry;

mod session;

pub use catalogue::{Catalogue, StaticCatalogue};
pub use config::{DiscoveryConfig, SdkConfig};
pub use error::{Result, SdkError};
pub use notice::{Notice, Severity};
pub use orchestrator::{Orchestrator, OrchestratorBuilder};
pub use playlists::PlaylistLibrary;
pub use registry::{DeviceRegistry, MemoryRegistry};

pub use beo_api::{ApiError, BeoClient, ClientConfig, Command, DeviceControl};
pub use beo_discovery::DiscoveredDevice;
pub use beo_state::{
    Device, DeviceId, PlayMode, PlayState, PlaybackState, Playlist, PlaylistId, Source, SourceId,
    SourceKind, Track, TrackId,
};
pub use beo_stream::{NotificationTransport, StreamConfig, StreamState};

/// Everything an application usually needs
pub mod prelude {
    pub use crate::{
        Device, DeviceId, Notice, Orchestrator, PlayMode, PlayState, PlaybackState, Playlist,
        PlaylistId, SdkConfig, SdkError, Severity, Source, SourceId, Track, TrackId,
    };
}
