//! # Beo API
//!
//! Typed access to the HTTP/JSON control surface of Bang & Olufsen network
//! audio devices.
//!
//! ```text
//! ┌─────────────┐   Command    ┌────────────┐   HTTP/JSON   ┌────────┐
//! │   caller    │ ───────────▶ │ BeoClient  │ ────────────▶ │ device │
//! └─────────────┘              └────────────┘   :8080       └────────┘
//!                                    │
//!                              DeviceHealth (probe, 1 s bound)
//! ```
//!
//! Commands are stateless: the client maps each [`Command`] to a method,
//! resource path and JSON body and reports the outcome as a [`Result`].
//! Nothing is retried automatically.
//!
//! ## Example
//!
//! ```rust,no_run
//! use beo_api::{BeoClient, DeviceControl};
//!
//! # async fn demo() -> beo_api::Result<()> {
//! let client = BeoClient::new();
//! if client.probe("192.168.1.40").await {
//!     client.set_volume("192.168.1.40", 35).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod health;
pub mod models;

pub use client::{BeoClient, DeviceControl};
pub use command::{paths, Command, Method};
pub use config::{ClientConfig, DEFAULT_PORT};
pub use error::{ApiError, Result};
pub use health::DeviceHealth;
pub use models::{
    parse_sources, PlayMode, PlaybackSnapshot, StreamInfo, VolumeInfo, WireSource, WireTrack,
    UNKNOWN_ARTIST,
};
