//! # Beo Stream
//!
//! Long-poll notification streaming for network audio devices.
//!
//! The device exposes its events through a request/response endpoint that
//! is held open until something happens. [`NotificationStream`] turns that
//! into a continuous stream: every successful poll yields one event and is
//! immediately re-issued, failures back off for a fixed delay, and a
//! cancellation token ends the loop deterministically.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐  poll   ┌────────────────────┐  StreamEvent  ┌──────────┐
//! │   transport   │ ◀────── │ NotificationStream │ ────────────▶ │ consumer │
//! │ (HTTP / fake) │ ──────▶ │   (tokio task)     │   (mpsc)      └──────────┘
//! └───────────────┘  body   └────────────────────┘
//!                                    ▲
//!                          StreamManager (one live stream)
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use beo_stream::{HttpNotificationTransport, StreamConfig, StreamManager};
//! use beo_stream::CancellationToken;
//!
//! # async fn demo() {
//! let manager = StreamManager::new(
//!     Arc::new(HttpNotificationTransport::default()),
//!     StreamConfig::default(),
//! );
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! let token = CancellationToken::new();
//! manager.start("192.168.1.40", 1, &token, tx);
//!
//! while let Some(event) = rx.recv().await {
//!     println!("{} -> {:?}", event.address, event.notification);
//! }
//! # }
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod manager;
pub mod stream;
pub mod transport;

pub use config::StreamConfig;
pub use error::{StreamError, StreamResult};
pub use event::{Envelope, Notification, StreamEvent};
pub use manager::StreamManager;
pub use stream::{NotificationStream, StreamState, StreamStats};
pub use transport::{HttpNotificationTransport, NotificationTransport, PollResponse};

// Re-export the cancellation primitive so callers need not depend on tokio-util
pub use tokio_util::sync::CancellationToken;
