//! Ownership of live notification streams
//!
//! The manager keeps at most one stream alive. Starting a stream cancels
//! every stream it already holds before the new loop is spawned.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::StreamConfig;
use crate::event::StreamEvent;
use crate::stream::{NotificationStream, StreamState};
use crate::transport::NotificationTransport;

/// Starts, replaces and stops notification streams
pub struct StreamManager {
    transport: Arc<dyn NotificationTransport>,
    config: StreamConfig,
    streams: Mutex<HashMap<String, NotificationStream>>,
}

impl StreamManager {
    pub fn new(transport: Arc<dyn NotificationTransport>, config: StreamConfig) -> Self {
        Self {
            transport,
            config,
            streams: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Start streaming `address`, replacing any stream already held
    ///
    /// The stream runs under a child of `parent`, so cancelling `parent`
    /// stops it too. Prior streams are cancelled before this spawns.
    pub fn start(
        &self,
        address: &str,
        generation: u64,
        parent: &CancellationToken,
        events: mpsc::UnboundedSender<StreamEvent>,
    ) {
        let mut streams = self.streams.lock();
        for (old_address, old) in streams.drain() {
            debug!(address = %old_address, generation = old.generation(), "Replacing notification stream");
            old.stop();
        }

        let stream = NotificationStream::spawn(
            address,
            generation,
            Arc::clone(&self.transport),
            self.config.clone(),
            parent.child_token(),
            events,
        );
        streams.insert(address.to_string(), stream);
    }

    /// Stop the stream for `address`; returns whether one was held
    pub fn stop(&self, address: &str) -> bool {
        match self.streams.lock().remove(address) {
            Some(stream) => {
                stream.stop();
                true
            }
            None => false,
        }
    }

    /// Stop every stream; returns how many were held
    pub fn stop_all(&self) -> usize {
        let mut streams = self.streams.lock();
        let count = streams.len();
        for (_, stream) in streams.drain() {
            stream.stop();
        }
        count
    }

    /// True when a live, uncancelled stream exists for `address`
    pub fn is_streaming(&self, address: &str) -> bool {
        self.streams
            .lock()
            .get(address)
            .map(|s| s.is_running() && !s.is_cancelled())
            .unwrap_or(false)
    }

    /// Number of live, uncancelled streams
    pub fn active_count(&self) -> usize {
        self.streams
            .lock()
            .values()
            .filter(|s| s.is_running() && !s.is_cancelled())
            .count()
    }

    pub fn active_addresses(&self) -> Vec<String> {
        self.streams
            .lock()
            .iter()
            .filter(|(_, s)| s.is_running() && !s.is_cancelled())
            .map(|(address, _)| address.clone())
            .collect()
    }

    pub fn state(&self, address: &str) -> Option<StreamState> {
        self.streams.lock().get(address).map(|s| s.state())
    }

    /// Cancel every stream and wait for their tasks to finish
    pub async fn shutdown_all(&self) {
        let streams: Vec<NotificationStream> =
            self.streams.lock().drain().map(|(_, s)| s).collect();

        for stream in streams {
            let address = stream.address().to_string();
            if let Err(error) = stream.shutdown().await {
                warn!(%address, %error, "Notification stream did not shut down cleanly");
            }
        }
    }
}

impl std::fmt::Debug for StreamManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamManager")
            .field("config", &self.config)
            .field("streams", &self.streams.lock().len())
            .finish()
    }
}
