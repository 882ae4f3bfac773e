//! Per-selection state
//!
//! A session lives from one device selection to the next. Everything in it
//! belongs to exactly one device and one generation.

use std::sync::Arc;

use beo_state::{Device, PlaybackStore, QueueController, Source};
use beo_stream::{CancellationToken, StreamEvent};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

pub(crate) struct Session {
    pub generation: u64,
    pub device: Device,
    pub store: Arc<PlaybackStore>,
    pub sources: Vec<Source>,
    pub queue: QueueController,
    /// Parent of the device's stream token; replaced after each offline transition
    pub token: CancellationToken,
    /// Level to restore when unmuting
    pub unmuted_volume: Option<u8>,
    /// Task draining the current stream into the store
    pub forwarder: Option<JoinHandle<()>>,
}

impl Session {
    pub fn new(generation: u64, device: Device) -> Self {
        Self {
            generation,
            device: device.with_online(false),
            store: Arc::new(PlaybackStore::new()),
            sources: vec![Source::local()],
            queue: QueueController::new(),
            token: CancellationToken::new(),
            unmuted_volume: None,
            forwarder: None,
        }
    }

    /// Back to a freshly selected device's view, keeping the queue
    pub fn go_offline(&mut self) {
        // Cancel before reset: the sink checks the token under the store lock
        self.token.cancel();
        self.token = CancellationToken::new();
        self.store.reset();
        self.sources = vec![Source::local()];
        self.unmuted_volume = None;
    }

    pub fn sink(&self) -> SessionSink {
        SessionSink {
            generation: self.generation,
            address: self.device.address.clone(),
            store: Arc::clone(&self.store),
            token: self.token.clone(),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Gate between a notification stream and the session's store
///
/// Events are applied only while the session's token is live and the event
/// carries the session's address and generation.
#[derive(Clone)]
pub(crate) struct SessionSink {
    generation: u64,
    address: String,
    store: Arc<PlaybackStore>,
    token: CancellationToken,
}

impl SessionSink {
    pub fn accept(&self, event: StreamEvent) -> bool {
        let kind = event.notification.kind();
        let applied = event.generation == self.generation
            && event.address == self.address
            && self
                .store
                .apply_notification_unless_cancelled(&event.notification, &self.token);

        if applied {
            trace!(address = %event.address, kind, "Applied event");
        } else {
            debug!(
                address = %event.address,
                generation = event.generation,
                kind,
                "Dropping event for a stale selection"
            );
        }
        applied
    }
}

/// Drain a stream's events into its session until the stream ends
pub(crate) async fn forward_events(sink: SessionSink, mut events: mpsc::UnboundedReceiver<StreamEvent>) {
    while let Some(event) = events.recv().await {
        sink.accept(event);
    }
    debug!(address = %sink.address, generation = sink.generation, "Event forwarding finished");
}
