//! The per-device long-poll loop
//!
//! ```text
//!   Idle ──start──▶ Connecting ──event──▶ Streaming ──re-poll──▶ Connecting
//!                      │    ▲
//!              failure │    │ retry_delay
//!                      ▼    │
//!                     Backoff
//!
//!   cancel or 204 from any state ──▶ Idle
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::StreamConfig;
use crate::error::{StreamError, StreamResult};
use crate::event::{Notification, StreamEvent};
use crate::transport::{NotificationTransport, PollResponse};

/// Where a stream's loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamState {
    /// Not running: never started, cancelled or closed by the device
    #[default]
    Idle,
    /// A long poll is outstanding
    Connecting,
    /// An event was just received and is being dispatched
    Streaming,
    /// Waiting out the retry delay after a failure
    Backoff,
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StreamState::Idle => "idle",
            StreamState::Connecting => "connecting",
            StreamState::Streaming => "streaming",
            StreamState::Backoff => "backoff",
        };
        f.write_str(name)
    }
}

/// Counters for one stream
#[derive(Debug, Default)]
pub struct StreamStats {
    polls: AtomicU64,
    events: AtomicU64,
    failures: AtomicU64,
}

impl StreamStats {
    /// Long polls issued
    pub fn polls(&self) -> u64 {
        self.polls.load(Ordering::Relaxed)
    }

    /// Notifications forwarded to the consumer
    pub fn events(&self) -> u64 {
        self.events.load(Ordering::Relaxed)
    }

    /// Failures that led to a backoff
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

/// A running notification stream for one device
///
/// The loop runs on its own task until the cancellation token fires or the
/// device closes the channel. Dropping the handle cancels the token, so a
/// stream can never outlive its owner.
#[derive(Debug)]
pub struct NotificationStream {
    address: String,
    generation: u64,
    token: CancellationToken,
    state: watch::Receiver<StreamState>,
    stats: Arc<StreamStats>,
    task_handle: Option<JoinHandle<()>>,
}

impl NotificationStream {
    /// Start streaming events for `address`
    ///
    /// Events are tagged with `generation` and sent on `events`. The loop
    /// exits when `token` is cancelled, when the device closes the channel,
    /// or when the receiving side of `events` is dropped.
    pub fn spawn(
        address: impl Into<String>,
        generation: u64,
        transport: Arc<dyn NotificationTransport>,
        config: StreamConfig,
        token: CancellationToken,
        events: mpsc::UnboundedSender<StreamEvent>,
    ) -> Self {
        let address = address.into();
        let (state_tx, state_rx) = watch::channel(StreamState::Idle);
        let stats = Arc::new(StreamStats::default());

        let worker = StreamWorker {
            address: address.clone(),
            generation,
            transport,
            config,
            token: token.clone(),
            events,
            state: state_tx,
            stats: Arc::clone(&stats),
        };
        let task_handle = tokio::spawn(worker.run());

        Self {
            address,
            generation,
            token,
            state: state_rx,
            stats,
            task_handle: Some(task_handle),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> StreamState {
        *self.state.borrow()
    }

    /// Subscribe to state transitions
    pub fn watch_state(&self) -> watch::Receiver<StreamState> {
        self.state.clone()
    }

    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// True while the loop task has not finished
    pub fn is_running(&self) -> bool {
        self.task_handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Request cancellation; returns immediately
    ///
    /// An in-flight poll is abandoned and no event is forwarded after this
    /// call returns.
    pub fn stop(&self) {
        if !self.token.is_cancelled() {
            debug!(address = %self.address, generation = self.generation, "Stopping notification stream");
        }
        self.token.cancel();
    }

    /// Cancel and wait for the loop task to finish
    pub async fn shutdown(mut self) -> StreamResult<()> {
        self.stop();
        match self.task_handle.take() {
            Some(handle) => handle.await.map_err(StreamError::from),
            None => Ok(()),
        }
    }
}

impl Drop for NotificationStream {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

struct StreamWorker {
    address: String,
    generation: u64,
    transport: Arc<dyn NotificationTransport>,
    config: StreamConfig,
    token: CancellationToken,
    events: mpsc::UnboundedSender<StreamEvent>,
    state: watch::Sender<StreamState>,
    stats: Arc<StreamStats>,
}

enum Step {
    Repoll,
    Backoff,
    Exit,
}

impl StreamWorker {
    async fn run(self) {
        info!(address = %self.address, generation = self.generation, "Notification stream started");

        loop {
            if self.token.is_cancelled() {
                break;
            }
            self.set_state(StreamState::Connecting);
            self.stats.polls.fetch_add(1, Ordering::Relaxed);

            let outcome = tokio::select! {
                biased;
                _ = self.token.cancelled() => break,
                outcome = self.transport.poll(&self.address) => outcome,
            };

            // The poll may have completed in the same instant as a cancel.
            if self.token.is_cancelled() {
                break;
            }

            match self.handle(outcome) {
                Step::Repoll => continue,
                Step::Exit => break,
                Step::Backoff => {
                    self.stats.failures.fetch_add(1, Ordering::Relaxed);
                    self.set_state(StreamState::Backoff);
                    tokio::select! {
                        biased;
                        _ = self.token.cancelled() => break,
                        _ = tokio::time::sleep(self.config.retry_delay) => {}
                    }
                }
            }
        }

        self.set_state(StreamState::Idle);
        info!(address = %self.address, generation = self.generation, "Notification stream stopped");
    }

    fn handle(&self, outcome: StreamResult<PollResponse>) -> Step {
        match outcome {
            Ok(PollResponse::Event(body)) => {
                self.set_state(StreamState::Streaming);
                match Notification::decode(&body) {
                    Ok(notification) => self.forward(notification),
                    Err(error) => {
                        warn!(address = %self.address, %error, retry_in = ?self.config.retry_delay, "Dropping undecodable event");
                        Step::Backoff
                    }
                }
            }
            Ok(PollResponse::Closed) => {
                debug!(address = %self.address, "Notification channel closed by device");
                Step::Exit
            }
            Ok(PollResponse::Failed { status }) => {
                warn!(address = %self.address, status, retry_in = ?self.config.retry_delay, "Notification poll failed");
                Step::Backoff
            }
            Err(error) => {
                warn!(address = %self.address, %error, retry_in = ?self.config.retry_delay, "Notification poll failed");
                Step::Backoff
            }
        }
    }

    fn forward(&self, notification: Notification) -> Step {
        if notification.is_unknown() {
            debug!(address = %self.address, kind = notification.kind(), "Ignoring unknown event type");
            return Step::Repoll;
        }
        if self.token.is_cancelled() {
            return Step::Exit;
        }

        let event = StreamEvent {
            address: self.address.clone(),
            generation: self.generation,
            notification,
        };
        if self.events.send(event).is_err() {
            debug!(address = %self.address, "Event receiver dropped");
            return Step::Exit;
        }
        self.stats.events.fetch_add(1, Ordering::Relaxed);
        Step::Repoll
    }

    fn set_state(&self, state: StreamState) {
        self.state.send_replace(state);
    }
}
