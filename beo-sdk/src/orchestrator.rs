//! Orchestrator - the public command surface
//!
//! Owns device selection, the selected device's notification stream and its
//! playback store. Commands are applied optimistically, sent to the device,
//! then confirmed or rolled back according to the command's failure policy.
//!
//! ```text
//! select_device(d2)
//!   ├─ cancel d1 token, stop every stream, fresh default store (generation+1)
//!   ├─ probe d2 ── offline ─▶ stay on defaults
//!   └─ online ─▶ snapshot + sources ─▶ start stream(d2, generation)
//!                                          │
//!                 StreamEvent ─▶ SessionSink (generation/address/token gate) ─▶ store
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use beo_api::{BeoClient, Command, DeviceControl};
use beo_discovery::{DiscoveredDevice, DiscoveryError};
use beo_state::{
    select_track, Advance, Device, DeviceId, Direction, FieldValue, PlayMode, PlayState,
    PlaybackState, PlaybackStore, Playlist, PlaylistId, Source, SourceId, Track, TrackId,
    DEFAULT_VOLUME, MAX_VOLUME,
};
use beo_stream::{
    HttpNotificationTransport, NotificationTransport, StreamEvent, StreamManager, StreamState,
};
use parking_lot::RwLock;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info, warn};

use crate::catalogue::{Catalogue, StaticCatalogue};
use crate::config::SdkConfig;
use crate::error::{Result, SdkError};
use crate::notice::{Notice, Severity};
use crate::playlists::PlaylistLibrary;
use crate::registry::{DeviceRegistry, MemoryRegistry};
use crate::session::{forward_events, Session};

/// What happens to optimistic values when the device rejects a command
#[derive(Debug, Clone, Copy)]
enum OnFailure {
    /// Restore prior values and report an error
    Rollback,
    /// Keep the guess until the device reports otherwise
    Keep(Severity),
}

/// Snapshot of the selection a command was issued against
struct CommandTarget {
    generation: u64,
    address: String,
    device_name: String,
    store: Arc<PlaybackStore>,
}

/// Coordinates devices, streams, playback state and the local queue
///
/// # Example
///
/// ```rust,no_run
/// use beo_sdk::{Orchestrator, SdkError};
///
/// # async fn demo() -> Result<(), SdkError> {
/// let orchestrator = Orchestrator::new();
/// let device = orchestrator.add_device("Living Room", "192.168.1.40").await?;
///
/// orchestrator.set_volume(35).await?;
/// orchestrator.toggle_play().await?;
///
/// if let Some(state) = orchestrator.playback() {
///     println!("{} is {} at volume {}", device.display_name, state.play_state, state.volume);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Orchestrator {
    config: SdkConfig,
    control: Arc<dyn DeviceControl>,
    streams: StreamManager,
    registry: Arc<dyn DeviceRegistry>,
    catalogue: Arc<dyn Catalogue>,
    tracks: RwLock<Vec<Track>>,
    playlists: RwLock<PlaylistLibrary>,
    session: RwLock<Option<Session>>,
    generation: AtomicU64,
    selection: watch::Sender<Option<Device>>,
    notices: broadcast::Sender<Notice>,
}

impl Orchestrator {
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::default()
    }

    /// Orchestrator with default configuration, HTTP control and an empty registry
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    // ========================================================================
    // Devices and selection
    // ========================================================================

    /// Registered devices as last stored; `online` is only set for the selection
    pub fn devices(&self) -> Vec<Device> {
        let selected = self.selected_device();
        self.registry
            .list()
            .into_iter()
            .map(|device| match &selected {
                Some(s) if s.id == device.id => device.with_online(s.online),
                _ => device,
            })
            .collect()
    }

    /// Registered devices with freshly probed online status
    ///
    /// Probes run concurrently. A status change of the selected device is
    /// applied to its session.
    pub async fn list_devices(&self) -> Vec<Device> {
        let mut devices = self.registry.list();
        let results =
            futures::future::join_all(devices.iter().map(|d| self.control.probe(&d.address)))
                .await;
        for (device, online) in devices.iter_mut().zip(results) {
            device.online = online;
        }

        let selected = self.current(|s| (s.generation, s.device.id.clone()));
        if let Some((generation, id)) = selected {
            if let Some(device) = devices.iter().find(|d| d.id == id) {
                self.apply_health(generation, device.online).await;
            }
        }
        devices
    }

    /// Ask the discovery service for candidate devices; failures yield an empty list
    pub async fn discover(&self) -> Vec<DiscoveredDevice> {
        self.try_discover().await.unwrap_or_else(|e| {
            warn!(error = %e, "Discovery failed");
            Vec::new()
        })
    }

    pub async fn try_discover(&self) -> Result<Vec<DiscoveredDevice>> {
        let url = self.config.discovery.service_url.clone();
        let timeout = self.config.discovery.timeout;

        let found =
            tokio::task::spawn_blocking(move || beo_discovery::try_get_from(&url, timeout))
                .await
                .map_err(|e| {
                    SdkError::Discovery(DiscoveryError::NetworkError(e.to_string()))
                })??;
        debug!(count = found.len(), "Discovery finished");
        Ok(found)
    }

    /// Register a device and select it
    pub async fn add_device(&self, display_name: &str, address: &str) -> Result<Device> {
        let device = self.registry.add(display_name, address);
        info!(device = %device.id, address = %device.address, "Device added");
        self.select_device(&device.id).await?;
        Ok(device)
    }

    pub async fn add_discovered(&self, found: &DiscoveredDevice) -> Result<Device> {
        self.add_device(&found.name, &found.address).await
    }

    /// Remove a device; removing the selection selects the first remaining device
    pub async fn delete_device(&self, id: &DeviceId) -> Result<bool> {
        if !self.registry.delete(id) {
            return Ok(false);
        }
        info!(device = %id, "Device removed");

        if self.selected_id().as_ref() == Some(id) {
            self.deselect();
            if let Some(next) = self.registry.list().into_iter().next() {
                self.select_device(&next.id).await?;
            }
        }
        Ok(true)
    }

    /// Make `id` the selected device
    ///
    /// Selecting the current device does nothing. Otherwise the previous
    /// device's stream is cancelled before anything else happens and the
    /// new device starts from default playback state.
    pub async fn select_device(&self, id: &DeviceId) -> Result<()> {
        if self.selected_id().as_ref() == Some(id) {
            debug!(device = %id, "Device already selected");
            return Ok(());
        }
        let device = self
            .registry
            .get(id)
            .ok_or_else(|| SdkError::DeviceNotFound(id.clone()))?;

        let generation = self.begin_session(device);
        self.connect(generation).await;
        Ok(())
    }

    /// Select `preferred` if it is registered, otherwise the first device
    pub async fn select_initial(&self, preferred: Option<&DeviceId>) -> Result<Option<Device>> {
        let devices = self.registry.list();
        let choice = preferred
            .and_then(|id| devices.iter().find(|d| &d.id == id))
            .or_else(|| devices.first())
            .map(|d| d.id.clone());

        match choice {
            Some(id) => {
                self.select_device(&id).await?;
                Ok(self.selected_device())
            }
            None => Ok(None),
        }
    }

    /// Drop the selection, stopping its stream
    pub fn deselect(&self) {
        drop(self.take_session());
        self.streams.stop_all();
    }

    /// Re-probe the selected device and apply any online/offline transition
    pub async fn refresh_health(&self) -> Result<bool> {
        let (generation, address) = self
            .current(|s| (s.generation, s.device.address.clone()))
            .ok_or(SdkError::NoDeviceSelected)?;

        let online = self.control.probe(&address).await;
        self.apply_health(generation, online).await;
        Ok(online)
    }

    /// Apply an event delivered outside the built-in stream
    ///
    /// Returns false when the event belongs to a previous selection.
    pub fn handle_stream_event(&self, event: StreamEvent) -> bool {
        match self.current(|s| s.sink()) {
            Some(sink) => sink.accept(event),
            None => {
                debug!(address = %event.address, "Dropping event with no device selected");
                false
            }
        }
    }

    /// Deselect and wait for the stream and event forwarding tasks to finish
    pub async fn shutdown(&self) {
        let forwarder = self
            .take_session()
            .and_then(|mut session| session.forwarder.take());
        self.streams.shutdown_all().await;

        if let Some(handle) = forwarder {
            if let Err(error) = handle.await {
                warn!(%error, "Event forwarding did not finish cleanly");
            }
        }
        info!("Orchestrator shut down");
    }

    // ========================================================================
    // Observation
    // ========================================================================

    pub fn selected_device(&self) -> Option<Device> {
        self.current(|s| s.device.clone())
    }

    /// Follow selection changes, including online transitions
    pub fn watch_selection(&self) -> watch::Receiver<Option<Device>> {
        self.selection.subscribe()
    }

    pub fn playback(&self) -> Option<PlaybackState> {
        self.current(|s| s.store.snapshot())
    }

    /// Follow the selected device's playback state
    ///
    /// The receiver belongs to the current selection; after selecting another
    /// device call this again.
    pub fn watch_playback(&self) -> Option<watch::Receiver<PlaybackState>> {
        self.current(|s| s.store.watch())
    }

    pub fn sources(&self) -> Vec<Source> {
        self.current(|s| s.sources.clone()).unwrap_or_default()
    }

    pub fn queue(&self) -> Vec<Track> {
        self.current(|s| s.queue.tracks().to_vec())
            .unwrap_or_default()
    }

    pub fn loaded_playlist(&self) -> Option<PlaylistId> {
        self.current(|s| s.queue.playlist_id().cloned()).flatten()
    }

    pub fn playlists(&self) -> Vec<Playlist> {
        self.playlists.read().list().to_vec()
    }

    pub fn tracks(&self) -> Vec<Track> {
        self.tracks.read().clone()
    }

    pub fn stream_state(&self) -> Option<StreamState> {
        let address = self.current(|s| s.device.address.clone())?;
        self.streams.state(&address)
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    // ========================================================================
    // Device commands
    // ========================================================================

    /// Play or pause; the display reverts if the device rejects it
    pub async fn set_playing(&self, playing: bool) -> Result<()> {
        let target = self.command_target()?;
        let state = if playing {
            PlayState::Playing
        } else {
            PlayState::Paused
        };
        self.dispatch(
            &target,
            Command::set_playing(playing),
            vec![FieldValue::PlayState(state)],
            OnFailure::Rollback,
        )
        .await
    }

    pub async fn toggle_play(&self) -> Result<()> {
        let target = self.command_target()?;
        let playing = target.store.snapshot().play_state.is_playing();
        self.set_playing(!playing).await
    }

    /// Seek within the current track
    ///
    /// Does nothing while no track is loaded. Positions past the end are
    /// clamped to the track's duration.
    pub async fn seek(&self, seconds: u32) -> Result<()> {
        let target = self.command_target()?;
        let Some(track) = target.store.snapshot().current_track else {
            debug!("Seek ignored with no current track");
            return Ok(());
        };
        let seconds = seconds.min(track.duration_secs);

        self.dispatch(
            &target,
            Command::Seek { seconds },
            vec![FieldValue::Progress(seconds)],
            OnFailure::Keep(Severity::Warning),
        )
        .await
    }

    /// Set the volume, clamped to 0..=100
    pub async fn set_volume(&self, level: u8) -> Result<()> {
        let target = self.command_target()?;
        self.send_volume(&target, level.min(MAX_VOLUME)).await
    }

    /// Mute, or restore the level that was active before muting
    pub async fn toggle_mute(&self) -> Result<()> {
        let target = self.command_target()?;
        let current = target.store.snapshot().volume;

        let level = {
            let mut guard = self.session.write();
            let session = guard
                .as_mut()
                .filter(|s| s.generation == target.generation)
                .ok_or(SdkError::NoDeviceSelected)?;
            if current > 0 {
                session.unmuted_volume = Some(current);
                0
            } else {
                session.unmuted_volume.take().unwrap_or(DEFAULT_VOLUME)
            }
        };
        self.send_volume(&target, level).await
    }

    /// Skip forward
    ///
    /// On the local source with a loaded queue the next track is picked
    /// locally under the current play mode. Repeat-one replays the current
    /// track from the start and the end of a sequential queue pauses.
    pub async fn next_track(&self) -> Result<()> {
        self.skip(Direction::Forward).await
    }

    pub async fn previous_track(&self) -> Result<()> {
        self.skip(Direction::Backward).await
    }

    /// Switch the device to another source
    ///
    /// Progress resets to 0. Switching to the local queue clears the track;
    /// any other source shows a "playing from" placeholder until the device
    /// reports what it plays.
    pub async fn change_source(&self, source_id: impl Into<SourceId>) -> Result<()> {
        let source_id = source_id.into();
        let target = self.command_target()?;

        let track = if source_id.is_local() {
            None
        } else {
            let display_name = self
                .sources()
                .into_iter()
                .find(|s| s.id == source_id)
                .map(|s| s.display_name)
                .unwrap_or_default();
            Some(Track::source_placeholder(&source_id, &display_name))
        };

        self.dispatch(
            &target,
            Command::ChangeSource {
                id: source_id.to_string(),
            },
            vec![
                FieldValue::Source(source_id),
                FieldValue::Track(track),
                FieldValue::Progress(0),
            ],
            OnFailure::Keep(Severity::Error),
        )
        .await
    }

    pub async fn set_play_mode(&self, mode: PlayMode) -> Result<()> {
        let target = self.command_target()?;
        self.dispatch(
            &target,
            Command::SetPlayMode { mode },
            vec![FieldValue::PlayMode(mode)],
            OnFailure::Keep(Severity::Error),
        )
        .await
    }

    /// Step to the next play mode: sequential, repeat list, repeat one, shuffle
    pub async fn cycle_play_mode(&self) -> Result<()> {
        let target = self.command_target()?;
        let mode = target.store.snapshot().play_mode.next();
        self.set_play_mode(mode).await
    }

    // ========================================================================
    // Queue and playlists
    // ========================================================================

    /// Load a playlist into the queue and make its first track current
    pub fn select_playlist(&self, id: &PlaylistId) -> Result<()> {
        let playlist = self
            .playlists
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| SdkError::PlaylistNotFound(id.clone()))?;
        let tracks = self.tracks.read().clone();

        let mut guard = self.session.write();
        let session = guard.as_mut().ok_or(SdkError::NoDeviceSelected)?;
        let first = session.queue.load(&playlist, &tracks).first().cloned();
        debug!(playlist = %id, tracks = session.queue.tracks().len(), "Queue loaded");

        apply_local(
            &session.store,
            vec![FieldValue::Track(first), FieldValue::Progress(0)],
        );
        Ok(())
    }

    /// Play a queued track directly
    pub fn select_track(&self, id: &TrackId) -> Result<()> {
        let guard = self.session.read();
        let session = guard.as_ref().ok_or(SdkError::NoDeviceSelected)?;
        if !session.store.snapshot().is_local_source() {
            return Err(SdkError::SourceNotLocal);
        }
        let track = session
            .queue
            .find(id)
            .cloned()
            .ok_or_else(|| SdkError::TrackNotInQueue(id.clone()))?;

        apply_local(&session.store, select_track(track));
        Ok(())
    }

    /// Insert or replace a playlist; a loaded playlist is re-resolved
    pub fn save_playlist(&self, playlist: Playlist) -> bool {
        let replaced = self.playlists.write().upsert(playlist.clone());
        let tracks = self.tracks.read().clone();

        if let Some(session) = self.session.write().as_mut() {
            if session.queue.playlist_id() == Some(&playlist.id) {
                session.queue.load(&playlist, &tracks);
                debug!(playlist = %playlist.id, "Loaded playlist re-resolved");
            }
        }
        replaced
    }

    /// Remove a playlist; removing the loaded one clears the queue
    pub fn delete_playlist(&self, id: &PlaylistId) -> bool {
        if self.playlists.write().remove(id).is_none() {
            return false;
        }

        if let Some(session) = self.session.write().as_mut() {
            if session.queue.playlist_id() == Some(id) {
                session.queue.clear();
                if session.store.snapshot().is_local_source() {
                    apply_local(&session.store, vec![FieldValue::Track(None)]);
                }
            }
        }
        true
    }

    /// Reload the track library and re-resolve the loaded playlist
    pub fn refresh_catalogue(&self) {
        let tracks = self.catalogue.list_tracks();
        debug!(count = tracks.len(), "Catalogue refreshed");
        *self.tracks.write() = tracks.clone();

        let playlists = self.playlists();
        if let Some(session) = self.session.write().as_mut() {
            let loaded = session
                .queue
                .playlist_id()
                .and_then(|id| playlists.iter().find(|p| &p.id == id));
            if let Some(playlist) = loaded {
                session.queue.load(playlist, &tracks);
            }
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn current<T>(&self, f: impl FnOnce(&Session) -> T) -> Option<T> {
        self.session.read().as_ref().map(f)
    }

    fn selected_id(&self) -> Option<DeviceId> {
        self.current(|s| s.device.id.clone())
    }

    fn address_for(&self, generation: u64) -> Option<String> {
        self.session
            .read()
            .as_ref()
            .filter(|s| s.generation == generation)
            .map(|s| s.device.address.clone())
    }

    /// Take the selection out; dropping the session cancels its token
    fn take_session(&self) -> Option<Session> {
        let previous = self.session.write().take();
        if let Some(session) = &previous {
            info!(device = %session.device.id, generation = session.generation, "Device deselected");
            self.selection.send_replace(None);
        }
        previous
    }

    fn begin_session(&self, device: Device) -> u64 {
        let mut guard = self.session.write();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(previous) = guard.take() {
            debug!(device = %previous.device.id, generation = previous.generation, "Leaving device");
        }
        self.streams.stop_all();

        info!(device = %device.id, address = %device.address, generation, "Device selected");
        let session = Session::new(generation, device);
        self.selection.send_replace(Some(session.device.clone()));
        *guard = Some(session);
        generation
    }

    async fn connect(&self, generation: u64) {
        let Some(address) = self.address_for(generation) else {
            return;
        };
        let online = self.control.probe(&address).await;
        self.apply_health(generation, online).await;
    }

    async fn apply_health(&self, generation: u64, online: bool) {
        let came_online = {
            let mut guard = self.session.write();
            let Some(session) = guard.as_mut().filter(|s| s.generation == generation) else {
                return;
            };
            if session.device.online == online {
                return;
            }

            session.device.online = online;
            if !online {
                session.go_offline();
                self.streams.stop(&session.device.address);
            }
            self.selection.send_replace(Some(session.device.clone()));
            online
        };

        if came_online {
            info!(generation, "Device online");
            self.bring_online(generation).await;
        } else {
            warn!(generation, "Device offline; showing defaults");
        }
    }

    async fn bring_online(&self, generation: u64) {
        let Some(address) = self.address_for(generation) else {
            return;
        };
        let (snapshot, sources) = futures::join!(
            self.control.fetch_snapshot(&address),
            self.control.fetch_sources(&address)
        );

        let device_name = {
            let mut guard = self.session.write();
            let Some(session) = guard
                .as_mut()
                .filter(|s| s.generation == generation && s.device.online)
            else {
                debug!(%address, generation, "Selection changed while fetching state");
                return;
            };

            if let Ok(snapshot) = &snapshot {
                session.store.apply_snapshot(snapshot);
            }
            match sources {
                Ok(wire) => {
                    let mut merged = vec![Source::local()];
                    merged.extend(
                        wire.into_iter()
                            .map(Source::from)
                            .filter(|s| !s.id.is_local()),
                    );
                    session.sources = merged;
                }
                Err(e) => warn!(%address, error = %e, "Failed to fetch sources"),
            }

            let (tx, rx) = mpsc::unbounded_channel();
            self.streams.start(&address, generation, &session.token, tx);
            session.forwarder = Some(tokio::spawn(forward_events(session.sink(), rx)));
            session.device.display_name.clone()
        };

        if let Err(e) = snapshot {
            warn!(%address, error = %e, "Failed to fetch playback state; showing defaults");
            self.publish(Notice::new(
                Severity::Warning,
                device_name,
                "fetch_state",
                e.to_string(),
            ));
        }
    }

    fn command_target(&self) -> Result<CommandTarget> {
        let guard = self.session.read();
        let session = guard.as_ref().ok_or(SdkError::NoDeviceSelected)?;
        if !session.device.online {
            return Err(SdkError::DeviceOffline(session.device.display_name.clone()));
        }
        Ok(CommandTarget {
            generation: session.generation,
            address: session.device.address.clone(),
            device_name: session.device.display_name.clone(),
            store: Arc::clone(&session.store),
        })
    }

    async fn send_volume(&self, target: &CommandTarget, level: u8) -> Result<()> {
        self.dispatch(
            target,
            Command::SetVolume { level },
            vec![FieldValue::Volume(level)],
            OnFailure::Keep(Severity::Warning),
        )
        .await
    }

    /// Next/previous, keeping the local guess and the device command in step
    ///
    /// | local result             | command            | optimistic writes        |
    /// |--------------------------|--------------------|--------------------------|
    /// | another queue track      | forward / backward | track, progress, playing |
    /// | the current track again  | seek 0             | progress                 |
    /// | end of sequential queue  | pause              | stopped                  |
    /// | shuffle or remote source | forward / backward | none                     |
    ///
    /// Under shuffle the device draws the next track itself and reports it
    /// on the stream.
    async fn skip(&self, direction: Direction) -> Result<()> {
        let target = self.command_target()?;
        let state = target.store.snapshot();

        let advance = if state.is_local_source() && state.play_mode != PlayMode::Shuffle {
            self.current(|s| {
                (s.generation == target.generation && !s.queue.is_empty()).then(|| {
                    s.queue
                        .advance(direction, state.current_track.as_ref(), state.play_mode)
                })
            })
            .flatten()
        } else {
            None
        };

        let step = match direction {
            Direction::Forward => Command::Next,
            Direction::Backward => Command::Previous,
        };
        let is_current = |track: &Track| {
            state
                .current_track
                .as_ref()
                .is_some_and(|current| current.id == track.id)
        };
        let (command, writes) = match advance {
            None => (step, Vec::new()),
            Some(Advance::Stop) => (Command::Pause, Advance::Stop.into_writes()),
            Some(Advance::Track(track)) if is_current(&track) => {
                (Command::Seek { seconds: 0 }, vec![FieldValue::Progress(0)])
            }
            Some(advance) => (step, advance.into_writes()),
        };
        self.dispatch(&target, command, writes, OnFailure::Keep(Severity::Error))
            .await
    }

    async fn dispatch(
        &self,
        target: &CommandTarget,
        command: Command,
        optimistic: Vec<FieldValue>,
        on_failure: OnFailure,
    ) -> Result<()> {
        let ticket = target.store.apply_optimistic(optimistic);

        match self.control.send(&target.address, command.clone()).await {
            Ok(()) => {
                target.store.confirm(&ticket);
                debug!(address = %target.address, %command, "Command accepted");
                Ok(())
            }
            Err(source) => {
                let severity = match on_failure {
                    OnFailure::Rollback => {
                        target.store.rollback(&ticket);
                        Severity::Error
                    }
                    OnFailure::Keep(severity) => {
                        target.store.confirm(&ticket);
                        severity
                    }
                };
                warn!(address = %target.address, %command, error = %source, %severity, "Command failed");
                self.publish(Notice::new(
                    severity,
                    target.device_name.clone(),
                    command.name(),
                    source.to_string(),
                ));
                Err(SdkError::Command {
                    command: command.name(),
                    source,
                })
            }
        }
    }

    fn publish(&self, notice: Notice) {
        // No receivers is fine
        let _ = self.notices.send(notice);
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        self.session.get_mut().take();
        self.streams.stop_all();
    }
}

/// Local-only write: visible immediately, nothing left pending
fn apply_local(store: &PlaybackStore, values: Vec<FieldValue>) {
    let ticket = store.apply_optimistic(values);
    store.confirm(&ticket);
}

// ============================================================================
// OrchestratorBuilder
// ============================================================================

/// Builder for [`Orchestrator`]
///
/// Unset collaborators default to the HTTP client and transport built from
/// the configuration, an empty in-memory registry and an empty catalogue.
#[derive(Default)]
pub struct OrchestratorBuilder {
    config: SdkConfig,
    control: Option<Arc<dyn DeviceControl>>,
    transport: Option<Arc<dyn NotificationTransport>>,
    registry: Option<Arc<dyn DeviceRegistry>>,
    catalogue: Option<Arc<dyn Catalogue>>,
    playlists: Vec<Playlist>,
}

impl OrchestratorBuilder {
    pub fn with_config(mut self, config: SdkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_control(mut self, control: Arc<dyn DeviceControl>) -> Self {
        self.control = Some(control);
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn NotificationTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_registry(mut self, registry: Arc<dyn DeviceRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_catalogue(mut self, catalogue: Arc<dyn Catalogue>) -> Self {
        self.catalogue = Some(catalogue);
        self
    }

    /// Seed the playlist library
    pub fn with_playlists(mut self, playlists: impl IntoIterator<Item = Playlist>) -> Self {
        self.playlists.extend(playlists);
        self
    }

    pub fn build(self) -> Orchestrator {
        let config = self.config;
        let control = self
            .control
            .unwrap_or_else(|| Arc::new(BeoClient::with_config(config.client.clone())));
        let transport = self.transport.unwrap_or_else(|| {
            Arc::new(
                HttpNotificationTransport::new(config.client.clone())
                    .with_poll_timeout(config.stream.poll_timeout),
            )
        });
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(MemoryRegistry::new()));
        let catalogue = self
            .catalogue
            .unwrap_or_else(|| Arc::new(StaticCatalogue::default()));

        let mut library = PlaylistLibrary::new();
        for playlist in self.playlists {
            library.upsert(playlist);
        }

        let (selection, _) = watch::channel(None);
        let (notices, _) = broadcast::channel(config.notice_capacity.max(1));
        let tracks = catalogue.list_tracks();

        Orchestrator {
            streams: StreamManager::new(transport, config.stream.clone()),
            config,
            control,
            registry,
            catalogue,
            tracks: RwLock::new(tracks),
            playlists: RwLock::new(library),
            session: RwLock::new(None),
            generation: AtomicU64::new(0),
            selection,
            notices,
        }
    }
}
