//! Orchestrator scenarios against a fake device and a channel-fed stream

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use beo_api::{ApiError, Command, DeviceControl, PlaybackSnapshot, WireSource};
use beo_sdk::{
    Device, DeviceId, MemoryRegistry, Orchestrator, PlayMode, PlayState, Playlist, PlaylistId,
    SdkConfig, SdkError, Severity, StaticCatalogue, StreamConfig, Track, TrackId,
};
use beo_stream::{Notification, NotificationTransport, PollResponse, StreamEvent, StreamResult};
use parking_lot::Mutex;
use rstest::rstest;
use tokio::sync::mpsc;

const ADDR1: &str = "192.168.1.41";
const ADDR2: &str = "192.168.1.42";

// ============================================================================
// Fake device control
// ============================================================================

#[derive(Default)]
struct FakeControl {
    offline: Mutex<HashSet<String>>,
    failing: Mutex<HashSet<&'static str>>,
    snapshot_fails: Mutex<bool>,
    snapshots: Mutex<HashMap<String, PlaybackSnapshot>>,
    sources: Mutex<HashMap<String, Vec<WireSource>>>,
    sent: Mutex<Vec<(String, Command)>>,
}

impl FakeControl {
    fn set_online(&self, address: &str, online: bool) {
        let mut offline = self.offline.lock();
        if online {
            offline.remove(address);
        } else {
            offline.insert(address.to_string());
        }
    }

    fn fail(&self, command: &'static str) {
        self.failing.lock().insert(command);
    }

    fn last_command(&self) -> Option<Command> {
        self.sent.lock().last().map(|(_, c)| c.clone())
    }
}

#[async_trait]
impl DeviceControl for FakeControl {
    async fn probe(&self, address: &str) -> bool {
        !self.offline.lock().contains(address)
    }

    async fn send(&self, address: &str, command: Command) -> beo_api::Result<()> {
        self.sent.lock().push((address.to_string(), command.clone()));
        if self.failing.lock().contains(command.name()) {
            Err(ApiError::CommandRejected { status: 500 })
        } else {
            Ok(())
        }
    }

    async fn fetch_snapshot(&self, address: &str) -> beo_api::Result<PlaybackSnapshot> {
        if *self.snapshot_fails.lock() {
            return Err(ApiError::Unreachable("connection reset".into()));
        }
        Ok(self.snapshots.lock().get(address).cloned().unwrap_or_default())
    }

    async fn fetch_sources(&self, address: &str) -> beo_api::Result<Vec<WireSource>> {
        Ok(self.sources.lock().get(address).cloned().unwrap_or_default())
    }
}

// ============================================================================
// Channel transport
// ============================================================================

type Inbox = Arc<tokio::sync::Mutex<mpsc::UnboundedReceiver<String>>>;

/// Each poll waits for the next body pushed for its address
#[derive(Default)]
struct ChannelTransport {
    senders: Mutex<HashMap<String, mpsc::UnboundedSender<String>>>,
    inboxes: Mutex<HashMap<String, Inbox>>,
    in_flight: Mutex<HashMap<String, usize>>,
}

impl ChannelTransport {
    fn inbox(&self, address: &str) -> Inbox {
        let mut inboxes = self.inboxes.lock();
        if let Some(inbox) = inboxes.get(address) {
            return Arc::clone(inbox);
        }
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.lock().insert(address.to_string(), tx);
        let inbox = Arc::new(tokio::sync::Mutex::new(rx));
        inboxes.insert(address.to_string(), Arc::clone(&inbox));
        inbox
    }

    fn push(&self, address: &str, body: String) {
        self.inbox(address);
        if let Some(tx) = self.senders.lock().get(address) {
            tx.send(body).unwrap();
        }
    }

    fn in_flight(&self, address: &str) -> usize {
        self.in_flight.lock().get(address).copied().unwrap_or(0)
    }
}

struct InFlight<'a> {
    transport: &'a ChannelTransport,
    address: String,
}

impl<'a> InFlight<'a> {
    fn enter(transport: &'a ChannelTransport, address: &str) -> Self {
        *transport.in_flight.lock().entry(address.to_string()).or_default() += 1;
        Self {
            transport,
            address: address.to_string(),
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(count) = self.transport.in_flight.lock().get_mut(&self.address) {
            *count = count.saturating_sub(1);
        }
    }
}

#[async_trait]
impl NotificationTransport for ChannelTransport {
    async fn poll(&self, address: &str) -> StreamResult<PollResponse> {
        let inbox = self.inbox(address);
        let _guard = InFlight::enter(self, address);
        let mut rx = inbox.lock().await;
        match rx.recv().await {
            Some(body) => Ok(PollResponse::Event(body)),
            None => std::future::pending().await,
        }
    }
}

fn volume_body(level: u8) -> String {
    format!(r#"{{"type":"VOLUME","data":{{"speaker":{{"level":{level}}}}}}}"#)
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    orchestrator: Orchestrator,
    control: Arc<FakeControl>,
    transport: Arc<ChannelTransport>,
    catalogue: Arc<StaticCatalogue>,
}

fn library() -> Vec<Track> {
    vec![
        Track::new("t1", "Opening", "Band", 180),
        Track::new("t2", "Middle", "Band", 200),
        Track::new("t3", "Closing", "Band", 240),
    ]
}

fn harness_with(registry: MemoryRegistry) -> Harness {
    let control = Arc::new(FakeControl::default());
    let transport = Arc::new(ChannelTransport::default());
    let catalogue = Arc::new(StaticCatalogue::new(library()));

    let config = SdkConfig {
        stream: StreamConfig::fast_retry(),
        ..SdkConfig::default()
    };
    let orchestrator = Orchestrator::builder()
        .with_config(config)
        .with_control(control.clone())
        .with_transport(transport.clone())
        .with_registry(Arc::new(registry))
        .with_catalogue(catalogue.clone())
        .with_playlists([Playlist::new("p1", "Evening", ["t1", "t2", "t3"])])
        .build();

    Harness {
        orchestrator,
        control,
        transport,
        catalogue,
    }
}

fn harness() -> Harness {
    harness_with(MemoryRegistry::new())
}

async fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

fn current_track_id(h: &Harness) -> Option<String> {
    h.orchestrator
        .playback()
        .and_then(|s| s.current_track)
        .map(|t| t.id.to_string())
}

// ============================================================================
// Selection and streams
// ============================================================================

#[tokio::test]
async fn test_selecting_online_device_applies_snapshot_and_sources() {
    let h = harness();
    h.control.snapshots.lock().insert(
        ADDR1.to_string(),
        PlaybackSnapshot {
            state: Some("playing".into()),
            volume: Some(30),
            ..Default::default()
        },
    );
    h.control.sources.lock().insert(
        ADDR1.to_string(),
        vec![WireSource {
            id: "spotify:1".into(),
            friendly_name: Some("Spotify".into()),
            kind: Some("SPOTIFY".into()),
        }],
    );

    let device = h.orchestrator.add_device("Den", ADDR1).await.unwrap();

    let selected = h.orchestrator.selected_device().unwrap();
    assert_eq!(selected.id, device.id);
    assert!(selected.online);

    let state = h.orchestrator.playback().unwrap();
    assert_eq!(state.play_state, PlayState::Playing);
    assert_eq!(state.volume, 30);

    let sources = h.orchestrator.sources();
    assert_eq!(sources.len(), 2);
    assert!(sources[0].id.is_local());
    assert_eq!(sources[1].display_name, "Spotify");

    assert!(wait_for(|| h.transport.in_flight(ADDR1) == 1).await);
}

#[tokio::test]
async fn test_switching_devices_leaves_one_stream() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    assert!(wait_for(|| h.transport.in_flight(ADDR1) == 1).await);

    h.orchestrator.add_device("Kitchen", ADDR2).await.unwrap();

    assert!(
        wait_for(|| h.transport.in_flight(ADDR1) == 0 && h.transport.in_flight(ADDR2) == 1).await
    );
    assert_eq!(h.orchestrator.selected_device().unwrap().address, ADDR2);
}

#[tokio::test]
async fn test_events_from_previous_device_are_dropped() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    h.orchestrator.add_device("Kitchen", ADDR2).await.unwrap();
    assert!(wait_for(|| h.transport.in_flight(ADDR2) == 1).await);

    let late = StreamEvent {
        address: ADDR1.to_string(),
        generation: 1,
        notification: Notification::Volume { level: 5 },
    };
    assert!(!h.orchestrator.handle_stream_event(late));
    h.transport.push(ADDR1, volume_body(7));

    h.transport.push(ADDR2, volume_body(12));
    assert!(wait_for(|| h.orchestrator.playback().unwrap().volume == 12).await);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(h.orchestrator.playback().unwrap().volume, 12);
}

#[tokio::test]
async fn test_shutdown_waits_for_stream_to_finish() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    assert!(wait_for(|| h.transport.in_flight(ADDR1) == 1).await);
    let mut selection = h.orchestrator.watch_selection();

    h.orchestrator.shutdown().await;

    assert_eq!(h.transport.in_flight(ADDR1), 0);
    assert!(h.orchestrator.selected_device().is_none());
    assert!(selection.borrow_and_update().is_none());
    assert!(h.orchestrator.stream_state().is_none());
}

#[tokio::test]
async fn test_stream_event_updates_playback() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    let mut playback = h.orchestrator.watch_playback().unwrap();

    h.transport.push(
        ADDR1,
        r#"{"type":"PROGRESS_INFORMATION","data":{"state":"playing","progress":42,"track":{"id":"r1","title":"Remote","duration":300}}}"#
            .to_string(),
    );

    assert!(wait_for(|| h.orchestrator.playback().unwrap().progress_secs == 42).await);
    assert!(playback.has_changed().unwrap());
    let state = playback.borrow_and_update().clone();
    assert_eq!(state.play_state, PlayState::Playing);
    assert_eq!(state.current_track.unwrap().title, "Remote");
}

#[tokio::test]
async fn test_offline_device_shows_defaults_and_rejects_commands() {
    let h = harness();
    h.control.set_online(ADDR1, false);
    h.control.snapshots.lock().insert(
        ADDR1.to_string(),
        PlaybackSnapshot {
            volume: Some(30),
            ..Default::default()
        },
    );

    h.orchestrator.add_device("Den", ADDR1).await.unwrap();

    assert!(!h.orchestrator.selected_device().unwrap().online);
    assert_eq!(h.orchestrator.playback().unwrap().volume, 50);
    assert!(h.orchestrator.stream_state().is_none());

    let err = h.orchestrator.set_volume(20).await.unwrap_err();
    assert!(matches!(err, SdkError::DeviceOffline(name) if name == "Den"));
    assert!(h.control.sent.lock().is_empty());
}

#[tokio::test]
async fn test_health_transitions_reset_and_restore() {
    let h = harness();
    h.control.snapshots.lock().insert(
        ADDR1.to_string(),
        PlaybackSnapshot {
            volume: Some(30),
            ..Default::default()
        },
    );
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    assert!(wait_for(|| h.transport.in_flight(ADDR1) == 1).await);

    h.control.set_online(ADDR1, false);
    assert!(!h.orchestrator.refresh_health().await.unwrap());
    assert_eq!(h.orchestrator.playback().unwrap().volume, 50);
    assert!(h.orchestrator.stream_state().is_none());
    assert!(wait_for(|| h.transport.in_flight(ADDR1) == 0).await);

    h.control.set_online(ADDR1, true);
    assert!(h.orchestrator.refresh_health().await.unwrap());
    assert_eq!(h.orchestrator.playback().unwrap().volume, 30);
    assert!(wait_for(|| h.transport.in_flight(ADDR1) == 1).await);
}

#[tokio::test]
async fn test_list_devices_probes_each_device() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    h.orchestrator.add_device("Kitchen", ADDR2).await.unwrap();
    h.control.set_online(ADDR1, false);

    let devices = h.orchestrator.list_devices().await;
    assert_eq!(devices.len(), 2);
    assert!(!devices[0].online);
    assert!(devices[1].online);
}

#[tokio::test]
async fn test_snapshot_failure_keeps_defaults_with_warning() {
    let h = harness();
    *h.control.snapshot_fails.lock() = true;
    let mut notices = h.orchestrator.subscribe_notices();

    h.orchestrator.add_device("Den", ADDR1).await.unwrap();

    assert_eq!(h.orchestrator.playback().unwrap(), Default::default());
    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.severity, Severity::Warning);
    assert_eq!(notice.operation, "fetch_state");
}

// ============================================================================
// Registry
// ============================================================================

#[tokio::test]
async fn test_deleting_selected_device_selects_first_remaining() {
    let h = harness();
    let den = h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    let kitchen = h.orchestrator.add_device("Kitchen", ADDR2).await.unwrap();
    assert_eq!(h.orchestrator.selected_device().unwrap().id, kitchen.id);

    assert!(h.orchestrator.delete_device(&kitchen.id).await.unwrap());
    assert_eq!(h.orchestrator.selected_device().unwrap().id, den.id);

    assert!(h.orchestrator.delete_device(&den.id).await.unwrap());
    assert!(h.orchestrator.selected_device().is_none());
    assert!(!h.orchestrator.delete_device(&den.id).await.unwrap());
}

#[tokio::test]
async fn test_select_initial_prefers_saved_device() {
    let registry = || {
        MemoryRegistry::with_devices([
            Device::new("a", "Den", ADDR1),
            Device::new("b", "Kitchen", ADDR2),
        ])
    };

    let h = harness_with(registry());
    let chosen = h
        .orchestrator
        .select_initial(Some(&DeviceId::new("b")))
        .await
        .unwrap();
    assert_eq!(chosen.unwrap().id.as_str(), "b");

    let h = harness_with(registry());
    let chosen = h
        .orchestrator
        .select_initial(Some(&DeviceId::new("gone")))
        .await
        .unwrap();
    assert_eq!(chosen.unwrap().id.as_str(), "a");

    let h = harness();
    assert!(h.orchestrator.select_initial(None).await.unwrap().is_none());
}

#[tokio::test]
async fn test_select_unknown_device() {
    let h = harness();
    let err = h
        .orchestrator
        .select_device(&DeviceId::new("missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::DeviceNotFound(_)));
}

// ============================================================================
// Command failure policy
// ============================================================================

#[tokio::test]
async fn test_commands_need_a_selected_device() {
    let h = harness();
    assert!(matches!(
        h.orchestrator.set_volume(20).await,
        Err(SdkError::NoDeviceSelected)
    ));
    assert!(matches!(
        h.orchestrator.select_playlist(&PlaylistId::new("p1")),
        Err(SdkError::NoDeviceSelected)
    ));
}

#[tokio::test]
async fn test_failed_play_rolls_back_with_error_notice() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    h.control.fail("play");
    let mut notices = h.orchestrator.subscribe_notices();

    let err = h.orchestrator.set_playing(true).await.unwrap_err();

    assert!(matches!(err, SdkError::Command { command: "play", .. }));
    assert_eq!(h.orchestrator.playback().unwrap().play_state, PlayState::Stopped);
    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.severity, Severity::Error);
    assert_eq!(notice.operation, "play");
    assert_eq!(notice.device, "Den");
}

#[tokio::test]
async fn test_failed_volume_keeps_value_with_warning() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    h.control.fail("set_volume");
    let mut notices = h.orchestrator.subscribe_notices();

    assert!(h.orchestrator.set_volume(20).await.is_err());

    assert_eq!(h.orchestrator.playback().unwrap().volume, 20);
    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.severity, Severity::Warning);
    assert_eq!(notice.operation, "set_volume");
}

#[tokio::test]
async fn test_toggle_play_and_volume_clamp() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();

    h.orchestrator.toggle_play().await.unwrap();
    assert_eq!(h.control.last_command(), Some(Command::Play));
    assert_eq!(h.orchestrator.playback().unwrap().play_state, PlayState::Playing);

    h.orchestrator.toggle_play().await.unwrap();
    assert_eq!(h.control.last_command(), Some(Command::Pause));

    h.orchestrator.set_volume(150).await.unwrap();
    assert_eq!(h.control.last_command(), Some(Command::SetVolume { level: 100 }));
}

#[tokio::test]
async fn test_toggle_mute_restores_level() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    h.orchestrator.set_volume(35).await.unwrap();

    h.orchestrator.toggle_mute().await.unwrap();
    assert_eq!(h.orchestrator.playback().unwrap().volume, 0);

    h.orchestrator.toggle_mute().await.unwrap();
    assert_eq!(h.orchestrator.playback().unwrap().volume, 35);
}

#[tokio::test]
async fn test_cycle_play_mode() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();

    h.orchestrator.cycle_play_mode().await.unwrap();

    assert_eq!(h.orchestrator.playback().unwrap().play_mode, PlayMode::RepeatList);
    assert_eq!(
        h.control.last_command(),
        Some(Command::SetPlayMode {
            mode: PlayMode::RepeatList
        })
    );
}

#[tokio::test]
async fn test_seek_without_track_does_nothing() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();

    h.orchestrator.seek(30).await.unwrap();
    assert!(h.control.sent.lock().is_empty());
}

// ============================================================================
// Queue and playlists
// ============================================================================

#[tokio::test]
async fn test_next_follows_local_queue_and_stops_at_end() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    h.orchestrator.select_playlist(&PlaylistId::new("p1")).unwrap();
    assert_eq!(current_track_id(&h).as_deref(), Some("t1"));

    h.orchestrator.next_track().await.unwrap();
    assert_eq!(current_track_id(&h).as_deref(), Some("t2"));
    assert_eq!(h.orchestrator.playback().unwrap().play_state, PlayState::Playing);
    assert_eq!(h.control.last_command(), Some(Command::Next));

    h.orchestrator.select_track(&TrackId::new("t3")).unwrap();
    h.orchestrator.next_track().await.unwrap();
    assert_eq!(current_track_id(&h).as_deref(), Some("t3"));
    assert_eq!(h.orchestrator.playback().unwrap().play_state, PlayState::Stopped);
    assert_eq!(h.control.last_command(), Some(Command::Pause));
}

#[rstest]
#[case::sequential(PlayMode::Sequential, Command::Next, Some("t2"), 0, PlayState::Playing)]
#[case::repeat_list(PlayMode::RepeatList, Command::Next, Some("t2"), 0, PlayState::Playing)]
#[case::repeat_one(PlayMode::RepeatOne, Command::Seek { seconds: 0 }, Some("t1"), 0, PlayState::Stopped)]
#[case::shuffle(PlayMode::Shuffle, Command::Next, Some("t1"), 30, PlayState::Stopped)]
#[tokio::test]
async fn test_next_command_matches_local_result(
    #[case] mode: PlayMode,
    #[case] expected_command: Command,
    #[case] expected_track: Option<&str>,
    #[case] expected_progress: u32,
    #[case] expected_state: PlayState,
) {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    h.orchestrator.select_playlist(&PlaylistId::new("p1")).unwrap();
    h.orchestrator.set_play_mode(mode).await.unwrap();
    h.orchestrator.seek(30).await.unwrap();

    h.orchestrator.next_track().await.unwrap();

    assert_eq!(h.control.last_command(), Some(expected_command));
    let state = h.orchestrator.playback().unwrap();
    assert_eq!(current_track_id(&h).as_deref(), expected_track);
    assert_eq!(state.progress_secs, expected_progress);
    assert_eq!(state.play_state, expected_state);
}

#[tokio::test]
async fn test_shuffle_next_takes_track_from_device() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    h.orchestrator.select_playlist(&PlaylistId::new("p1")).unwrap();
    h.orchestrator.set_play_mode(PlayMode::Shuffle).await.unwrap();

    h.orchestrator.next_track().await.unwrap();
    assert_eq!(current_track_id(&h).as_deref(), Some("t1"));

    h.transport.push(
        ADDR1,
        r#"{"type":"PROGRESS_INFORMATION","data":{"state":"playing","progress":0,"track":{"id":"t3","title":"Closing","duration":240}}}"#
            .to_string(),
    );
    assert!(wait_for(|| current_track_id(&h).as_deref() == Some("t3")).await);
    assert_eq!(h.orchestrator.playback().unwrap().play_mode, PlayMode::Shuffle);
}

#[tokio::test]
async fn test_previous_wraps_to_last() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    h.orchestrator.select_playlist(&PlaylistId::new("p1")).unwrap();

    h.orchestrator.previous_track().await.unwrap();

    assert_eq!(current_track_id(&h).as_deref(), Some("t3"));
    assert_eq!(h.control.last_command(), Some(Command::Previous));
}

#[tokio::test]
async fn test_non_local_source_bypasses_queue() {
    let h = harness();
    h.control.sources.lock().insert(
        ADDR1.to_string(),
        vec![WireSource {
            id: "spotify:1".into(),
            friendly_name: Some("Spotify".into()),
            kind: None,
        }],
    );
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    h.orchestrator.select_playlist(&PlaylistId::new("p1")).unwrap();

    h.orchestrator.change_source("spotify:1").await.unwrap();
    let state = h.orchestrator.playback().unwrap();
    let track = state.current_track.unwrap();
    assert!(track.is_placeholder());
    assert_eq!(track.title, "Playing from Spotify");
    assert_eq!(state.progress_secs, 0);

    assert!(matches!(
        h.orchestrator.select_track(&TrackId::new("t2")),
        Err(SdkError::SourceNotLocal)
    ));

    h.orchestrator.next_track().await.unwrap();
    assert_eq!(h.control.last_command(), Some(Command::Next));
    assert!(h.orchestrator.playback().unwrap().current_track.unwrap().is_placeholder());
}

#[tokio::test]
async fn test_select_track_outside_queue() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    h.orchestrator.select_playlist(&PlaylistId::new("p1")).unwrap();

    assert!(matches!(
        h.orchestrator.select_track(&TrackId::new("t9")),
        Err(SdkError::TrackNotInQueue(_))
    ));
    assert!(matches!(
        h.orchestrator.select_playlist(&PlaylistId::new("p9")),
        Err(SdkError::PlaylistNotFound(_))
    ));
}

#[tokio::test]
async fn test_saving_loaded_playlist_reresolves_queue() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    h.orchestrator.select_playlist(&PlaylistId::new("p1")).unwrap();

    assert!(h
        .orchestrator
        .save_playlist(Playlist::new("p1", "Evening", ["t3", "missing"])));

    let queue = h.orchestrator.queue();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].id.as_str(), "t3");
}

#[tokio::test]
async fn test_deleting_loaded_playlist_clears_queue() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    h.orchestrator.select_playlist(&PlaylistId::new("p1")).unwrap();

    assert!(h.orchestrator.delete_playlist(&PlaylistId::new("p1")));

    assert!(h.orchestrator.queue().is_empty());
    assert!(h.orchestrator.loaded_playlist().is_none());
    assert!(current_track_id(&h).is_none());
    assert!(!h.orchestrator.delete_playlist(&PlaylistId::new("p1")));
}

#[tokio::test]
async fn test_refresh_catalogue_reresolves_queue() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    h.orchestrator.select_playlist(&PlaylistId::new("p1")).unwrap();

    h.catalogue.replace(vec![Track::new("t2", "Middle", "Band", 200)]);
    h.orchestrator.refresh_catalogue();

    let queue = h.orchestrator.queue();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].id.as_str(), "t2");
    assert_eq!(h.orchestrator.tracks().len(), 1);
}

#[tokio::test]
async fn test_queue_is_per_selection() {
    let h = harness();
    h.orchestrator.add_device("Den", ADDR1).await.unwrap();
    h.orchestrator.select_playlist(&PlaylistId::new("p1")).unwrap();
    assert_eq!(h.orchestrator.queue().len(), 3);

    h.orchestrator.add_device("Kitchen", ADDR2).await.unwrap();

    assert!(h.orchestrator.queue().is_empty());
    assert!(h.orchestrator.playback().unwrap().current_track.is_none());
}
