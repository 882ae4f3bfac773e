//! Local queue resolution and track advance
//!
//! The queue backs next/previous for the local source without asking the
//! device. It is rebuilt from a playlist and the track catalogue.

use beo_api::PlayMode;
use rand::Rng;

use crate::model::{PlayState, Playlist, PlaylistId, Track, TrackId};
use crate::write::FieldValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Result of advancing through the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Play this track next
    Track(Track),
    /// The end of a sequential queue was reached
    Stop,
}

impl Advance {
    /// Field values that carry this advance into the playback record
    ///
    /// A new track starts playing from the top. A stop changes only the
    /// transport state and leaves the current track alone.
    pub fn into_writes(self) -> Vec<FieldValue> {
        match self {
            Advance::Track(track) => select_track(track),
            Advance::Stop => vec![FieldValue::PlayState(PlayState::Stopped)],
        }
    }
}

/// Map a playlist through the catalogue, keeping playlist order
///
/// Ids with no catalogue entry are dropped. Duplicate ids yield duplicate
/// queue entries.
pub fn resolve_queue(playlist: &Playlist, catalogue: &[Track]) -> Vec<Track> {
    playlist
        .track_ids
        .iter()
        .filter_map(|id| catalogue.iter().find(|t| &t.id == id).cloned())
        .collect()
}

/// Pick the next track using the thread-local random generator
pub fn advance(
    direction: Direction,
    current: Option<&Track>,
    queue: &[Track],
    mode: PlayMode,
) -> Advance {
    advance_with_rng(direction, current, queue, mode, &mut rand::thread_rng())
}

/// Pick the next track under `mode`
///
/// The current track is located by id; when it is not in the queue,
/// forward starts at the first track and backward at the last. Backward
/// wraps in every mode. An empty queue always stops.
pub fn advance_with_rng<R: Rng + ?Sized>(
    direction: Direction,
    current: Option<&Track>,
    queue: &[Track],
    mode: PlayMode,
    rng: &mut R,
) -> Advance {
    if queue.is_empty() {
        return Advance::Stop;
    }
    let len = queue.len();
    let index = current.and_then(|track| queue.iter().position(|t| t.id == track.id));

    let next = match (mode, direction) {
        (PlayMode::Shuffle, _) => rng.gen_range(0..len),
        (PlayMode::RepeatOne, Direction::Forward) => match current {
            Some(track) => return Advance::Track(track.clone()),
            None => 0,
        },
        (_, Direction::Backward) => match index {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        },
        (PlayMode::Sequential, Direction::Forward) => match index {
            Some(i) if i + 1 >= len => return Advance::Stop,
            Some(i) => i + 1,
            None => 0,
        },
        (PlayMode::RepeatList, Direction::Forward) => match index {
            Some(i) => (i + 1) % len,
            None => 0,
        },
    };
    Advance::Track(queue[next].clone())
}

/// Field values for choosing `track` directly
pub fn select_track(track: Track) -> Vec<FieldValue> {
    vec![
        FieldValue::Track(Some(track)),
        FieldValue::Progress(0),
        FieldValue::PlayState(PlayState::Playing),
    ]
}

/// The resolved queue of the loaded playlist
#[derive(Debug, Clone, Default)]
pub struct QueueController {
    playlist_id: Option<PlaylistId>,
    tracks: Vec<Track>,
}

impl QueueController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `playlist` and make it the loaded queue
    pub fn load(&mut self, playlist: &Playlist, catalogue: &[Track]) -> &[Track] {
        self.playlist_id = Some(playlist.id.clone());
        self.tracks = resolve_queue(playlist, catalogue);
        &self.tracks
    }

    pub fn clear(&mut self) {
        self.playlist_id = None;
        self.tracks.clear();
    }

    pub fn playlist_id(&self) -> Option<&PlaylistId> {
        self.playlist_id.as_ref()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn first(&self) -> Option<&Track> {
        self.tracks.first()
    }

    pub fn find(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    pub fn advance(&self, direction: Direction, current: Option<&Track>, mode: PlayMode) -> Advance {
        advance(direction, current, &self.tracks, mode)
    }

    pub fn advance_with_rng<R: Rng + ?Sized>(
        &self,
        direction: Direction,
        current: Option<&Track>,
        mode: PlayMode,
        rng: &mut R,
    ) -> Advance {
        advance_with_rng(direction, current, &self.tracks, mode, rng)
    }
}
