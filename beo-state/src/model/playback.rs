use beo_api::PlayMode;
use serde::{Deserialize, Serialize};

use super::{PlayState, SourceId, Track};

/// Volume a freshly selected device is shown with before it reports one
pub const DEFAULT_VOLUME: u8 = 50;

/// Upper bound of the volume scale
pub const MAX_VOLUME: u8 = 100;

/// Canonical playback state of the selected device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub play_state: PlayState,
    pub progress_secs: u32,
    pub volume: u8,
    pub active_source: SourceId,
    pub play_mode: PlayMode,
    pub current_track: Option<Track>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            play_state: PlayState::Stopped,
            progress_secs: 0,
            volume: DEFAULT_VOLUME,
            active_source: SourceId::local(),
            play_mode: PlayMode::Sequential,
            current_track: None,
        }
    }
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_local_source(&self) -> bool {
        self.active_source.is_local()
    }

    /// Re-establish the range invariants
    ///
    /// Progress is clamped to the current track's duration, or 0 with no
    /// track; volume is clamped to the 0..=100 scale.
    pub fn normalize(&mut self) {
        self.volume = self.volume.min(MAX_VOLUME);
        self.progress_secs = match &self.current_track {
            Some(track) => self.progress_secs.min(track.duration_secs),
            None => 0,
        };
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}
