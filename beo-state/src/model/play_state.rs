//! Transport state enumeration

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport state of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayState {
    #[default]
    Stopped,
    Playing,
    Paused,
    Buffering,
}

impl PlayState {
    /// Parse a device-reported state string
    ///
    /// Returns `None` for values this client does not know, so callers can
    /// keep the previous state instead of guessing.
    pub fn from_wire(state: &str) -> Option<Self> {
        match state.to_ascii_lowercase().as_str() {
            "playing" | "play" => Some(PlayState::Playing),
            "paused" | "pause" => Some(PlayState::Paused),
            "stopped" | "stop" | "idle" => Some(PlayState::Stopped),
            "buffering" | "preparing" | "loading" => Some(PlayState::Buffering),
            _ => None,
        }
    }

    pub fn is_playing(self) -> bool {
        self == PlayState::Playing
    }

    /// State requested by a play/pause toggle
    pub fn toggled(self) -> Self {
        if self.is_playing() {
            PlayState::Paused
        } else {
            PlayState::Playing
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayState::Stopped => "stopped",
            PlayState::Playing => "playing",
            PlayState::Paused => "paused",
            PlayState::Buffering => "buffering",
        }
    }
}

impl fmt::Display for PlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
