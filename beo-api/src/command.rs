//! Transport commands and the resources they address

use std::fmt;

use serde_json::{json, Value};

use crate::models::PlayMode;

/// Resource paths relative to the device's control root
pub mod paths {
    pub const DEVICE: &str = "BeoDevice";
    pub const VOLUME: &str = "BeoDevice/settings/volume";
    pub const STREAM: &str = "BeoZone/Zone/Stream";
    pub const SOURCES: &str = "BeoZone/Zone/Sources";
    pub const ACTIVE_SOURCE: &str = "BeoZone/Zone/ActiveSource";
    pub const PLAY: &str = "BeoZone/Zone/Player/play";
    pub const PAUSE: &str = "BeoZone/Zone/Player/pause";
    pub const FORWARD: &str = "BeoZone/Zone/Player/forward";
    pub const BACKWARD: &str = "BeoZone/Zone/Player/backward";
    pub const PROGRESS: &str = "BeoZone/Zone/Player/progress";
    pub const PLAY_QUEUE: &str = "BeoZone/Zone/Player/playQueue";
    pub const NOTIFICATIONS: &str = "BeoNotify/Notifications";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        }
    }
}

/// A transport command understood by the device
///
/// Each variant knows its HTTP method, resource path and JSON body, so the
/// client can send any of them through one code path.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play,
    Pause,
    /// Jump to an absolute position in seconds
    Seek { seconds: u32 },
    /// Set the output level, 0 to 100
    SetVolume { level: u8 },
    Next,
    Previous,
    ChangeSource { id: String },
    SetPlayMode { mode: PlayMode },
}

impl Command {
    /// Play or pause depending on the requested transport state
    pub fn set_playing(playing: bool) -> Self {
        if playing {
            Command::Play
        } else {
            Command::Pause
        }
    }

    /// Short name used in logs and notices
    pub fn name(&self) -> &'static str {
        match self {
            Command::Play => "play",
            Command::Pause => "pause",
            Command::Seek { .. } => "seek",
            Command::SetVolume { .. } => "set_volume",
            Command::Next => "next",
            Command::Previous => "previous",
            Command::ChangeSource { .. } => "change_source",
            Command::SetPlayMode { .. } => "set_play_mode",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Command::Seek { .. } | Command::SetVolume { .. } | Command::SetPlayMode { .. } => {
                Method::Put
            }
            _ => Method::Post,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Command::Play => paths::PLAY,
            Command::Pause => paths::PAUSE,
            Command::Seek { .. } => paths::PROGRESS,
            Command::SetVolume { .. } => paths::VOLUME,
            Command::Next => paths::FORWARD,
            Command::Previous => paths::BACKWARD,
            Command::ChangeSource { .. } => paths::ACTIVE_SOURCE,
            Command::SetPlayMode { .. } => paths::PLAY_QUEUE,
        }
    }

    pub fn body(&self) -> Value {
        match self {
            Command::Seek { seconds } => json!({ "progress": seconds }),
            Command::SetVolume { level } => json!({ "level": (*level).min(100) }),
            Command::ChangeSource { id } => json!({ "id": id }),
            Command::SetPlayMode { mode } => json!({ "shuffle": mode.is_shuffle() }),
            _ => json!({}),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Command::Play, Method::Post, "BeoZone/Zone/Player/play")]
    #[case(Command::Pause, Method::Post, "BeoZone/Zone/Player/pause")]
    #[case(Command::Seek { seconds: 42 }, Method::Put, "BeoZone/Zone/Player/progress")]
    #[case(Command::SetVolume { level: 30 }, Method::Put, "BeoDevice/settings/volume")]
    #[case(Command::Next, Method::Post, "BeoZone/Zone/Player/forward")]
    #[case(Command::Previous, Method::Post, "BeoZone/Zone/Player/backward")]
    #[case(Command::ChangeSource { id: "radio".into() }, Method::Post, "BeoZone/Zone/ActiveSource")]
    #[case(Command::SetPlayMode { mode: PlayMode::Shuffle }, Method::Put, "BeoZone/Zone/Player/playQueue")]
    fn test_command_routes(#[case] command: Command, #[case] method: Method, #[case] path: &str) {
        assert_eq!(command.method(), method);
        assert_eq!(command.path(), path);
    }

    #[test]
    fn test_command_bodies() {
        assert_eq!(Command::Seek { seconds: 90 }.body(), json!({ "progress": 90 }));
        assert_eq!(Command::SetVolume { level: 35 }.body(), json!({ "level": 35 }));
        assert_eq!(
            Command::ChangeSource { id: "spotify:1".into() }.body(),
            json!({ "id": "spotify:1" })
        );
        assert_eq!(Command::Play.body(), json!({}));
    }

    #[test]
    fn test_play_mode_body_only_carries_shuffle() {
        for mode in [PlayMode::Sequential, PlayMode::RepeatList, PlayMode::RepeatOne] {
            assert_eq!(
                Command::SetPlayMode { mode }.body(),
                json!({ "shuffle": false })
            );
        }
        assert_eq!(
            Command::SetPlayMode { mode: PlayMode::Shuffle }.body(),
            json!({ "shuffle": true })
        );
    }

    #[test]
    fn test_set_playing() {
        assert_eq!(Command::set_playing(true), Command::Play);
        assert_eq!(Command::set_playing(false), Command::Pause);
        assert_eq!(Command::set_playing(false).to_string(), "pause");
    }
}
