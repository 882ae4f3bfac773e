//! Wire models for the device's JSON control surface
//!
//! Every field the device may omit is optional here. Defaults are applied by
//! the consumers that turn these payloads into domain state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Artist shown for tracks the device reports without one
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Track advance policy
///
/// The device itself only knows a shuffle flag; the repeat modes are honoured
/// by the local queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayMode {
    /// Play the queue once in order
    #[default]
    Sequential,
    /// Wrap to the start after the last track
    RepeatList,
    /// Replay the current track
    RepeatOne,
    /// Pick tracks at random
    Shuffle,
}

impl PlayMode {
    /// Fixed cycling order used by [`PlayMode::next`]
    pub const CYCLE: [PlayMode; 4] = [
        PlayMode::Sequential,
        PlayMode::RepeatList,
        PlayMode::RepeatOne,
        PlayMode::Shuffle,
    ];

    /// The mode that follows this one in the cycle, wrapping after shuffle
    pub fn next(self) -> Self {
        match self {
            PlayMode::Sequential => PlayMode::RepeatList,
            PlayMode::RepeatList => PlayMode::RepeatOne,
            PlayMode::RepeatOne => PlayMode::Shuffle,
            PlayMode::Shuffle => PlayMode::Sequential,
        }
    }

    /// Shuffle flag sent to the device for this mode
    pub fn is_shuffle(self) -> bool {
        matches!(self, PlayMode::Shuffle)
    }

    /// Mode reported by a device shuffle flag
    pub fn from_shuffle(shuffle: bool) -> Self {
        if shuffle {
            PlayMode::Shuffle
        } else {
            PlayMode::Sequential
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayMode::Sequential => "sequential",
            PlayMode::RepeatList => "repeatList",
            PlayMode::RepeatOne => "repeatOne",
            PlayMode::Shuffle => "shuffle",
        }
    }
}

impl fmt::Display for PlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WireArt {
    #[serde(default)]
    pub url: Option<String>,
}

/// Track as reported in stream snapshots and progress events
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WireTrack {
    pub id: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub art: Option<WireArt>,
    /// Seconds; devices report fractional values for some sources
    pub duration: Option<f64>,
}

impl WireTrack {
    /// Title if present and non-empty
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    pub fn artist_or_default(&self) -> &str {
        self.artist
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(UNKNOWN_ARTIST)
    }

    pub fn art_url(&self) -> Option<&str> {
        self.art
            .as_ref()
            .and_then(|art| art.url.as_deref())
            .filter(|url| !url.is_empty())
    }

    /// Duration in whole seconds; negative or missing values become 0
    pub fn duration_secs(&self) -> u32 {
        self.duration.map(seconds_from_wire).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WireSourceRef {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WirePlayMode {
    #[serde(default)]
    pub shuffle: Option<bool>,
}

/// Body of `GET BeoZone/Zone/Stream`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreamInfo {
    pub state: Option<String>,
    pub progress: Option<f64>,
    pub source: Option<WireSourceRef>,
    pub play_mode: Option<WirePlayMode>,
    pub track: Option<WireTrack>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WireLevel {
    #[serde(default)]
    pub level: Option<f64>,
}

/// Body of `GET BeoDevice/settings/volume`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VolumeInfo {
    #[serde(default)]
    pub speaker: Option<WireLevel>,
}

impl VolumeInfo {
    pub fn level(&self) -> Option<u8> {
        self.speaker
            .as_ref()
            .and_then(|s| s.level)
            .map(volume_from_wire)
    }
}

/// Authoritative state fetched directly from a device
///
/// Combines the stream and volume resources. Missing values stay `None` so
/// the caller can apply its own defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackSnapshot {
    pub state: Option<String>,
    pub progress_secs: Option<u32>,
    pub volume: Option<u8>,
    pub source_id: Option<String>,
    pub shuffle: Option<bool>,
    pub track: Option<WireTrack>,
}

impl PlaybackSnapshot {
    pub fn from_parts(stream: StreamInfo, volume: VolumeInfo) -> Self {
        Self {
            state: stream.state,
            progress_secs: stream.progress.map(seconds_from_wire),
            volume: volume.level(),
            source_id: stream.source.and_then(|s| s.id),
            shuffle: stream.play_mode.and_then(|m| m.shuffle),
            track: stream.track,
        }
    }
}

/// A playback origin offered by the device
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireSource {
    pub id: String,
    #[serde(rename = "friendlyName", default)]
    pub friendly_name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SourceCollection {
    Keyed(std::collections::BTreeMap<String, WireSource>),
    List(Vec<WireSource>),
}

#[derive(Debug, Deserialize)]
struct SourcesBody {
    #[serde(default)]
    sources: Option<SourceCollection>,
}

/// Decode the body of `GET BeoZone/Zone/Sources`
///
/// Devices report sources either keyed by id or as a plain list. A body
/// without a `sources` member yields an empty list.
pub fn parse_sources(body: &str) -> Result<Vec<WireSource>, serde_json::Error> {
    let parsed: SourcesBody = serde_json::from_str(body)?;
    Ok(match parsed.sources {
        Some(SourceCollection::Keyed(map)) => map.into_values().collect(),
        Some(SourceCollection::List(list)) => list,
        None => Vec::new(),
    })
}

/// Round a wire seconds value into the non-negative integer range
pub fn seconds_from_wire(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Round and clamp a wire volume level into 0..=100
pub fn volume_from_wire(value: f64) -> u8 {
    if value.is_finite() {
        value.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_mode_cycle_order() {
        assert_eq!(PlayMode::Sequential.next(), PlayMode::RepeatList);
        assert_eq!(PlayMode::RepeatList.next(), PlayMode::RepeatOne);
        assert_eq!(PlayMode::RepeatOne.next(), PlayMode::Shuffle);
        assert_eq!(PlayMode::Shuffle.next(), PlayMode::Sequential);
    }

    #[test]
    fn test_play_mode_shuffle_flag() {
        assert!(PlayMode::Shuffle.is_shuffle());
        assert!(!PlayMode::RepeatOne.is_shuffle());
        assert_eq!(PlayMode::from_shuffle(true), PlayMode::Shuffle);
        assert_eq!(PlayMode::from_shuffle(false), PlayMode::Sequential);
    }

    #[test]
    fn test_play_mode_serde_names() {
        let json = serde_json::to_string(&PlayMode::RepeatList).unwrap();
        assert_eq!(json, "\"repeatList\"");
        assert_eq!(PlayMode::RepeatOne.to_string(), "repeatOne");
    }

    #[test]
    fn test_stream_info_partial_body() {
        let info: StreamInfo = serde_json::from_str(
            r#"{"state":"playing","progress":12.6,"playMode":{"shuffle":true}}"#,
        )
        .unwrap();
        let snapshot = PlaybackSnapshot::from_parts(info, VolumeInfo::default());

        assert_eq!(snapshot.state.as_deref(), Some("playing"));
        assert_eq!(snapshot.progress_secs, Some(13));
        assert_eq!(snapshot.shuffle, Some(true));
        assert_eq!(snapshot.volume, None);
        assert!(snapshot.track.is_none());
    }

    #[test]
    fn test_wire_track_defaults() {
        let track: WireTrack =
            serde_json::from_str(r#"{"title":"Song","art":{"url":""},"duration":-3}"#).unwrap();
        assert_eq!(track.title(), Some("Song"));
        assert_eq!(track.artist_or_default(), UNKNOWN_ARTIST);
        assert_eq!(track.art_url(), None);
        assert_eq!(track.duration_secs(), 0);
    }

    #[test]
    fn test_volume_level_clamped() {
        let info: VolumeInfo = serde_json::from_str(r#"{"speaker":{"level":140}}"#).unwrap();
        assert_eq!(info.level(), Some(100));
    }

    #[test]
    fn test_parse_sources_keyed_and_list() {
        let keyed = r#"{"sources":{"spotify:1":{"id":"spotify:1","friendlyName":"Spotify","type":"SPOTIFY"}}}"#;
        let sources = parse_sources(keyed).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].friendly_name.as_deref(), Some("Spotify"));

        let list = r#"{"sources":[{"id":"linein"},{"id":"bluetooth","type":"BLUETOOTH"}]}"#;
        let sources = parse_sources(list).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[1].kind.as_deref(), Some("BLUETOOTH"));

        assert!(parse_sources("{}").unwrap().is_empty());
    }
}
