//! Notification envelopes and the event taxonomy
//!
//! A successful long poll returns one JSON envelope `{type, data}`. Known
//! types decode into a [`Notification`]; unknown types decode into
//! [`Notification::Unknown`] and are skipped by the stream.

use beo_api::models::{seconds_from_wire, volume_from_wire, WireTrack};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{StreamError, StreamResult};

pub const VOLUME: &str = "VOLUME";
pub const PROGRESS_INFORMATION: &str = "PROGRESS_INFORMATION";
pub const SOURCE: &str = "SOURCE";
pub const PLAY_STATE: &str = "PLAY_STATE";

/// Raw event envelope as sent by the device
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn parse(body: &str) -> StreamResult<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// A decoded device event
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Output level changed
    Volume { level: u8 },

    /// Periodic playhead report, possibly carrying the current track
    ProgressInformation {
        progress_secs: Option<u32>,
        state: Option<String>,
        track: Option<WireTrack>,
    },

    /// Active source changed
    Source { source_id: String },

    /// Transport state and/or shuffle flag changed
    PlayState {
        state: Option<String>,
        shuffle: Option<bool>,
    },

    /// An event type this client does not handle
    Unknown { kind: String },
}

#[derive(Deserialize)]
struct VolumeData {
    speaker: Option<LevelData>,
}

#[derive(Deserialize)]
struct LevelData {
    level: Option<f64>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ProgressData {
    progress: Option<f64>,
    state: Option<String>,
    track: Option<WireTrack>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SourceData {
    primary_source: Option<SourceRef>,
}

#[derive(Deserialize)]
struct SourceRef {
    id: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct PlayStateData {
    state: Option<String>,
    play_queue: Option<PlayQueueData>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct PlayQueueData {
    shuffle: Option<bool>,
}

impl Notification {
    /// Decode a raw poll body
    pub fn decode(body: &str) -> StreamResult<Self> {
        Self::from_envelope(Envelope::parse(body)?)
    }

    /// Dispatch an envelope by type
    ///
    /// Known types with a payload missing the fields they exist to carry
    /// are malformed. Unknown types are never an error.
    pub fn from_envelope(envelope: Envelope) -> StreamResult<Self> {
        let Envelope { kind, data } = envelope;
        match kind.as_str() {
            VOLUME => {
                let data: VolumeData = serde_json::from_value(data)?;
                let level = data
                    .speaker
                    .and_then(|s| s.level)
                    .ok_or_else(|| missing(VOLUME, "speaker.level"))?;
                Ok(Notification::Volume {
                    level: volume_from_wire(level),
                })
            }
            PROGRESS_INFORMATION => {
                let data: ProgressData = serde_json::from_value(data)?;
                Ok(Notification::ProgressInformation {
                    progress_secs: data.progress.map(seconds_from_wire),
                    state: data.state,
                    track: data.track,
                })
            }
            SOURCE => {
                let data: SourceData = serde_json::from_value(data)?;
                let source_id = data
                    .primary_source
                    .and_then(|s| s.id)
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| missing(SOURCE, "primarySource.id"))?;
                Ok(Notification::Source { source_id })
            }
            PLAY_STATE => {
                let data: PlayStateData = serde_json::from_value(data)?;
                let shuffle = data.play_queue.and_then(|q| q.shuffle);
                if data.state.is_none() && shuffle.is_none() {
                    return Err(missing(PLAY_STATE, "state or playQueue.shuffle"));
                }
                Ok(Notification::PlayState {
                    state: data.state,
                    shuffle,
                })
            }
            _ => Ok(Notification::Unknown { kind }),
        }
    }

    /// Envelope type this notification was decoded from
    pub fn kind(&self) -> &str {
        match self {
            Notification::Volume { .. } => VOLUME,
            Notification::ProgressInformation { .. } => PROGRESS_INFORMATION,
            Notification::Source { .. } => SOURCE,
            Notification::PlayState { .. } => PLAY_STATE,
            Notification::Unknown { kind } => kind,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Notification::Unknown { .. })
    }
}

fn missing(kind: &str, field: &str) -> StreamError {
    StreamError::MalformedEvent(format!("{kind} event without {field}"))
}

/// A notification tagged with the stream that produced it
///
/// `generation` identifies the selection the stream was started for, so a
/// consumer can drop events from a stream it has already replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamEvent {
    pub address: String,
    pub generation: u64,
    pub notification: Notification,
}
