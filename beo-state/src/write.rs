//! Tagged writes into the playback record
//!
//! Every change to [`PlaybackState`] is a [`Write`]: a single-field value
//! tagged with its precedence. Optimistic writes come from user commands,
//! authoritative writes come from the device.

use std::fmt;

use beo_api::PlayMode;

use crate::model::{PlayState, PlaybackState, SourceId, Track};

/// A single field of [`PlaybackState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    PlayState,
    Progress,
    Volume,
    Source,
    PlayMode,
    Track,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::PlayState,
        Field::Progress,
        Field::Volume,
        Field::Source,
        Field::PlayMode,
        Field::Track,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::PlayState => "play_state",
            Field::Progress => "progress",
            Field::Volume => "volume",
            Field::Source => "source",
            Field::PlayMode => "play_mode",
            Field::Track => "track",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A new value for exactly one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    PlayState(PlayState),
    Progress(u32),
    Volume(u8),
    Source(SourceId),
    PlayMode(PlayMode),
    Track(Option<Track>),
}

impl FieldValue {
    pub fn field(&self) -> Field {
        match self {
            FieldValue::PlayState(_) => Field::PlayState,
            FieldValue::Progress(_) => Field::Progress,
            FieldValue::Volume(_) => Field::Volume,
            FieldValue::Source(_) => Field::Source,
            FieldValue::PlayMode(_) => Field::PlayMode,
            FieldValue::Track(_) => Field::Track,
        }
    }

    /// Current value of `field` in `state`
    pub fn read(field: Field, state: &PlaybackState) -> Self {
        match field {
            Field::PlayState => FieldValue::PlayState(state.play_state),
            Field::Progress => FieldValue::Progress(state.progress_secs),
            Field::Volume => FieldValue::Volume(state.volume),
            Field::Source => FieldValue::Source(state.active_source.clone()),
            Field::PlayMode => FieldValue::PlayMode(state.play_mode),
            Field::Track => FieldValue::Track(state.current_track.clone()),
        }
    }

    /// Write this value into `state`, touching no other field
    pub fn apply_to(self, state: &mut PlaybackState) {
        match self {
            FieldValue::PlayState(v) => state.play_state = v,
            FieldValue::Progress(v) => state.progress_secs = v,
            FieldValue::Volume(v) => state.volume = v,
            FieldValue::Source(v) => state.active_source = v,
            FieldValue::PlayMode(v) => state.play_mode = v,
            FieldValue::Track(v) => state.current_track = v,
        }
    }
}

/// Precedence tag of a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Local guess made before the device confirmed anything
    Optimistic,
    /// Value reported by the device
    Authoritative,
}

/// A field value tagged with its precedence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Optimistic(FieldValue),
    Authoritative(FieldValue),
}

impl Write {
    pub fn origin(&self) -> Origin {
        match self {
            Write::Optimistic(_) => Origin::Optimistic,
            Write::Authoritative(_) => Origin::Authoritative,
        }
    }

    pub fn value(&self) -> &FieldValue {
        match self {
            Write::Optimistic(v) | Write::Authoritative(v) => v,
        }
    }

    pub fn field(&self) -> Field {
        self.value().field()
    }

    pub fn into_value(self) -> FieldValue {
        match self {
            Write::Optimistic(v) | Write::Authoritative(v) => v,
        }
    }
}
