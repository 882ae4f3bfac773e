//! Translation of device reports into authoritative field values
//!
//! Both the notification stream and the direct snapshot fetch end up here,
//! so the two authoritative paths agree on defaults and on how tracks are
//! built.

use beo_api::{PlayMode, PlaybackSnapshot, WireTrack};
use beo_stream::Notification;
use tracing::trace;

use crate::model::{PlayState, PlaybackState, SourceId, Track, TrackId, DEFAULT_VOLUME};
use crate::write::FieldValue;

/// Build a track from a device report
///
/// Returns `None` unless the report carries a non-empty title. A missing id
/// is filled in by `fallback_id`.
pub fn track_from_wire(wire: &WireTrack, fallback_id: impl FnOnce() -> TrackId) -> Option<Track> {
    let title = wire.title()?;
    let id = wire
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .map(TrackId::from)
        .unwrap_or_else(fallback_id);

    let mut track = Track::new(id, title, wire.artist_or_default(), wire.duration_secs());
    if let Some(url) = wire.art_url() {
        track = track.with_artwork(url);
    }
    Some(track)
}

/// Field values carried by a stream notification
///
/// `current` supplies context the event may omit: a progress event without
/// a track id keeps the id of the track already shown.
pub fn decode_notification(notification: &Notification, current: &PlaybackState) -> Vec<FieldValue> {
    let mut values = Vec::new();
    match notification {
        Notification::Volume { level } => values.push(FieldValue::Volume(*level)),
        Notification::ProgressInformation {
            progress_secs,
            state,
            track,
        } => {
            if let Some(progress) = progress_secs {
                values.push(FieldValue::Progress(*progress));
            }
            if let Some(state) = state.as_deref().and_then(PlayState::from_wire) {
                values.push(FieldValue::PlayState(state));
            }
            // Partial events without a title leave the current track alone.
            let built = track.as_ref().and_then(|wire| {
                track_from_wire(wire, || {
                    current
                        .current_track
                        .as_ref()
                        .map(|t| t.id.clone())
                        .unwrap_or_else(|| TrackId::new(""))
                })
            });
            if let Some(track) = built {
                values.push(FieldValue::Track(Some(track)));
            }
        }
        Notification::Source { source_id } => {
            values.push(FieldValue::Source(SourceId::new(source_id.as_str())));
        }
        Notification::PlayState { state, shuffle } => {
            if let Some(state) = state.as_deref().and_then(PlayState::from_wire) {
                values.push(FieldValue::PlayState(state));
            }
            if let Some(shuffle) = shuffle {
                values.push(FieldValue::PlayMode(PlayMode::from_shuffle(*shuffle)));
            }
        }
        Notification::Unknown { kind } => {
            trace!(%kind, "No fields for unknown notification");
        }
    }
    values
}

/// Every field of a directly fetched snapshot, with defaults for gaps
///
/// A snapshot track without an id gets a fresh random id.
pub fn decode_snapshot(snapshot: &PlaybackSnapshot) -> Vec<FieldValue> {
    let track = snapshot
        .track
        .as_ref()
        .and_then(|wire| track_from_wire(wire, || TrackId::new(uuid::Uuid::new_v4().to_string())));

    vec![
        FieldValue::PlayState(
            snapshot
                .state
                .as_deref()
                .and_then(PlayState::from_wire)
                .unwrap_or_default(),
        ),
        FieldValue::Track(track),
        FieldValue::Progress(snapshot.progress_secs.unwrap_or(0)),
        FieldValue::Volume(snapshot.volume.unwrap_or(DEFAULT_VOLUME)),
        FieldValue::Source(
            snapshot
                .source_id
                .as_deref()
                .filter(|id| !id.is_empty())
                .map(SourceId::from)
                .unwrap_or_default(),
        ),
        FieldValue::PlayMode(PlayMode::from_shuffle(snapshot.shuffle.unwrap_or(false))),
    ]
}
