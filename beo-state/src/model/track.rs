use serde::{Deserialize, Serialize};

use super::{SourceId, TrackId};

/// A playable track
///
/// Tracks are immutable once built. An unknown duration is 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub artwork_ref: Option<String>,
    pub duration_secs: u32,
    pub source_path: Option<String>,
}

/// Prefix of ids given to synthetic "playing from source" tracks
pub const PLACEHOLDER_PREFIX: &str = "source:";

impl Track {
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration_secs: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            artwork_ref: None,
            duration_secs,
            source_path: None,
        }
    }

    pub fn with_artwork(mut self, artwork_ref: impl Into<String>) -> Self {
        self.artwork_ref = Some(artwork_ref.into());
        self
    }

    pub fn with_source_path(mut self, source_path: impl Into<String>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    /// Synthetic track standing for "playing from `source`"
    ///
    /// Has duration 0 and never belongs to a queue.
    pub fn source_placeholder(source: &SourceId, display_name: &str) -> Self {
        let title = if display_name.is_empty() {
            source.as_str()
        } else {
            display_name
        };
        Self::new(
            format!("{PLACEHOLDER_PREFIX}{source}"),
            format!("Playing from {title}"),
            "",
            0,
        )
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.as_str().starts_with(PLACEHOLDER_PREFIX)
    }
}
