use serde::{Deserialize, Serialize};

use super::{PlaylistId, TrackId};

/// A named, ordered list of track ids
///
/// Order defines queue order. The same id may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub track_ids: Vec<TrackId>,
}

impl Playlist {
    pub fn new<I, T>(id: impl Into<PlaylistId>, name: impl Into<String>, track_ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TrackId>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            track_ids: track_ids.into_iter().map(Into::into).collect(),
        }
    }
}
