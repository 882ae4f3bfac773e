use beo_state::Track;
use parking_lot::RwLock;

/// Source of the local track library
pub trait Catalogue: Send + Sync {
    fn list_tracks(&self) -> Vec<Track>;
}

/// Fixed, replaceable track list
#[derive(Debug, Default)]
pub struct StaticCatalogue {
    tracks: RwLock<Vec<Track>>,
}

impl StaticCatalogue {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks: RwLock::new(tracks),
        }
    }

    /// Swap the library contents; callers refresh the orchestrator afterwards
    pub fn replace(&self, tracks: Vec<Track>) {
        *self.tracks.write() = tracks;
    }
}

impl Catalogue for StaticCatalogue {
    fn list_tracks(&self) -> Vec<Track> {
        self.tracks.read().clone()
    }
}
