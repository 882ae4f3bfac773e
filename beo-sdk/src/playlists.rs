//! Saved playlists

use beo_state::{Playlist, PlaylistId};

/// Playlists in insertion order
#[derive(Debug, Clone, Default)]
pub struct PlaylistLibrary {
    playlists: Vec<Playlist>,
}

impl PlaylistLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace by id. Returns true when an existing playlist was replaced.
    pub fn upsert(&mut self, playlist: Playlist) -> bool {
        match self.playlists.iter_mut().find(|p| p.id == playlist.id) {
            Some(existing) => {
                *existing = playlist;
                true
            }
            None => {
                self.playlists.push(playlist);
                false
            }
        }
    }

    pub fn remove(&mut self, id: &PlaylistId) -> Option<Playlist> {
        let index = self.playlists.iter().position(|p| &p.id == id)?;
        Some(self.playlists.remove(index))
    }

    pub fn get(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| &p.id == id)
    }

    pub fn list(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }
}
