//! Model types for beo-state

mod device;
mod ids;
mod play_state;
mod playback;
mod playlist;
mod source;
mod track;

pub use beo_api::PlayMode;
pub use device::Device;
pub use ids::{DeviceId, PlaylistId, SourceId, TrackId, LOCAL_SOURCE};
pub use play_state::PlayState;
pub use playback::{PlaybackState, DEFAULT_VOLUME, MAX_VOLUME};
pub use playlist::Playlist;
pub use source::{Source, SourceKind};
pub use track::{Track, PLACEHOLDER_PREFIX};
