//! # Beo State
//!
//! Canonical playback state for the selected device and the local queue
//! that backs next/previous.
//!
//! ## Architecture
//!
//! ```text
//!   user command ──FieldValue──▶ apply_optimistic ──▶ ┌───────────────┐
//!                                 (ticket)            │ PlaybackStore │──watch──▶ consumers
//!   stream event ──decoder────▶ apply_authoritative ▶ │ (one lock)    │
//!   snapshot     ──decoder────▶ apply_snapshot ─────▶ └───────────────┘
//!
//!   Playlist + catalogue ──resolve_queue──▶ QueueController ──advance──▶ FieldValue
//! ```
//!
//! Every write is tagged [`Write::Optimistic`] or [`Write::Authoritative`].
//! Device-reported values always overwrite local guesses; a failed command
//! can roll back its own guesses but never an authoritative value.
//!
//! ## Example
//!
//! ```rust
//! use beo_state::{FieldValue, PlayState, PlaybackStore};
//!
//! let store = PlaybackStore::new();
//! let ticket = store.apply_optimistic([FieldValue::PlayState(PlayState::Playing)]);
//!
//! // The play command failed
//! store.rollback(&ticket);
//! assert_eq!(store.snapshot().play_state, PlayState::Stopped);
//! ```

pub mod decoder;
pub mod model;
pub mod queue;
pub mod store;
pub mod write;

pub use model::{
    Device, DeviceId, PlayMode, PlayState, PlaybackState, Playlist, PlaylistId, Source, SourceId,
    SourceKind, Track, TrackId, DEFAULT_VOLUME, LOCAL_SOURCE, MAX_VOLUME,
};
pub use queue::{
    advance, advance_with_rng, resolve_queue, select_track, Advance, Direction, QueueController,
};
pub use store::{OptimisticTicket, PlaybackStore};
pub use write::{Field, FieldValue, Origin, Write};
