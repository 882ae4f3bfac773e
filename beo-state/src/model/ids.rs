//! Identity types

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! impl_id_type {
    ($name:ident) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name::new(s)
            }
        }
    };
}

/// Registry identifier of a device
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(String);

impl_id_type!(DeviceId);

/// Identifier of a track in the catalogue or reported by a device
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(String);

impl_id_type!(TrackId);

/// Identifier of a playback source offered by a device
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceId(String);

impl_id_type!(SourceId);

impl SourceId {
    /// The source backed by the locally managed queue
    pub fn local() -> Self {
        Self::new(LOCAL_SOURCE)
    }

    pub fn is_local(&self) -> bool {
        self.0 == LOCAL_SOURCE
    }
}

impl Default for SourceId {
    fn default() -> Self {
        Self::local()
    }
}

/// Raw id of the local-queue source
pub const LOCAL_SOURCE: &str = "local";

/// Identifier of a saved playlist
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaylistId(String);

impl_id_type!(PlaylistId);
