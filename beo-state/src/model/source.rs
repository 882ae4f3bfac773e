use beo_api::WireSource;
use serde::{Deserialize, Serialize};

use super::SourceId;

/// Category of a playback source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    LocalQueue,
    Streaming,
    LineIn,
    Bluetooth,
    Other(String),
}

impl SourceKind {
    /// Map a device-reported source type
    pub fn from_wire(kind: &str) -> Self {
        match kind.to_ascii_uppercase().as_str() {
            "LOCAL" | "MUSIC" | "DLNA_DMR" => SourceKind::LocalQueue,
            "LINE_IN" | "LINEIN" | "AUX" | "OPTICAL" | "SPDIF" => SourceKind::LineIn,
            "BLUETOOTH" | "BT" => SourceKind::Bluetooth,
            "SPOTIFY" | "DEEZER" | "TIDAL" | "TUNEIN" | "NET_RADIO" | "AIRPLAY"
            | "CHROMECAST" | "QPLAY" => SourceKind::Streaming,
            _ => SourceKind::Other(kind.to_string()),
        }
    }
}

/// A playback origin offered by a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: SourceId,
    pub display_name: String,
    pub kind: SourceKind,
}

impl Source {
    pub fn new(id: impl Into<SourceId>, display_name: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            kind,
        }
    }

    /// The locally managed queue, always available
    pub fn local() -> Self {
        Self::new(SourceId::local(), "Local Library", SourceKind::LocalQueue)
    }
}

impl From<WireSource> for Source {
    fn from(wire: WireSource) -> Self {
        let display_name = wire
            .friendly_name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| wire.id.clone());
        let kind = wire
            .kind
            .as_deref()
            .map(SourceKind::from_wire)
            .unwrap_or_else(|| SourceKind::Other(String::new()));
        Self::new(wire.id, display_name, kind)
    }
}
