use serde::{Deserialize, Serialize};

use super::DeviceId;

/// A controllable network audio endpoint
///
/// `online` is derived from the last probe and is never taken from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub display_name: String,
    pub address: String,
    #[serde(skip, default)]
    pub online: bool,
}

impl Device {
    pub fn new(id: impl Into<DeviceId>, display_name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            address: address.into(),
            online: false,
        }
    }

    pub fn with_online(mut self, online: bool) -> Self {
        self.online = online;
        self
    }
}
