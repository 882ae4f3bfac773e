//! Known devices
//!
//! The registry only stores identity and address. Online status is derived
//! by probing and never stored.

use beo_state::{Device, DeviceId};
use parking_lot::RwLock;
use tracing::debug;

/// Persistent list of known devices
pub trait DeviceRegistry: Send + Sync {
    /// All devices in insertion order
    fn list(&self) -> Vec<Device>;

    /// Add a device; an address that is already known returns the existing entry
    fn add(&self, display_name: &str, address: &str) -> Device;

    /// Remove a device, returning whether it existed
    fn delete(&self, id: &DeviceId) -> bool;

    fn get(&self, id: &DeviceId) -> Option<Device> {
        self.list().into_iter().find(|d| &d.id == id)
    }
}

/// In-memory registry
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    devices: RwLock<Vec<Device>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_devices(devices: impl IntoIterator<Item = Device>) -> Self {
        Self {
            devices: RwLock::new(
                devices
                    .into_iter()
                    .map(|d| d.with_online(false))
                    .collect(),
            ),
        }
    }
}

impl DeviceRegistry for MemoryRegistry {
    fn list(&self) -> Vec<Device> {
        self.devices.read().clone()
    }

    fn add(&self, display_name: &str, address: &str) -> Device {
        let mut devices = self.devices.write();
        if let Some(existing) = devices.iter().find(|d| d.address == address) {
            return existing.clone();
        }

        let device = Device::new(uuid::Uuid::new_v4().to_string(), display_name, address);
        debug!(device = %device.id, address, "Device registered");
        devices.push(device.clone());
        device
    }

    fn delete(&self, id: &DeviceId) -> bool {
        let mut devices = self.devices.write();
        let before = devices.len();
        devices.retain(|d| &d.id != id);
        devices.len() != before
    }
}
