// In-Memory DeviceStore Adapter

use async_trait::async_trait;
use phonebooth_core::domain::Device;
use phonebooth_core::error::Result;
use phonebooth_core::port::DeviceStore;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Keyed in-memory device store.
///
/// The core treats persistence as an external keyed store; this adapter
/// backs it with a map behind an async read-write lock, which is all the
/// in-process deployment needs.
pub struct InMemoryDeviceStore {
    devices: RwLock<HashMap<String, Device>>,
}

impl InMemoryDeviceStore {
    pub fn new() -> Self {
        Self {
            devices: RwLock::new(HashMap::new()),
        }
    }

    /// Store pre-populated with the given devices, for seeding and tests
    pub async fn seed(devices: impl IntoIterator<Item = Device>) -> Self {
        let store = Self::new();
        {
            let mut map = store.devices.write().await;
            for device in devices {
                map.insert(device.id.clone(), device);
            }
        }
        store
    }

    pub async fn len(&self) -> usize {
        self.devices.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.devices.read().await.is_empty()
    }
}

impl Default for InMemoryDeviceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceStore for InMemoryDeviceStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Device>> {
        Ok(self.devices.read().await.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Device>> {
        Ok(self.devices.read().await.values().cloned().collect())
    }

    async fn save(&self, device: &Device) -> Result<Device> {
        debug!(device_id = %device.id, available = device.is_available, "Saving device");
        self.devices
            .write()
            .await
            .insert(device.id.clone(), device.clone());
        Ok(device.clone())
    }
}
