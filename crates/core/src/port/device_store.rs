// Device Store Port (Interface)

use crate::domain::Device;
use crate::error::Result;
use async_trait::async_trait;

/// Keyed store for device entities.
///
/// The backing technology is irrelevant to the core: the ledger and the
/// monitoring sweeps only need a synchronous-looking keyed store.
#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// Find a device by id
    async fn find_by_id(&self, id: &str) -> Result<Option<Device>>;

    /// All devices currently in the store
    async fn find_all(&self) -> Result<Vec<Device>>;

    /// Insert or update a device, returning the stored entity
    async fn save(&self, device: &Device) -> Result<Device>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock DeviceStore for core tests: a plain map with optional failure
    /// injection on `save` and on the find operations.
    pub struct MockDeviceStore {
        devices: Mutex<HashMap<String, Device>>,
        fail_saves: Mutex<bool>,
        fail_finds: Mutex<bool>,
    }

    impl MockDeviceStore {
        pub fn new() -> Self {
            Self {
                devices: Mutex::new(HashMap::new()),
                fail_saves: Mutex::new(false),
                fail_finds: Mutex::new(false),
            }
        }

        pub fn with_devices(devices: impl IntoIterator<Item = Device>) -> Self {
            let store = Self::new();
            {
                let mut map = store.devices.lock().unwrap();
                for device in devices {
                    map.insert(device.id.clone(), device);
                }
            }
            store
        }

        pub fn set_fail_saves(&self, fail: bool) {
            *self.fail_saves.lock().unwrap() = fail;
        }

        pub fn set_fail_finds(&self, fail: bool) {
            *self.fail_finds.lock().unwrap() = fail;
        }
    }

    impl Default for MockDeviceStore {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl DeviceStore for MockDeviceStore {
        async fn find_by_id(&self, id: &str) -> Result<Option<Device>> {
            if *self.fail_finds.lock().unwrap() {
                return Err(crate::error::AppError::Store(
                    "injected find failure".to_string(),
                ));
            }
            Ok(self.devices.lock().unwrap().get(id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Device>> {
            if *self.fail_finds.lock().unwrap() {
                return Err(crate::error::AppError::Store(
                    "injected find failure".to_string(),
                ));
            }
            Ok(self.devices.lock().unwrap().values().cloned().collect())
        }

        async fn save(&self, device: &Device) -> Result<Device> {
            if *self.fail_saves.lock().unwrap() {
                return Err(crate::error::AppError::Store(
                    "injected save failure".to_string(),
                ));
            }
            self.devices
                .lock()
                .unwrap()
                .insert(device.id.clone(), device.clone());
            Ok(device.clone())
        }
    }
}
