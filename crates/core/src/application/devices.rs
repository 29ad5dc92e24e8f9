// Device Service - creation of pool devices

use crate::application::events::{DeviceEvent, DeviceEventSender};
use crate::domain::{Device, DeviceCatalog};
use crate::error::Result;
use crate::port::{DeviceIdProvider, DeviceStore};
use std::sync::Arc;
use tracing::info;

/// Creates devices from the catalog, persists them, and announces them on
/// the device-event channel.
pub struct DeviceService {
    store: Arc<dyn DeviceStore>,
    catalog: DeviceCatalog,
    id_provider: Arc<dyn DeviceIdProvider>,
    events: DeviceEventSender,
}

impl DeviceService {
    pub fn new(
        store: Arc<dyn DeviceStore>,
        catalog: DeviceCatalog,
        id_provider: Arc<dyn DeviceIdProvider>,
        events: DeviceEventSender,
    ) -> Self {
        Self {
            store,
            catalog,
            id_provider,
            events,
        }
    }

    /// Create a device of the given model.
    ///
    /// Returns `Ok(None)` for an unrecognized model. On success the device
    /// is stored as available and a `DeviceEvent::Added` is published so the
    /// monitoring service can pick it up.
    pub async fn create_device(&self, model: &str) -> Result<Option<Device>> {
        let Some(device) = self.catalog.create_device(model, self.id_provider.as_ref()) else {
            return Ok(None);
        };

        let saved = self.store.save(&device).await?;
        // No subscribers is fine, e.g. before monitoring is wired up
        let _ = self.events.send(DeviceEvent::Added(saved.clone()));

        info!(device_id = %saved.id, model = %model, "Device added to the pool");
        Ok(Some(saved))
    }

    /// Supported model names from the catalog
    pub fn supported_models(&self) -> Vec<&'static str> {
        self.catalog.model_names().collect()
    }
}
