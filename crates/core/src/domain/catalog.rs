// Device Catalog - model name -> default metrics, plus device construction

use crate::domain::{Device, DeviceMetrics};
use crate::port::DeviceIdProvider;
use std::collections::HashMap;
use tracing::{info, warn};

/// Fallback metrics for the generic creation path. Only reachable for a
/// cataloged model missing a metrics entry, never for an unknown model.
pub const DEFAULT_METRICS: DeviceMetrics = DeviceMetrics {
    battery_level: 100.0,
    total_memory: 2048,
    free_memory: 2048,
    system_load: 0.05,
};

/// Static catalog of supported device models with model-specific defaults.
///
/// Built once at startup as a plain map keyed by model name. An unsupported
/// model yields no device and consumes no id.
pub struct DeviceCatalog {
    models: HashMap<&'static str, DeviceMetrics>,
}

impl DeviceCatalog {
    pub fn new() -> Self {
        let mut models = HashMap::new();
        models.insert("Samsung Galaxy S9", DeviceMetrics::new(120.0, 4096, 4096, 0.01));
        models.insert("Samsung Galaxy S8", DeviceMetrics::new(110.0, 4096, 4096, 0.02));
        models.insert("Motorola Nexus 6", DeviceMetrics::new(80.0, 3072, 3072, 0.05));
        models.insert("Oneplus 9", DeviceMetrics::new(130.0, 6144, 6144, 0.01));
        models.insert("Apple iPhone 13", DeviceMetrics::new(140.0, 4096, 4096, 0.01));
        models.insert("Apple iPhone 12", DeviceMetrics::new(130.0, 4096, 4096, 0.01));
        models.insert("Apple iPhone 11", DeviceMetrics::new(120.0, 4096, 4096, 0.02));
        models.insert("iPhone X", DeviceMetrics::new(110.0, 3072, 3072, 0.03));
        models.insert("Nokia 3310", DeviceMetrics::new(50.0, 512, 512, 0.1));
        Self { models }
    }

    /// Whether the catalog knows this model name
    pub fn supports(&self, model: &str) -> bool {
        self.models.contains_key(model)
    }

    /// Supported model names, in no particular order
    pub fn model_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.models.keys().copied()
    }

    /// Create a new device for the given model.
    ///
    /// Returns `None` for an unrecognized model; the id sequence is only
    /// advanced for supported models.
    pub fn create_device(&self, model: &str, ids: &dyn DeviceIdProvider) -> Option<Device> {
        if !self.supports(model) {
            warn!(model = %model, "Model not recognized or supported");
            return None;
        }

        let id = ids.next_id(model);
        let metrics = self.models.get(model).copied().unwrap_or(DEFAULT_METRICS);
        let device = Device::new(id, model, metrics);
        info!(device_id = %device.id, model = %model, "Created new device instance");
        Some(device)
    }
}

impl Default for DeviceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::id_provider::ModelSequenceProvider;

    #[test]
    fn nokia_ids_are_sequential_per_model() {
        let catalog = DeviceCatalog::new();
        let ids = ModelSequenceProvider::new();

        let first = catalog.create_device("Nokia 3310", &ids).unwrap();
        let second = catalog.create_device("Nokia 3310", &ids).unwrap();
        assert_eq!(first.id, "Nokia 3310-1");
        assert_eq!(second.id, "Nokia 3310-2");
        assert_eq!(first.metrics, DeviceMetrics::new(50.0, 512, 512, 0.1));
    }

    #[test]
    fn unknown_model_yields_none_and_consumes_no_id() {
        let catalog = DeviceCatalog::new();
        let ids = ModelSequenceProvider::new();

        assert!(catalog.create_device("Fairphone 4", &ids).is_none());

        // The sequence for other models is untouched by the failed attempt
        let phone = catalog.create_device("Oneplus 9", &ids).unwrap();
        assert_eq!(phone.id, "Oneplus 9-1");
    }

    #[test]
    fn catalog_has_nine_models() {
        let catalog = DeviceCatalog::new();
        assert_eq!(catalog.model_names().count(), 9);
        assert!(catalog.supports("Apple iPhone 13"));
    }

    #[test]
    fn created_device_is_available() {
        let catalog = DeviceCatalog::new();
        let ids = ModelSequenceProvider::new();
        let device = catalog.create_device("iPhone X", &ids).unwrap();
        assert!(device.is_available);
    }
}
