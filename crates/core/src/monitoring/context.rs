// Device Context - immutable pairing of device id and current metrics

use crate::domain::DeviceMetrics;
use serde::Serialize;

/// Snapshot of a device's identity plus its current metrics.
///
/// Replaced wholesale on every update; a live context shared across tasks is
/// never mutated. Checks therefore read their snapshot without any locking.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceContext {
    pub device_id: String,
    pub metrics: DeviceMetrics,
}

impl DeviceContext {
    pub fn new(device_id: impl Into<String>, metrics: DeviceMetrics) -> Self {
        Self {
            device_id: device_id.into(),
            metrics,
        }
    }
}
