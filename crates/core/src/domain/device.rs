// Device Entity (external store representation)

use crate::domain::DeviceMetrics;
use serde::{Deserialize, Serialize};

/// A leasable device as held by the external device store.
///
/// The booking ledger flips `is_available`; the metrics-refresh path replaces
/// `metrics`. Devices are created by the catalog and only removed by external
/// administration, so there is no terminal state here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub model: String,
    pub is_available: bool,
    pub metrics: DeviceMetrics,
}

impl Device {
    pub fn new(id: impl Into<String>, model: impl Into<String>, metrics: DeviceMetrics) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            is_available: true,
            metrics,
        }
    }
}
