// Device Metrics Value Type

use serde::{Deserialize, Serialize};

/// Point-in-time health readings for a device.
///
/// Immutable value type: any change produces a new instance. This is what
/// makes concurrent reads of a context snapshot safe without locking, so it
/// must never grow in-place mutation.
///
/// Memory figures are in megabytes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceMetrics {
    /// Battery level as a percentage
    pub battery_level: f64,
    /// Total memory in MB
    pub total_memory: u64,
    /// Free memory in MB, never exceeds `total_memory`
    pub free_memory: u64,
    /// System load average in [0, 1]
    pub system_load: f64,
}

impl DeviceMetrics {
    /// Create metrics, clamping `free_memory` into `[0, total_memory]`
    /// and `battery_level` to non-negative.
    pub fn new(battery_level: f64, total_memory: u64, free_memory: u64, system_load: f64) -> Self {
        Self {
            battery_level: battery_level.max(0.0),
            total_memory,
            free_memory: free_memory.min(total_memory),
            system_load,
        }
    }

    /// New instance with a different free-memory reading (clamped)
    pub fn with_free_memory(&self, free_memory: u64) -> Self {
        Self::new(
            self.battery_level,
            self.total_memory,
            free_memory,
            self.system_load,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_memory_clamped_to_total() {
        let metrics = DeviceMetrics::new(80.0, 2048, 4096, 0.05);
        assert_eq!(metrics.free_memory, 2048);
    }

    #[test]
    fn battery_clamped_to_non_negative() {
        let metrics = DeviceMetrics::new(-3.5, 1024, 512, 0.1);
        assert_eq!(metrics.battery_level, 0.0);
        assert_eq!(metrics.free_memory, 512);
    }

    #[test]
    fn with_free_memory_keeps_invariant() {
        let metrics = DeviceMetrics::new(50.0, 512, 512, 0.1);
        let raised = metrics.with_free_memory(612);
        assert_eq!(raised.free_memory, 512);
        assert_eq!(raised.battery_level, 50.0);
    }
}
