// Monitor Registry - keyed collection of device monitors

use crate::error::Result;
use crate::monitoring::tasks::standard_tasks;
use crate::monitoring::{DeviceContext, DeviceMonitor};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Thread-safe map from device id to the device's current monitor.
///
/// Single point of truth for "current monitor per device": writers replace
/// whole entries, readers see either the old or the new monitor, never a
/// torn mix. Consistency with the device store is eventual, bounded by one
/// refresh cycle.
pub struct MonitorRegistry {
    monitors: RwLock<HashMap<String, Arc<DeviceMonitor>>>,
}

impl MonitorRegistry {
    pub fn new() -> Self {
        Self {
            monitors: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or overwrite the monitor for a device. Task lists are never
    /// merged; the new monitor's set wins.
    pub async fn register(&self, device_id: impl Into<String>, monitor: Arc<DeviceMonitor>) {
        self.monitors.write().await.insert(device_id.into(), monitor);
    }

    /// Current monitor for a device, if one is registered
    pub async fn get(&self, device_id: &str) -> Option<Arc<DeviceMonitor>> {
        self.monitors.read().await.get(device_id).cloned()
    }

    /// Snapshot of all registered monitors
    pub async fn snapshot(&self) -> Vec<Arc<DeviceMonitor>> {
        self.monitors.read().await.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.monitors.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.monitors.read().await.is_empty()
    }

    /// Build a fresh monitor with the fixed two-task set around the new
    /// context, atomically swap it in for the device, then restart
    /// monitoring for that device.
    ///
    /// Only the affected device is restarted; other registered monitors
    /// keep running undisturbed.
    pub async fn replace(&self, device_id: &str, new_context: DeviceContext) -> Result<()> {
        let monitor = Arc::new(DeviceMonitor::new(new_context, standard_tasks()));
        self.monitors
            .write()
            .await
            .insert(device_id.to_string(), Arc::clone(&monitor));
        info!(device_id = %device_id, "Replaced device monitor with new context");

        // Restart outside the write lock; a failed run leaves the new
        // monitor registered with the context it was built with.
        monitor.start_monitoring().await
    }
}

impl Default for MonitorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
