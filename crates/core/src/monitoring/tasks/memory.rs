// Memory Usage Check

use crate::error::Result;
use crate::monitoring::tasks::MonitoringTask;
use crate::monitoring::DeviceContext;
use async_trait::async_trait;
use std::sync::Mutex;
use tracing::info;

/// Records a device's total and free memory from the context snapshot.
pub struct MemoryUsageCheck {
    /// (total, free) in MB from the last check
    last_known: Mutex<Option<(u64, u64)>>,
}

impl MemoryUsageCheck {
    pub fn new() -> Self {
        Self {
            last_known: Mutex::new(None),
        }
    }
}

impl Default for MemoryUsageCheck {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MonitoringTask for MemoryUsageCheck {
    async fn perform_check(&self, context: &DeviceContext) -> Result<()> {
        let total = context.metrics.total_memory;
        let free = context.metrics.free_memory;
        *self.last_known.lock().unwrap_or_else(|p| p.into_inner()) = Some((total, free));
        info!(
            device_id = %context.device_id,
            total_memory_mb = total,
            free_memory_mb = free,
            "Checking memory usage"
        );
        Ok(())
    }

    fn status(&self) -> Result<String> {
        let last = *self.last_known.lock().unwrap_or_else(|p| p.into_inner());
        Ok(match last {
            Some((total, free)) => {
                format!("Total Memory: {} MB, Free Memory: {} MB", total, free)
            }
            None => "Memory Status: Unknown".to_string(),
        })
    }

    fn name(&self) -> &str {
        "MemoryUsageCheck"
    }
}
