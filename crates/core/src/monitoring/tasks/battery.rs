// Battery Level Check

use crate::error::Result;
use crate::monitoring::tasks::MonitoringTask;
use crate::monitoring::DeviceContext;
use async_trait::async_trait;
use std::sync::Mutex;
use tracing::info;

/// Records a device's battery level from the context snapshot.
pub struct BatteryLevelCheck {
    last_known_level: Mutex<Option<f64>>,
}

impl BatteryLevelCheck {
    pub fn new() -> Self {
        Self {
            last_known_level: Mutex::new(None),
        }
    }
}

impl Default for BatteryLevelCheck {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MonitoringTask for BatteryLevelCheck {
    async fn perform_check(&self, context: &DeviceContext) -> Result<()> {
        let level = context.metrics.battery_level;
        *self
            .last_known_level
            .lock()
            .unwrap_or_else(|p| p.into_inner()) = Some(level);
        info!(
            device_id = %context.device_id,
            battery_level = level,
            "Checking battery level"
        );
        Ok(())
    }

    fn status(&self) -> Result<String> {
        let last = *self
            .last_known_level
            .lock()
            .unwrap_or_else(|p| p.into_inner());
        Ok(match last {
            Some(level) => format!("Battery Level: {:.2}%", level),
            None => "Battery Level: Unknown".to_string(),
        })
    }

    fn name(&self) -> &str {
        "BatteryLevelCheck"
    }
}
