// Monitoring Task Port and Variants

mod battery;
mod memory;

pub use battery::BatteryLevelCheck;
pub use memory::MemoryUsageCheck;

use crate::error::Result;
use crate::monitoring::DeviceContext;
use async_trait::async_trait;
use std::sync::Arc;

/// One independent check performed against a device's current metrics
/// snapshot.
///
/// Checks are stateless with respect to each other and safe to run
/// concurrently against the same immutable context. `perform_check` records a
/// point-in-time reading; `status` reports the last-known reading without
/// touching the device.
#[async_trait]
pub trait MonitoringTask: Send + Sync {
    /// Perform the check against the given context snapshot
    async fn perform_check(&self, context: &DeviceContext) -> Result<()>;

    /// Render the last-known status of this check
    fn status(&self) -> Result<String>;

    /// Stable name of this check, for logs
    fn name(&self) -> &str;
}

/// The fixed two-task set every registry entry is built with.
///
/// Each call constructs fresh task instances: a registry entry owns its own
/// task set, so state is never aliased across monitor replacements.
pub fn standard_tasks() -> Vec<Arc<dyn MonitoringTask>> {
    vec![
        Arc::new(BatteryLevelCheck::new()),
        Arc::new(MemoryUsageCheck::new()),
    ]
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;

    /// Check whose `perform_check` always fails
    pub struct FailingCheck;

    #[async_trait]
    impl MonitoringTask for FailingCheck {
        async fn perform_check(&self, _context: &DeviceContext) -> Result<()> {
            Err(AppError::Internal("injected check failure".to_string()))
        }

        fn status(&self) -> Result<String> {
            Ok("Failing Check: idle".to_string())
        }

        fn name(&self) -> &str {
            "FailingCheck"
        }
    }

    /// Check whose status call fails
    pub struct ErrorStatusCheck;

    #[async_trait]
    impl MonitoringTask for ErrorStatusCheck {
        async fn perform_check(&self, _context: &DeviceContext) -> Result<()> {
            Ok(())
        }

        fn status(&self) -> Result<String> {
            Err(AppError::Internal("injected status failure".to_string()))
        }

        fn name(&self) -> &str {
            "ErrorStatusCheck"
        }
    }

    /// Check whose `perform_check` panics instead of returning an error
    pub struct PanickingCheck;

    #[async_trait]
    impl MonitoringTask for PanickingCheck {
        async fn perform_check(&self, _context: &DeviceContext) -> Result<()> {
            panic!("injected check panic");
        }

        fn status(&self) -> Result<String> {
            Ok("Panicking Check: idle".to_string())
        }

        fn name(&self) -> &str {
            "PanickingCheck"
        }
    }

    /// Check that reports a blank status line
    pub struct BlankStatusCheck;

    #[async_trait]
    impl MonitoringTask for BlankStatusCheck {
        async fn perform_check(&self, _context: &DeviceContext) -> Result<()> {
            Ok(())
        }

        fn status(&self) -> Result<String> {
            Ok("   ".to_string())
        }

        fn name(&self) -> &str {
            "BlankStatusCheck"
        }
    }
}
