// Device Monitor - structured concurrent execution of monitoring tasks

use crate::domain::DeviceMetrics;
use crate::error::{AppError, Result};
use crate::monitoring::tasks::MonitoringTask;
use crate::monitoring::DeviceContext;
use std::sync::{Arc, RwLock};
use tokio::task::JoinSet;
use tracing::{error, warn};

/// Owns one device's current context and its ordered set of monitoring
/// tasks, and runs the tasks concurrently against a context snapshot.
///
/// The context is replaced wholesale behind a lock; tasks only ever see an
/// owned snapshot, so a replacement racing a running check is harmless.
pub struct DeviceMonitor {
    context: RwLock<DeviceContext>,
    tasks: Vec<Arc<dyn MonitoringTask>>,
}

impl DeviceMonitor {
    pub fn new(context: DeviceContext, tasks: Vec<Arc<dyn MonitoringTask>>) -> Self {
        Self {
            context: RwLock::new(context),
            tasks,
        }
    }

    /// Snapshot of the current context
    pub fn context(&self) -> DeviceContext {
        self.context
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    /// Run every monitoring task concurrently against the current context.
    ///
    /// All-or-nothing join: the first task failure aborts the remaining
    /// in-flight tasks, the batch is drained, and a single `Monitoring` error
    /// naming the device is returned. No partial success is ever signaled;
    /// individual causes are logged here, not surfaced.
    pub async fn start_monitoring(&self) -> Result<()> {
        let snapshot = self.context();
        let mut checks: JoinSet<Result<()>> = JoinSet::new();

        for task in &self.tasks {
            let task = Arc::clone(task);
            let context = snapshot.clone();
            checks.spawn(async move { task.perform_check(&context).await });
        }

        while let Some(joined) = checks.join_next().await {
            let failure = match joined {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e.to_string(),
                // Aborted or panicked check
                Err(join_err) => join_err.to_string(),
            };

            checks.abort_all();
            while checks.join_next().await.is_some() {}

            error!(
                device_id = %snapshot.device_id,
                reason = %failure,
                "Monitoring tasks were interrupted or failed"
            );
            return Err(AppError::Monitoring {
                device_id: snapshot.device_id,
                reason: failure,
            });
        }

        Ok(())
    }

    /// Sequentially collect each task's last-known status.
    ///
    /// Never forks. A task whose status call fails is logged and omitted; a
    /// blank status is warned about and omitted rather than emitted as an
    /// empty line. The report always begins with the device-id line.
    pub fn get_status(&self) -> String {
        let context = self.context();
        let mut lines = vec![format!("Device ID: {}", context.device_id)];

        for task in &self.tasks {
            match task.status() {
                Ok(status) if status.trim().is_empty() => {
                    warn!(
                        device_id = %context.device_id,
                        task = task.name(),
                        "Task returned blank status"
                    );
                }
                Ok(status) => lines.push(status),
                Err(e) => {
                    error!(
                        device_id = %context.device_id,
                        task = task.name(),
                        error = %e,
                        "Exception while getting status from task"
                    );
                }
            }
        }

        lines.join("\n")
    }

    /// Replace the owned context with a new instance carrying the same
    /// device id and the given metrics. Does not restart monitoring and does
    /// not notify tasks.
    pub fn update_metrics(&self, new_metrics: DeviceMetrics) {
        let mut context = self.context.write().unwrap_or_else(|p| p.into_inner());
        *context = DeviceContext::new(context.device_id.clone(), new_metrics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeviceMetrics;
    use crate::monitoring::tasks::mocks::{
        BlankStatusCheck, ErrorStatusCheck, FailingCheck, PanickingCheck,
    };
    use crate::monitoring::tasks::{standard_tasks, BatteryLevelCheck, MemoryUsageCheck};

    fn context() -> DeviceContext {
        DeviceContext::new("device-1", DeviceMetrics::new(75.0, 2048, 1536, 0.3))
    }

    #[tokio::test]
    async fn monitoring_runs_all_tasks_and_records_readings() {
        let monitor = DeviceMonitor::new(context(), standard_tasks());
        monitor.start_monitoring().await.unwrap();

        let status = monitor.get_status();
        let lines: Vec<&str> = status.lines().collect();
        assert_eq!(lines[0], "Device ID: device-1");
        assert_eq!(lines[1], "Battery Level: 75.00%");
        assert_eq!(lines[2], "Total Memory: 2048 MB, Free Memory: 1536 MB");
    }

    #[tokio::test]
    async fn one_failing_task_fails_the_whole_batch() {
        let tasks: Vec<Arc<dyn MonitoringTask>> =
            vec![Arc::new(BatteryLevelCheck::new()), Arc::new(FailingCheck)];
        let monitor = DeviceMonitor::new(context(), tasks);

        let err = monitor.start_monitoring().await.unwrap_err();
        match err {
            AppError::Monitoring { device_id, .. } => assert_eq!(device_id, "device-1"),
            other => panic!("expected Monitoring error, got {other}"),
        }

        // The failed run leaves the monitor's context untouched
        assert_eq!(monitor.context().metrics.battery_level, 75.0);
    }

    #[tokio::test]
    async fn panicking_task_surfaces_as_monitoring_error() {
        let tasks: Vec<Arc<dyn MonitoringTask>> =
            vec![Arc::new(BatteryLevelCheck::new()), Arc::new(PanickingCheck)];
        let monitor = DeviceMonitor::new(context(), tasks);

        // A panic inside a check joins as a task error, not a process abort
        let err = monitor.start_monitoring().await.unwrap_err();
        match err {
            AppError::Monitoring { device_id, .. } => assert_eq!(device_id, "device-1"),
            other => panic!("expected Monitoring error, got {other}"),
        }
        assert_eq!(monitor.context().metrics.battery_level, 75.0);
    }

    #[tokio::test]
    async fn status_omits_failing_and_blank_tasks() {
        let tasks: Vec<Arc<dyn MonitoringTask>> = vec![
            Arc::new(ErrorStatusCheck),
            Arc::new(BlankStatusCheck),
            Arc::new(MemoryUsageCheck::new()),
        ];
        let monitor = DeviceMonitor::new(context(), tasks);

        let status = monitor.get_status();
        assert_eq!(status, "Device ID: device-1\nMemory Status: Unknown");
    }

    #[tokio::test]
    async fn update_metrics_replaces_context_without_restart() {
        let monitor = DeviceMonitor::new(context(), standard_tasks());
        monitor.update_metrics(DeviceMetrics::new(40.0, 2048, 512, 0.9));

        let ctx = monitor.context();
        assert_eq!(ctx.device_id, "device-1");
        assert_eq!(ctx.metrics.battery_level, 40.0);
        assert_eq!(ctx.metrics.free_memory, 512);

        // Tasks were not notified: their last-known state is still unset
        assert!(monitor.get_status().contains("Battery Level: Unknown"));
    }
}
