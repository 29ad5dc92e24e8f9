// Monitoring Service - registry lifecycle, status reporting, recovery sweep

use crate::application::constants::{
    LOW_MEMORY_FLOOR_MB, MEMORY_RECOVERY_STEP_MB, REFRESH_INTERVAL,
};
use crate::application::events::{DeviceEvent, DeviceEventReceiver};
use crate::application::{BookingManager, ShutdownToken};
use crate::domain::{Booking, Device, DeviceMetrics};
use crate::error::Result;
use crate::monitoring::tasks::standard_tasks;
use crate::monitoring::{DeviceContext, DeviceMonitor, MonitorRegistry};
use serde::Serialize;
use std::sync::Arc;
use tokio::time::interval;
use tracing::{error, info, warn};

/// Fixed payload emitted when the status report cannot be rendered
const STATUS_REPORT_ERROR_PAYLOAD: &str = r#"{"error": "Failed to render status report"}"#;

/// Per-device entry of the aggregate status report
#[derive(Debug, Serialize)]
pub struct DeviceStatusReport {
    pub device_id: String,
    pub status: String,
    pub booking: Option<Booking>,
    pub metrics: DeviceMetrics,
}

/// Owns the monitor registry's lifecycle: the startup sweep, the
/// device-added subscription, the aggregate status report, and the periodic
/// low-memory recovery sweep.
pub struct MonitoringService {
    registry: Arc<MonitorRegistry>,
    store: Arc<dyn crate::port::DeviceStore>,
    booking_manager: Arc<BookingManager>,
}

impl MonitoringService {
    pub fn new(
        registry: Arc<MonitorRegistry>,
        store: Arc<dyn crate::port::DeviceStore>,
        booking_manager: Arc<BookingManager>,
    ) -> Self {
        Self {
            registry,
            store,
            booking_manager,
        }
    }

    pub fn registry(&self) -> Arc<MonitorRegistry> {
        Arc::clone(&self.registry)
    }

    fn context_from_device(device: &Device) -> DeviceContext {
        DeviceContext::new(device.id.clone(), device.metrics)
    }

    /// Register a fresh two-task monitor for every device currently in the
    /// store and run its checks once. Invoked at startup, after the store
    /// has been seeded.
    pub async fn initialize_and_start(&self) -> Result<()> {
        let devices = self.store.find_all().await?;
        info!(device_count = devices.len(), "Starting device monitoring");

        for device in &devices {
            let context = Self::context_from_device(device);
            let monitor = Arc::new(DeviceMonitor::new(context, standard_tasks()));
            self.registry.register(device.id.clone(), Arc::clone(&monitor)).await;

            if let Err(e) = monitor.start_monitoring().await {
                // The monitor stays registered with its initial context
                error!(device_id = %device.id, error = %e, "Initial monitoring run failed");
            }
        }
        Ok(())
    }

    /// Consume device-added events until shutdown: each new device gets a
    /// fresh monitor registered and started.
    pub async fn run_device_added_listener(
        &self,
        mut events: DeviceEventReceiver,
        mut shutdown: ShutdownToken,
    ) {
        loop {
            tokio::select! {
                received = events.recv() => match received {
                    Ok(DeviceEvent::Added(device)) => self.watch_new_device(&device).await,
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped = skipped, "Device event listener lagged; events dropped");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        info!("Device event channel closed");
                        break;
                    }
                },
                _ = shutdown.wait() => {
                    info!("Device event listener shutting down");
                    break;
                }
            }
        }
    }

    async fn watch_new_device(&self, device: &Device) {
        let context = Self::context_from_device(device);
        let monitor = Arc::new(DeviceMonitor::new(context, standard_tasks()));
        self.registry.register(device.id.clone(), Arc::clone(&monitor)).await;
        info!(device_id = %device.id, "Monitoring new device");

        if let Err(e) = monitor.start_monitoring().await {
            error!(device_id = %device.id, error = %e, "Monitoring run for new device failed");
        }
    }

    /// Render the aggregate status of all monitored devices as a JSON array
    /// of `{device_id, status, booking, metrics}` entries.
    ///
    /// Never fails: any error while assembling or serializing the report is
    /// logged and replaced by a fixed error payload.
    pub async fn status_report(&self) -> String {
        match self.build_status_report().await {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "Error while rendering status report");
                STATUS_REPORT_ERROR_PAYLOAD.to_string()
            }
        }
    }

    async fn build_status_report(&self) -> Result<String> {
        let mut reports = Vec::new();

        for monitor in self.registry.snapshot().await {
            let context = monitor.context();
            let booking = self
                .booking_manager
                .find_booking_by_device_id(&context.device_id)
                .await?;

            reports.push(DeviceStatusReport {
                device_id: context.device_id.clone(),
                status: monitor.get_status(),
                booking,
                metrics: context.metrics,
            });
        }

        Ok(serde_json::to_string(&reports)?)
    }

    /// Periodic low-memory recovery sweep. Runs until shutdown.
    pub async fn run_refresh_sweep(&self, mut shutdown: ShutdownToken) {
        info!(interval = ?REFRESH_INTERVAL, "Low-memory recovery sweep started");
        let mut tick = interval(REFRESH_INTERVAL);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if let Err(e) = self.refresh_low_memory().await {
                        error!(error = %e, "Low-memory recovery sweep failed");
                    }
                }
                _ = shutdown.wait() => {
                    info!("Low-memory recovery sweep stopped");
                    break;
                }
            }
        }
    }

    /// Top up free memory by a fixed step for every unavailable store entry
    /// below the floor.
    ///
    /// Keyed off the store's availability flag, not the ledger's booked
    /// predicate used by the simulation driver, so devices made
    /// unavailable outside the ledger still recover.
    pub async fn refresh_low_memory(&self) -> Result<()> {
        for mut device in self.store.find_all().await? {
            if device.is_available || device.metrics.free_memory >= LOW_MEMORY_FLOOR_MB {
                continue;
            }

            let topped_up = device
                .metrics
                .with_free_memory(device.metrics.free_memory + MEMORY_RECOVERY_STEP_MB);
            info!(
                device_id = %device.id,
                free_memory_mb = topped_up.free_memory,
                "Recovering low free memory"
            );
            device.metrics = topped_up;
            self.store.save(&device).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::device_store::mocks::MockDeviceStore;
    use crate::port::time_provider::mocks::FixedTimeProvider;
    use crate::port::DeviceStore;

    fn device(id: &str, free_memory: u64, available: bool) -> Device {
        let mut device = Device::new(id, "Nokia 3310", DeviceMetrics::new(50.0, 512, free_memory, 0.1));
        device.is_available = available;
        device
    }

    fn service_with(
        devices: Vec<Device>,
    ) -> (MonitoringService, Arc<MockDeviceStore>, Arc<BookingManager>) {
        let store = Arc::new(MockDeviceStore::with_devices(devices));
        let manager = Arc::new(BookingManager::new(
            store.clone(),
            Arc::new(FixedTimeProvider(7)),
        ));
        let service = MonitoringService::new(
            Arc::new(MonitorRegistry::new()),
            store.clone(),
            manager.clone(),
        );
        (service, store, manager)
    }

    #[tokio::test]
    async fn startup_sweep_registers_every_store_device() {
        let (service, _, _) = service_with(vec![
            device("device-1", 512, true),
            device("device-2", 512, true),
        ]);

        service.initialize_and_start().await.unwrap();
        assert_eq!(service.registry().len().await, 2);

        let monitor = service.registry().get("device-1").await.unwrap();
        assert!(monitor.get_status().contains("Battery Level: 50.00%"));
    }

    #[tokio::test]
    async fn refresh_tops_up_only_unavailable_low_memory_devices() {
        let (service, store, _) = service_with(vec![
            device("booked-low", 300, false),
            device("booked-high", 500, false),
            device("free-low", 300, true),
        ]);

        service.refresh_low_memory().await.unwrap();

        let booked_low = store.find_by_id("booked-low").await.unwrap().unwrap();
        assert_eq!(booked_low.metrics.free_memory, 400);

        // At the floor: untouched
        let booked_high = store.find_by_id("booked-high").await.unwrap().unwrap();
        assert_eq!(booked_high.metrics.free_memory, 500);

        // Available devices are outside the sweep
        let free_low = store.find_by_id("free-low").await.unwrap().unwrap();
        assert_eq!(free_low.metrics.free_memory, 300);
    }

    #[tokio::test]
    async fn refresh_never_exceeds_total_memory() {
        let (service, store, _) = service_with(vec![device("device-1", 450, false)]);
        service.refresh_low_memory().await.unwrap();

        let refreshed = store.find_by_id("device-1").await.unwrap().unwrap();
        assert_eq!(refreshed.metrics.free_memory, 512);
    }

    #[tokio::test]
    async fn status_report_includes_booking_and_metrics() {
        let (service, _, _) = service_with(vec![device("device-1", 512, true)]);
        service.initialize_and_start().await.unwrap();

        let report = service.status_report().await;
        let parsed: serde_json::Value = serde_json::from_str(&report).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["device_id"], "device-1");
        assert!(entries[0]["booking"].is_null());
        assert_eq!(entries[0]["metrics"]["total_memory"], 512);
        assert!(entries[0]["status"]
            .as_str()
            .unwrap()
            .starts_with("Device ID: device-1"));
    }

    #[tokio::test]
    async fn status_report_degrades_to_error_payload_when_lookup_fails() {
        let (service, store, manager) = service_with(vec![device("device-1", 512, true)]);
        service.initialize_and_start().await.unwrap();
        manager.book_device("device-1", "alice").await.unwrap().unwrap();

        // The booking lookup hits the store; a store fault must never
        // surface as a partial or malformed report
        store.set_fail_finds(true);
        assert_eq!(service.status_report().await, STATUS_REPORT_ERROR_PAYLOAD);

        store.set_fail_finds(false);
        let report = service.status_report().await;
        let parsed: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(parsed.as_array().unwrap()[0]["booking"]["booked_by"], "alice");
    }
}
