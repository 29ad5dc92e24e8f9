// Metrics Simulation Driver - synthetic drain for booked devices

use crate::application::constants::{
    MAX_BATTERY_DRAIN_RATIO, MAX_MEMORY_DRAIN_RATIO, SIMULATION_INTERVAL,
};
use crate::application::{BookingManager, ShutdownToken};
use crate::domain::DeviceMetrics;
use crate::error::Result;
use crate::monitoring::{DeviceContext, MonitorRegistry};
use rand::Rng;
use std::sync::Arc;
use tokio::time::interval;
use tracing::{error, info};

/// Periodically perturbs the metrics of every booked device within bounded
/// random deltas and pushes the new context through the registry.
///
/// No real telemetry is involved; the drain is a synthetic simulation that
/// only ever moves free memory and battery downward, within the stated caps.
pub struct MetricsSimulationService {
    registry: Arc<MonitorRegistry>,
    booking_manager: Arc<BookingManager>,
}

impl MetricsSimulationService {
    pub fn new(registry: Arc<MonitorRegistry>, booking_manager: Arc<BookingManager>) -> Self {
        Self {
            registry,
            booking_manager,
        }
    }

    /// Driver loop; runs until shutdown
    pub async fn run(&self, mut shutdown: ShutdownToken) {
        info!(interval = ?SIMULATION_INTERVAL, "Metrics simulation driver started");
        let mut tick = interval(SIMULATION_INTERVAL);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if let Err(e) = self.simulate_once().await {
                        error!(error = %e, "Metrics simulation tick failed");
                    }
                }
                _ = shutdown.wait() => {
                    info!("Metrics simulation driver stopped");
                    break;
                }
            }
        }
    }

    /// One simulation tick over all registered monitors. Only devices the
    /// ledger reports as booked are perturbed.
    pub async fn simulate_once(&self) -> Result<()> {
        for monitor in self.registry.snapshot().await {
            let context = monitor.context();
            if !self.booking_manager.is_device_booked(&context.device_id).await? {
                continue;
            }

            let new_metrics = perturb_metrics(&context.metrics, &mut rand::thread_rng());
            info!(
                device_id = %context.device_id,
                free_memory_mb = new_metrics.free_memory,
                battery_level = new_metrics.battery_level,
                "Updated metrics for booked device"
            );

            let new_context = DeviceContext::new(context.device_id.clone(), new_metrics);
            self.registry.replace(&context.device_id, new_context).await?;
        }
        Ok(())
    }
}

/// Apply one bounded random perturbation to a metrics snapshot.
///
/// Free memory drops by a uniform amount up to 5% of total memory (at least
/// 1 MB when the cap is non-zero), battery by a uniform amount up to 2% of
/// its current level; both clamp at zero. System load carries over
/// unchanged.
pub fn perturb_metrics(current: &DeviceMetrics, rng: &mut impl Rng) -> DeviceMetrics {
    let max_memory_decrease = (current.total_memory as f64 * MAX_MEMORY_DRAIN_RATIO) as u64;
    let memory_decrease = if max_memory_decrease > 0 {
        rng.gen_range(1..=max_memory_decrease)
    } else {
        0
    };
    let new_free_memory = current.free_memory.saturating_sub(memory_decrease);

    let max_battery_decrease = current.battery_level * MAX_BATTERY_DRAIN_RATIO;
    let battery_decrease = rng.gen::<f64>() * max_battery_decrease;
    let new_battery_level = (current.battery_level - battery_decrease).max(0.0);

    DeviceMetrics::new(
        new_battery_level,
        current.total_memory,
        new_free_memory,
        current.system_load,
    )
}
