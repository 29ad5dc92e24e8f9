//! Phonebooth - Main Entry Point
//!
//! Composition root: wires the device store, booking ledger, monitoring
//! registry, and the periodic drivers, then runs until SIGINT.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use phonebooth_core::application::strategy::StrategyRegistry;
use phonebooth_core::application::{
    device_event_channel, shutdown_channel, BookingManager, DeviceService,
    MetricsSimulationService, MonitoringService,
};
use phonebooth_core::domain::DeviceCatalog;
use phonebooth_core::monitoring::MonitorRegistry;
use phonebooth_core::port::id_provider::ModelSequenceProvider;
use phonebooth_core::port::time_provider::SystemTimeProvider;
use phonebooth_infra_memory::InMemoryDeviceStore;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Models seeded into the pool at startup, one device each
const SEED_MODELS: [&str; 3] = ["Nokia 3310", "Apple iPhone 13", "Samsung Galaxy S9"];

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    let log_format = std::env::var("PHONEBOOTH_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("phonebooth=info"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            // Development: pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("Phonebooth v{} starting...", VERSION);

    // 2. Setup dependencies (DI wiring)
    let store = Arc::new(InMemoryDeviceStore::new());
    let time_provider = Arc::new(SystemTimeProvider);
    let id_provider = Arc::new(ModelSequenceProvider::new());
    let (events_tx, events_rx) = device_event_channel();

    let booking_manager = Arc::new(BookingManager::new(store.clone(), time_provider));
    let device_service = Arc::new(DeviceService::new(
        store.clone(),
        DeviceCatalog::new(),
        id_provider,
        events_tx,
    ));

    let registry = Arc::new(MonitorRegistry::new());
    let monitoring = Arc::new(MonitoringService::new(
        registry.clone(),
        store.clone(),
        booking_manager.clone(),
    ));

    let strategies = StrategyRegistry::with_defaults();
    info!(strategies = ?strategies.names(), "Booking strategies available");

    // 3. Seed the device pool from the catalog
    for model in SEED_MODELS {
        if device_service.create_device(model).await?.is_none() {
            tracing::warn!(model = %model, "Seed model missing from catalog");
        }
    }

    // 4. Register and start monitors for the seeded pool
    monitoring.initialize_and_start().await?;

    // 5. Spawn the background drivers
    let (shutdown_tx, shutdown_rx) = shutdown_channel();

    let simulation = MetricsSimulationService::new(registry.clone(), booking_manager.clone());
    let simulation_handle = {
        let token = shutdown_rx.clone();
        tokio::spawn(async move { simulation.run(token).await })
    };

    let sweep_handle = {
        let monitoring = monitoring.clone();
        let token = shutdown_rx.clone();
        tokio::spawn(async move { monitoring.run_refresh_sweep(token).await })
    };

    let listener_handle = {
        let monitoring = monitoring.clone();
        let token = shutdown_rx.clone();
        tokio::spawn(async move { monitoring.run_device_added_listener(events_rx, token).await })
    };

    info!("Phonebooth running; press Ctrl-C to stop");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    shutdown_tx.shutdown();

    let _ = tokio::join!(simulation_handle, sweep_handle, listener_handle);

    info!(report = %monitoring.status_report().await, "Final device status");
    info!("Phonebooth stopped");
    Ok(())
}
