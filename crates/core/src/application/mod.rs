// Application Layer - Use Cases and Services

pub mod booking;
pub mod constants;
pub mod devices;
pub mod events;
pub mod monitoring_service;
pub mod shutdown;
pub mod simulation;
pub mod strategy;

// Re-exports
pub use booking::BookingManager;
pub use devices::DeviceService;
pub use events::{device_event_channel, DeviceEvent};
pub use monitoring_service::MonitoringService;
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};
pub use simulation::MetricsSimulationService;
pub use strategy::{BookingStrategy, StrategyRegistry};
