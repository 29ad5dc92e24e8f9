// Monitoring Subsystem - per-device contexts, checks, and the concurrency engine

pub mod context;
pub mod monitor;
pub mod registry;
pub mod tasks;

pub use context::DeviceContext;
pub use monitor::DeviceMonitor;
pub use registry::MonitorRegistry;
pub use tasks::MonitoringTask;
