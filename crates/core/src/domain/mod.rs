// Domain Layer - Entities and Value Types

pub mod booking;
pub mod catalog;
pub mod device;
pub mod metrics;

pub use booking::Booking;
pub use catalog::{DeviceCatalog, DEFAULT_METRICS};
pub use device::Device;
pub use metrics::DeviceMetrics;
