// Port Layer - Interfaces for external collaborators

pub mod device_store;
pub mod id_provider;
pub mod time_provider;

// Re-exports
pub use device_store::DeviceStore;
pub use id_provider::DeviceIdProvider;
pub use time_provider::TimeProvider;
