// Phonebooth Infrastructure - In-Memory Adapter
// Implements: DeviceStore

mod device_store;

pub use device_store::InMemoryDeviceStore;
