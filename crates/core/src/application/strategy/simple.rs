// Simple Booking Strategy - unconditional delegation to the ledger

use crate::application::strategy::{validate_input, BookingStrategy};
use crate::application::BookingManager;
use crate::error::Result;
use async_trait::async_trait;

/// Treats every user as equally eligible: book and return succeed iff the
/// ledger operation succeeds. The default policy.
pub struct SimpleBookingStrategy;

#[async_trait]
impl BookingStrategy for SimpleBookingStrategy {
    fn name(&self) -> &str {
        "simple"
    }

    async fn book_device(
        &self,
        manager: &BookingManager,
        device_id: &str,
        user: &str,
    ) -> Result<bool> {
        validate_input(device_id, user)?;
        Ok(manager.book_device(device_id, user).await?.is_some())
    }

    async fn return_device(
        &self,
        manager: &BookingManager,
        device_id: &str,
        user: &str,
    ) -> Result<bool> {
        validate_input(device_id, user)?;
        // Booking id equals device id, so the ledger lookup is direct
        Ok(manager.return_device(device_id, user).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Device, DeviceMetrics};
    use crate::port::device_store::mocks::MockDeviceStore;
    use crate::port::time_provider::mocks::FixedTimeProvider;
    use std::sync::Arc;

    fn manager() -> BookingManager {
        let store = Arc::new(MockDeviceStore::with_devices(vec![Device::new(
            "device-1",
            "iPhone X",
            DeviceMetrics::new(95.0, 3072, 3072, 0.03),
        )]));
        BookingManager::new(store, Arc::new(FixedTimeProvider(42)))
    }

    #[tokio::test]
    async fn book_and_return_round_trip() {
        let manager = manager();
        let strategy = SimpleBookingStrategy;

        assert!(strategy.book_device(&manager, "device-1", "alice").await.unwrap());
        assert!(!strategy.book_device(&manager, "device-1", "bob").await.unwrap());
        assert!(strategy.return_device(&manager, "device-1", "alice").await.unwrap());
        assert!(strategy.book_device(&manager, "device-1", "bob").await.unwrap());
    }

    #[tokio::test]
    async fn empty_user_is_invalid() {
        let manager = manager();
        let strategy = SimpleBookingStrategy;
        assert!(strategy.book_device(&manager, "device-1", "").await.is_err());
    }
}
