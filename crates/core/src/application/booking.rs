// Booking Manager - the ledger of active device leases

use crate::domain::Booking;
use crate::error::Result;
use crate::port::{DeviceStore, TimeProvider};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Owns the list of active bookings and coordinates with the device store to
/// flip availability flags transactionally per operation.
///
/// One coarse ledger mutex is held across each book/return invocation so the
/// list edit, the availability flip, and the store save happen as a unit.
/// That is what upholds "at most one active booking per device" under
/// concurrent callers.
pub struct BookingManager {
    store: Arc<dyn DeviceStore>,
    time_provider: Arc<dyn TimeProvider>,
    bookings: Mutex<Vec<Booking>>,
}

impl BookingManager {
    pub fn new(store: Arc<dyn DeviceStore>, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            store,
            time_provider,
            bookings: Mutex::new(Vec::new()),
        }
    }

    /// Attempt to book a device for a user.
    ///
    /// Returns `Ok(None)` when the device is unknown or already booked -
    /// both are normal negative outcomes, not faults. On success the device
    /// is marked unavailable, persisted, and the new booking appended to the
    /// ledger.
    pub async fn book_device(&self, device_id: &str, user: &str) -> Result<Option<Booking>> {
        let mut bookings = self.bookings.lock().await;

        let Some(mut device) = self.store.find_by_id(device_id).await? else {
            return Ok(None);
        };
        if !device.is_available {
            return Ok(None);
        }

        device.is_available = false;
        let booking = Booking::new(device_id, self.time_provider.now_millis(), user);
        bookings.push(booking.clone());

        // Keep ledger and store consistent: undo the append if the save fails
        if let Err(e) = self.store.save(&device).await {
            bookings.pop();
            return Err(e);
        }

        info!(device_id = %device_id, user = %user, "Device booked");
        Ok(Some(booking))
    }

    /// Attempt to return a booked device.
    ///
    /// Returns `Ok(None)` when no booking with that id exists or the booking
    /// was made by a different user; state is left unchanged. On success the
    /// device is marked available, persisted, and the booking removed.
    pub async fn return_device(&self, booking_id: &str, user: &str) -> Result<Option<Booking>> {
        let mut bookings = self.bookings.lock().await;

        let Some(pos) = bookings.iter().position(|b| b.id == booking_id) else {
            return Ok(None);
        };
        if bookings[pos].booked_by != user {
            return Ok(None);
        }

        let device_id = bookings[pos].device_id.clone();
        let Some(mut device) = self.store.find_by_id(&device_id).await? else {
            // Booking without a store entry: the device was removed behind
            // our back; treat the return as a negative outcome
            warn!(booking_id = %booking_id, device_id = %device_id, "Booked device missing from store");
            return Ok(None);
        };

        device.is_available = true;
        // Save first so a store failure leaves the booking in place
        self.store.save(&device).await?;
        let booking = bookings.remove(pos);

        info!(device_id = %device_id, user = %user, "Device returned");
        Ok(Some(booking))
    }

    /// First active booking, by insertion order, whose device id matches and
    /// whose store entry is currently unavailable.
    ///
    /// The double condition is redundant under the ledger invariant but both
    /// halves are checked, matching the canonical "is this device actively
    /// booked" lookup.
    pub async fn find_booking_by_device_id(&self, device_id: &str) -> Result<Option<Booking>> {
        let bookings = self.bookings.lock().await;
        for booking in bookings.iter() {
            if booking.device_id != device_id {
                continue;
            }
            if let Some(device) = self.store.find_by_id(device_id).await? {
                if !device.is_available {
                    return Ok(Some(booking.clone()));
                }
            }
        }
        Ok(None)
    }

    /// Boolean form of [`find_booking_by_device_id`](Self::find_booking_by_device_id)
    pub async fn is_device_booked(&self, device_id: &str) -> Result<bool> {
        Ok(self.find_booking_by_device_id(device_id).await?.is_some())
    }

    /// Snapshot of the active bookings, in insertion order
    pub async fn active_bookings(&self) -> Vec<Booking> {
        self.bookings.lock().await.clone()
    }
}
