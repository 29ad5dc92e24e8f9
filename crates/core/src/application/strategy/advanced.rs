// Advanced Booking Strategy - eligibility-gated booking

use crate::application::strategy::{return_by_booking, validate_input, BookingStrategy};
use crate::application::BookingManager;
use crate::error::Result;
use async_trait::async_trait;

/// Books only for users passing an eligibility predicate.
///
/// The predicate is the extension point for richer rules (booking history,
/// loyalty status, policy compliance); today every user passes it.
pub struct AdvancedBookingStrategy;

impl AdvancedBookingStrategy {
    fn is_user_eligible(&self, _user: &str) -> bool {
        true
    }
}

#[async_trait]
impl BookingStrategy for AdvancedBookingStrategy {
    fn name(&self) -> &str {
        "advanced"
    }

    async fn book_device(
        &self,
        manager: &BookingManager,
        device_id: &str,
        user: &str,
    ) -> Result<bool> {
        validate_input(device_id, user)?;
        if !self.is_user_eligible(user) {
            return Ok(false);
        }
        Ok(manager.book_device(device_id, user).await?.is_some())
    }

    async fn return_device(
        &self,
        manager: &BookingManager,
        device_id: &str,
        user: &str,
    ) -> Result<bool> {
        validate_input(device_id, user)?;
        return_by_booking(manager, device_id, user).await
    }
}
