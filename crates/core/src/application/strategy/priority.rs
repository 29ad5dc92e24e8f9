// Priority Booking Strategy - rank-gated booking

use crate::application::constants::PRIORITY_THRESHOLD;
use crate::application::strategy::{return_by_booking, validate_input, BookingStrategy};
use crate::application::BookingManager;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

/// Books only for users whose priority rank is below a fixed threshold.
///
/// Lower rank means higher priority; users absent from the map fall back to
/// the lowest possible priority and are rejected with a plain `false`.
/// Queueing rejected users is a future extension, not implemented.
pub struct PriorityBookingStrategy {
    user_priority: HashMap<String, u32>,
}

impl PriorityBookingStrategy {
    pub fn new() -> Self {
        let mut user_priority = HashMap::new();
        user_priority.insert("admin".to_string(), 1);
        user_priority.insert("manager".to_string(), 1);
        user_priority.insert("user".to_string(), 5);
        Self { user_priority }
    }

    fn user_has_priority(&self, user: &str) -> bool {
        let rank = self.user_priority.get(user).copied().unwrap_or(u32::MAX);
        rank < PRIORITY_THRESHOLD
    }
}

impl Default for PriorityBookingStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingStrategy for PriorityBookingStrategy {
    fn name(&self) -> &str {
        "priority"
    }

    async fn book_device(
        &self,
        manager: &BookingManager,
        device_id: &str,
        user: &str,
    ) -> Result<bool> {
        validate_input(device_id, user)?;
        if !self.user_has_priority(user) {
            debug!(user = %user, "User lacks priority for immediate booking");
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
