// Allocation Policies - pluggable booking strategies

mod advanced;
mod priority;
mod simple;

pub use advanced::AdvancedBookingStrategy;
pub use priority::PriorityBookingStrategy;
pub use simple::SimpleBookingStrategy;

use crate::application::BookingManager;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Pluggable rule set deciding whether a book/return request succeeds.
///
/// Strategies express policy only; the ledger owns the state transitions. A
/// request rejected by policy yields `Ok(false)`, never an error.
#[async_trait]
pub trait BookingStrategy: Send + Sync {
    /// Stable name this strategy is selected by
    fn name(&self) -> &str;

    /// Attempt to book a device for a user under this policy
    async fn book_device(
        &self,
        manager: &BookingManager,
        device_id: &str,
        user: &str,
    ) -> Result<bool>;

    /// Attempt to return a device for a user under this policy
    async fn return_device(
        &self,
        manager: &BookingManager,
        device_id: &str,
        user: &str,
    ) -> Result<bool>;
}

/// Common precondition check shared by every strategy.
///
/// A blank device id or user is a malformed request.
pub fn validate_input(device_id: &str, user: &str) -> Result<()> {
    if device_id.trim().is_empty() || user.trim().is_empty() {
        return Err(AppError::Validation(
            "device id and user must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Shared return path for the gated strategies: resolve the active booking
/// for the device, confirm the booker matches, then return by booking id.
/// Any mismatch yields `false`.
pub(crate) async fn return_by_booking(
    manager: &BookingManager,
    device_id: &str,
    user: &str,
) -> Result<bool> {
    match manager.find_booking_by_device_id(device_id).await? {
        Some(booking) if booking.booked_by == user => {
            Ok(manager.return_device(&booking.id, user).await?.is_some())
        }
        _ => Ok(false),
    }
}

/// Fixed, named set of selectable strategies.
pub struct StrategyRegistry {
    strategies: HashMap<String, Arc<dyn BookingStrategy>>,
}

impl StrategyRegistry {
    /// Registry holding the full strategy set: simple, advanced, priority
    pub fn with_defaults() -> Self {
        let mut registry = Self {
            strategies: HashMap::new(),
        };
        registry.insert(Arc::new(SimpleBookingStrategy));
        registry.insert(Arc::new(AdvancedBookingStrategy));
        registry.insert(Arc::new(PriorityBookingStrategy::new()));
        registry
    }

    fn insert(&mut self, strategy: Arc<dyn BookingStrategy>) {
        self.strategies.insert(strategy.name().to_string(), strategy);
    }

    /// Select a strategy by name; an unknown name is a NotFound condition,
    /// not a crash.
    pub fn select(&self, name: &str) -> Result<Arc<dyn BookingStrategy>> {
        self.strategies
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("unknown booking strategy: {name}")))
    }

    pub fn names(&self) -> Vec<&str> {
        self.strategies.keys().map(String::as_str).collect()
    }
}
