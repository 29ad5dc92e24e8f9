// Booking Ledger Record

use serde::{Deserialize, Serialize};

/// An open-ended lease of one device by one user.
///
/// Created exactly once per successful book, removed exactly once per
/// successful return. The booking id equals the device id in this design,
/// which is what makes "return by device" and "return by booking" coincide.
/// Invariant: an active booking implies its device is unavailable in the
/// store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub device_id: String,
    /// Booking time in epoch milliseconds (injected via TimeProvider)
    pub booked_at: i64,
    pub booked_by: String,
}

impl Booking {
    pub fn new(device_id: impl Into<String>, booked_at: i64, booked_by: impl Into<String>) -> Self {
        let device_id = device_id.into();
        Self {
            id: device_id.clone(),
            device_id,
            booked_at,
            booked_by: booked_by.into(),
        }
    }
}
