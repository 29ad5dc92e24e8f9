// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
///
/// Negative booking outcomes (unknown device, already booked, wrong user)
/// are NOT errors - the ledger returns `Ok(None)` for those.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Device store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Monitoring tasks for device {device_id} failed: {reason}")]
    Monitoring { device_id: String, reason: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// From implementation for infra crates (to avoid circular dependency)
impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Store(err)
    }
}
