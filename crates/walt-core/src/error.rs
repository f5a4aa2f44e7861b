//! Core domain errors.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::DriverId;

/// Core domain errors for Walt.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Distance is negative, NaN or infinite.
    #[error("Invalid distance: {0}")]
    InvalidDistance(f64),
}

/// Errors raised by storage collaborators.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The driver already has a delivery at this exact time.
    #[error("Driver {driver_id} already has a delivery at {delivery_time}")]
    Conflict {
        driver_id: DriverId,
        delivery_time: DateTime<Utc>,
    },

    /// A referenced record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// A record with this id already exists.
    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: &'static str, id: String },

    /// Backend is unreachable or failed mid-operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
