use thiserror::Error;

use walt_core::{CityId, StoreError};

/// Reasons an order could not be assigned to a driver.
#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("Order failed: Cannot perform delivery to a different city.")]
    LocationMismatch {
        customer_city: CityId,
        restaurant_city: CityId,
    },

    #[error("Order failed: No available drivers to fulfill delivery.")]
    NoAvailableDrivers,

    #[error(transparent)]
    Store(#[from] StoreError),
}
