//! Storage contracts consumed by the assignment pipeline.
//!
//! Implementations own the records; callers never cache what they read and
//! re-query on every request.

use async_trait::async_trait;

use crate::{City, Delivery, Driver, DriverDistance, NewDelivery, StoreError};

/// Lookup of drivers registered per city.
#[async_trait]
pub trait DriverRoster: Send + Sync {
    /// All drivers registered in `city`, in a stable order.
    async fn drivers_in_city(&self, city: &City) -> Result<Vec<Driver>, StoreError>;
}

/// Delivery history and the write side of an assignment.
#[async_trait]
pub trait DeliveryStore: Send + Sync {
    /// Every delivery ever assigned to `driver`.
    async fn deliveries_for_driver(&self, driver: &Driver) -> Result<Vec<Delivery>, StoreError>;

    /// Persist a delivery and assign its identity.
    ///
    /// Must fail with [`StoreError::Conflict`] if the driver already has a
    /// delivery at the same `delivery_time`.
    async fn save(&self, delivery: NewDelivery) -> Result<Delivery, StoreError>;

    /// Summed distance per driver, highest first.
    async fn rank_drivers_by_total_distance(&self) -> Result<Vec<DriverDistance>, StoreError>;

    /// Summed distance per driver over deliveries whose customer lives in
    /// `city`, highest first.
    async fn rank_drivers_by_total_distance_in_city(
        &self,
        city: &City,
    ) -> Result<Vec<DriverDistance>, StoreError>;
}
