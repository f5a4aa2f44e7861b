//! Driver assignment: validate an order, pick the least busy free driver in
//! the order's city and commit the delivery.
//!
//! The pipeline is Validate → Filter → Rank → Persist. Nothing is written
//! until the last step, so any earlier failure leaves the store untouched.

mod distance;
mod eligibility;
mod error;
mod ranker;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use walt_core::{
    City, Customer, Delivery, DeliveryStore, Distance, Driver, DriverDistance, DriverRoster,
    NewDelivery, Restaurant, StoreError,
};

pub use distance::{DistanceEstimator, FixedDistance, RandomDistance};
pub use eligibility::EligibilityFilter;
pub use error::AssignmentError;
pub use ranker::{DriverLoad, LoadRanker};

/// Assigns drivers to orders.
///
/// Holds no state of its own; every call re-reads roster and history.
pub struct Dispatcher {
    eligibility: EligibilityFilter,
    ranker: LoadRanker,
    deliveries: Arc<dyn DeliveryStore>,
    estimator: Arc<dyn DistanceEstimator>,
}

impl Dispatcher {
    /// Create a new Dispatcher over the given collaborators.
    pub fn new(
        roster: Arc<dyn DriverRoster>,
        deliveries: Arc<dyn DeliveryStore>,
        estimator: Arc<dyn DistanceEstimator>,
    ) -> Self {
        Self {
            eligibility: EligibilityFilter::new(roster, deliveries.clone()),
            ranker: LoadRanker::new(deliveries.clone()),
            deliveries,
            estimator,
        }
    }

    /// Assign a driver to a new order, drawing the distance from the
    /// configured estimator.
    pub async fn create_order_and_assign_driver(
        &self,
        customer: &Customer,
        restaurant: &Restaurant,
        delivery_time: DateTime<Utc>,
    ) -> Result<Delivery, AssignmentError> {
        self.create_order_with_distance(customer, restaurant, delivery_time, None)
            .await
    }

    /// Assign a driver to a new order. An explicit `distance` overrides the
    /// estimator.
    pub async fn create_order_with_distance(
        &self,
        customer: &Customer,
        restaurant: &Restaurant,
        delivery_time: DateTime<Utc>,
        distance: Option<Distance>,
    ) -> Result<Delivery, AssignmentError> {
        validate_order_location(customer, restaurant)?;

        let city = &customer.city;
        let candidates = self
            .eligibility
            .find_eligible_drivers(city, delivery_time)
            .await?;
        let ranked = self.ranker.rank_by_load(candidates).await?;

        if ranked.is_empty() {
            info!(city_id = %city.id(), %delivery_time, "No available drivers for order");
            return Err(AssignmentError::NoAvailableDrivers);
        }

        let distance = distance.unwrap_or_else(|| self.estimator.estimate(restaurant, customer));

        // Another request may book the same slot between our read and write.
        // The store rejects the duplicate, and we fall through to the next
        // least busy driver.
        for load in ranked {
            let new_delivery = NewDelivery::new(
                load.driver,
                restaurant.clone(),
                customer.clone(),
                delivery_time,
                distance,
            );

            match self.deliveries.save(new_delivery).await {
                Ok(delivery) => {
                    info!(
                        delivery_id = %delivery.id,
                        driver_id = %delivery.driver.id(),
                        customer_id = %customer.id(),
                        restaurant_id = %restaurant.id(),
                        driver_load = %load.total_distance,
                        distance = %delivery.distance,
                        %delivery_time,
                        "Assigned driver to order"
                    );
                    return Ok(delivery);
                }
                Err(e @ StoreError::Conflict { .. }) => {
                    warn!(error = %e, "Driver booked concurrently, trying next candidate");
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!(city_id = %city.id(), %delivery_time, "Every candidate was booked concurrently");
        Err(AssignmentError::NoAvailableDrivers)
    }

    /// Drivers in `city` free at `delivery_time`.
    pub async fn find_eligible_drivers(
        &self,
        city: &City,
        delivery_time: DateTime<Utc>,
    ) -> Result<Vec<Driver>, StoreError> {
        self.eligibility
            .find_eligible_drivers(city, delivery_time)
            .await
    }

    /// Accumulated distance of one driver.
    pub async fn total_distance(&self, driver: &Driver) -> Result<Distance, StoreError> {
        self.ranker.total_distance(driver).await
    }

    /// All drivers with deliveries, busiest first.
    pub async fn driver_rank_report(&self) -> Result<Vec<DriverDistance>, StoreError> {
        self.deliveries.rank_drivers_by_total_distance().await
    }

    /// Same as [`driver_rank_report`](Self::driver_rank_report), counting only
    /// deliveries to customers in `city`.
    pub async fn driver_rank_report_by_city(
        &self,
        city: &City,
    ) -> Result<Vec<DriverDistance>, StoreError> {
        self.deliveries
            .rank_drivers_by_total_distance_in_city(city)
            .await
    }
}

fn validate_order_location(
    customer: &Customer,
    restaurant: &Restaurant,
) -> Result<(), AssignmentError> {
    if restaurant.same_city_as(customer) {
        return Ok(());
    }

    warn!(
        customer_id = %customer.id(),
        restaurant_id = %restaurant.id(),
        customer_city = %customer.city.id(),
        restaurant_city = %restaurant.city.id(),
        "Rejected order across cities"
    );
    Err(AssignmentError::LocationMismatch {
        customer_city: customer.city.id().clone(),
        restaurant_city: restaurant.city.id().clone(),
    })
}
