//! Which drivers in a city are free at a given moment.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use walt_core::{City, DeliveryStore, Driver, DriverRoster, StoreError};

/// Filters a city's roster down to drivers without a delivery at the
/// requested time.
pub struct EligibilityFilter {
    roster: Arc<dyn DriverRoster>,
    deliveries: Arc<dyn DeliveryStore>,
}

impl EligibilityFilter {
    pub fn new(roster: Arc<dyn DriverRoster>, deliveries: Arc<dyn DeliveryStore>) -> Self {
        Self { roster, deliveries }
    }

    /// Drivers registered in `city` with no delivery at exactly
    /// `delivery_time`, in roster order.
    ///
    /// The check is point-in-time equality, not an overlap window. A single
    /// matching delivery is enough to exclude the driver.
    pub async fn find_eligible_drivers(
        &self,
        city: &City,
        delivery_time: DateTime<Utc>,
    ) -> Result<Vec<Driver>, StoreError> {
        let mut eligible = Vec::new();

        for driver in self.roster.drivers_in_city(city).await? {
            let history = self.deliveries.deliveries_for_driver(&driver).await?;

            if history.iter().any(|d| d.delivery_time == delivery_time) {
                debug!(driver_id = %driver.id(), %delivery_time, "Driver busy at requested time");
                continue;
            }

            eligible.push(driver);
        }

        Ok(eligible)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use walt_core::{Customer, Distance, NewDelivery, Restaurant};

    use super::*;
    use crate::store::MemoryStore;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    async fn book(store: &MemoryStore, driver: &Driver, time: DateTime<Utc>) {
        let customer = Customer::new("Bach", driver.city.clone());
        let restaurant = Restaurant::new("vegan", driver.city.clone());
        store.add_customer(customer.clone()).await.unwrap();
        store.add_restaurant(restaurant.clone()).await.unwrap();
        store
            .save(NewDelivery::new(
                driver.clone(),
                restaurant,
                customer,
                time,
                Distance::new(3.0).unwrap(),
            ))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_busy_driver_excluded_only_at_exact_time() {
        let store = Arc::new(MemoryStore::new());
        let city = store.add_city(City::new("Tel-Aviv")).await.unwrap();
        let busy = store.add_driver(Driver::new("Mary", city.clone())).await.unwrap();
        let free = store.add_driver(Driver::new("Patricia", city.clone())).await.unwrap();
        book(&store, &busy, at(12)).await;

        let filter = EligibilityFilter::new(store.clone(), store.clone());

        let at_noon = filter.find_eligible_drivers(&city, at(12)).await.unwrap();
        assert_eq!(at_noon, vec![free.clone()]);

        let one_minute_later = at(12) + Duration::minutes(1);
        let later = filter
            .find_eligible_drivers(&city, one_minute_later)
            .await
            .unwrap();
        assert_eq!(later, vec![busy, free]);
    }

    #[tokio::test]
    async fn test_drivers_from_other_cities_are_ignored() {
        let store = Arc::new(MemoryStore::new());
        let tlv = store.add_city(City::new("Tel-Aviv")).await.unwrap();
        let haifa = store.add_city(City::new("Haifa")).await.unwrap();
        store.add_driver(Driver::new("Robert", haifa)).await.unwrap();

        let filter = EligibilityFilter::new(store.clone(), store.clone());
        let eligible = filter.find_eligible_drivers(&tlv, at(9)).await.unwrap();

        assert!(eligible.is_empty());
    }

    #[tokio::test]
    async fn test_driver_with_several_conflicts_stays_excluded() {
        let store = Arc::new(MemoryStore::new());
        let city = store.add_city(City::new("Jerusalem")).await.unwrap();
        let driver = store.add_driver(Driver::new("David", city.clone())).await.unwrap();
        // Two imported rows at the same instant; the store normally rejects this.
        store.import_delivery_unchecked(&driver, at(18), 1.0).await;
        store.import_delivery_unchecked(&driver, at(18), 2.0).await;

        let filter = EligibilityFilter::new(store.clone(), store.clone());
        let eligible = filter.find_eligible_drivers(&city, at(18)).await.unwrap();

        assert!(eligible.is_empty());
    }
}
