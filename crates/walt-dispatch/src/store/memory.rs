//! In-memory store backing both the reference data and delivery history.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use walt_core::{
    City, CityId, Customer, CustomerId, Delivery, DeliveryId, DeliveryStore, Distance, Driver,
    DriverDistance, DriverId, DriverRoster, NewDelivery, Restaurant, RestaurantId, StoreError,
};

/// Delivery rows plus a unique index on (driver, delivery_time).
#[derive(Default)]
struct DeliveryTable {
    rows: Vec<Delivery>,
    booked: HashSet<(DriverId, DateTime<Utc>)>,
}

impl DeliveryTable {
    fn insert(&mut self, delivery: Delivery) {
        self.booked
            .insert((delivery.driver.id().clone(), delivery.delivery_time));
        self.rows.push(delivery);
    }
}

/// Process-local store. Drivers are kept in registration order, which is the
/// order the roster hands them to the assignment pipeline.
#[derive(Default)]
pub struct MemoryStore {
    cities: RwLock<HashMap<CityId, City>>,
    drivers: RwLock<Vec<Driver>>,
    customers: RwLock<HashMap<CustomerId, Customer>>,
    restaurants: RwLock<HashMap<RestaurantId, Restaurant>>,
    deliveries: RwLock<DeliveryTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a city. Drivers, customers and restaurants hold copies of
    /// their city, so an existing id is never replaced.
    pub async fn add_city(&self, city: City) -> Result<City, StoreError> {
        let mut cities = self.cities.write().await;
        if cities.contains_key(city.id()) {
            return Err(already_exists("City", city.id()));
        }
        debug!(city_id = %city.id(), name = %city.name(), "Registering city");
        cities.insert(city.id().clone(), city.clone());
        Ok(city)
    }

    pub async fn get_city(&self, id: &CityId) -> Result<City, StoreError> {
        self.cities
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("City", id))
    }

    /// All cities, sorted by name.
    pub async fn list_cities(&self) -> Vec<City> {
        let mut cities: Vec<City> = self.cities.read().await.values().cloned().collect();
        cities.sort_by(|a, b| a.name().cmp(b.name()));
        cities
    }

    /// Register a driver. The driver's city must already exist.
    pub async fn add_driver(&self, driver: Driver) -> Result<Driver, StoreError> {
        self.ensure_city(&driver.city).await?;

        let mut drivers = self.drivers.write().await;
        if drivers.iter().any(|d| d.id() == driver.id()) {
            return Err(already_exists("Driver", driver.id()));
        }
        debug!(driver_id = %driver.id(), city_id = %driver.city.id(), "Registering driver");
        drivers.push(driver.clone());
        Ok(driver)
    }

    pub async fn get_driver(&self, id: &DriverId) -> Result<Driver, StoreError> {
        self.drivers
            .read()
            .await
            .iter()
            .find(|d| d.id() == id)
            .cloned()
            .ok_or_else(|| not_found("Driver", id))
    }

    /// All drivers in registration order.
    pub async fn list_drivers(&self) -> Vec<Driver> {
        self.drivers.read().await.clone()
    }

    /// Register a customer. The customer's city must already exist.
    pub async fn add_customer(&self, customer: Customer) -> Result<Customer, StoreError> {
        self.ensure_city(&customer.city).await?;

        let mut customers = self.customers.write().await;
        if customers.contains_key(customer.id()) {
            return Err(already_exists("Customer", customer.id()));
        }
        debug!(customer_id = %customer.id(), "Registering customer");
        customers.insert(customer.id().clone(), customer.clone());
        Ok(customer)
    }

    pub async fn get_customer(&self, id: &CustomerId) -> Result<Customer, StoreError> {
        self.customers
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("Customer", id))
    }

    pub async fn list_customers(&self) -> Vec<Customer> {
        let mut customers: Vec<Customer> =
            self.customers.read().await.values().cloned().collect();
        customers.sort_by(|a, b| a.name().cmp(b.name()));
        customers
    }

    /// Register a restaurant. The restaurant's city must already exist.
    pub async fn add_restaurant(&self, restaurant: Restaurant) -> Result<Restaurant, StoreError> {
        self.ensure_city(&restaurant.city).await?;

        let mut restaurants = self.restaurants.write().await;
        if restaurants.contains_key(restaurant.id()) {
            return Err(already_exists("Restaurant", restaurant.id()));
        }
        debug!(restaurant_id = %restaurant.id(), "Registering restaurant");
        restaurants.insert(restaurant.id().clone(), restaurant.clone());
        Ok(restaurant)
    }

    pub async fn get_restaurant(&self, id: &RestaurantId) -> Result<Restaurant, StoreError> {
        self.restaurants
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("Restaurant", id))
    }

    pub async fn list_restaurants(&self) -> Vec<Restaurant> {
        let mut restaurants: Vec<Restaurant> =
            self.restaurants.read().await.values().cloned().collect();
        restaurants.sort_by(|a, b| a.name().cmp(b.name()));
        restaurants
    }

    /// Number of committed deliveries.
    pub async fn delivery_count(&self) -> usize {
        self.deliveries.read().await.rows.len()
    }

    /// Number of drivers registered per city id.
    pub async fn driver_count_by_city(&self) -> HashMap<CityId, usize> {
        let mut counts = HashMap::new();
        for driver in self.drivers.read().await.iter() {
            *counts.entry(driver.city.id().clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Insert a delivery row bypassing the unique index, for seeding history.
    #[cfg(test)]
    pub(crate) async fn import_delivery_unchecked(
        &self,
        driver: &Driver,
        delivery_time: DateTime<Utc>,
        distance: f64,
    ) {
        let customer = Customer::new("imported", driver.city.clone());
        let restaurant = Restaurant::new("imported", driver.city.clone());
        let delivery = NewDelivery::new(
            driver.clone(),
            restaurant,
            customer,
            delivery_time,
            Distance::new(distance).unwrap(),
        )
        .into_delivery(DeliveryId::generate());
        self.deliveries.write().await.insert(delivery);
    }

    async fn ensure_city(&self, city: &City) -> Result<(), StoreError> {
        if self.cities.read().await.contains_key(city.id()) {
            Ok(())
        } else {
            Err(not_found("City", city.id()))
        }
    }

    async fn rank(&self, city: Option<&City>) -> Vec<DriverDistance> {
        let table = self.deliveries.read().await;

        // Rows are grouped in order of each driver's first delivery so that
        // equal totals come out in a deterministic order.
        let mut index: HashMap<&DriverId, usize> = HashMap::new();
        let mut rows: Vec<DriverDistance> = Vec::new();

        let matching = table
            .rows
            .iter()
            .filter(|d| city.map_or(true, |c| d.customer.city.id() == c.id()));

        for delivery in matching {
            let slot = *index.entry(delivery.driver.id()).or_insert_with(|| {
                rows.push(DriverDistance {
                    driver: delivery.driver.clone(),
                    total_distance: Distance::ZERO,
                });
                rows.len() - 1
            });
            rows[slot].total_distance += delivery.distance;
        }

        rows.sort_by(|a, b| b.total_distance.cmp(&a.total_distance));
        rows
    }
}

fn not_found(kind: &'static str, id: impl ToString) -> StoreError {
    StoreError::NotFound {
        kind,
        id: id.to_string(),
    }
}

fn already_exists(kind: &'static str, id: impl ToString) -> StoreError {
    StoreError::AlreadyExists {
        kind,
        id: id.to_string(),
    }
}

#[async_trait]
impl DriverRoster for MemoryStore {
    async fn drivers_in_city(&self, city: &City) -> Result<Vec<Driver>, StoreError> {
        Ok(self
            .drivers
            .read()
            .await
            .iter()
            .filter(|d| d.serves(city))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DeliveryStore for MemoryStore {
    async fn deliveries_for_driver(&self, driver: &Driver) -> Result<Vec<Delivery>, StoreError> {
        Ok(self
            .deliveries
            .read()
            .await
            .rows
            .iter()
            .filter(|d| d.driver.id() == driver.id())
            .cloned()
            .collect())
    }

    async fn save(&self, delivery: NewDelivery) -> Result<Delivery, StoreError> {
        // Drivers lock is released before taking the deliveries lock.
        let known_driver = self
            .drivers
            .read()
            .await
            .iter()
            .any(|d| d.id() == delivery.driver.id());
        if !known_driver {
            return Err(not_found("Driver", delivery.driver.id()));
        }

        let mut table = self.deliveries.write().await;
        let slot = (delivery.driver.id().clone(), delivery.delivery_time);
        if table.booked.contains(&slot) {
            return Err(StoreError::Conflict {
                driver_id: slot.0,
                delivery_time: slot.1,
            });
        }

        let saved = delivery.into_delivery(DeliveryId::generate());
        debug!(delivery_id = %saved.id, driver_id = %saved.driver.id(), "Saved delivery");
        table.insert(saved.clone());
        Ok(saved)
    }

    async fn rank_drivers_by_total_distance(&self) -> Result<Vec<DriverDistance>, StoreError> {
        Ok(self.rank(None).await)
    }

    async fn rank_drivers_by_total_distance_in_city(
        &self,
        city: &City,
    ) -> Result<Vec<DriverDistance>, StoreError> {
        Ok(self.rank(Some(city)).await)
    }
}
