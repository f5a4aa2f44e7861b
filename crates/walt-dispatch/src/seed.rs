//! Reference data loaded from a JSON file at startup.
//!
//! ```json
//! {
//!   "cities": [{ "id": "tlv", "name": "Tel-Aviv" }],
//!   "drivers": [{ "id": "d1", "name": "Mary", "city_id": "tlv" }],
//!   "customers": [{ "id": "c1", "name": "Bach", "city_id": "tlv", "address": "Ha-Yarkon 1" }],
//!   "restaurants": [{ "id": "r1", "name": "meat", "city_id": "tlv" }]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use walt_core::{
    City, CityId, Customer, CustomerId, Driver, DriverId, Restaurant, RestaurantId, StoreError,
};

use crate::store::MemoryStore;

/// Seed loading errors.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to apply seed: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Deserialize)]
pub struct SeedCity {
    pub id: CityId,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SeedDriver {
    pub id: DriverId,
    pub name: String,
    pub city_id: CityId,
}

#[derive(Debug, Deserialize)]
pub struct SeedCustomer {
    pub id: CustomerId,
    pub name: String,
    pub city_id: CityId,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct SeedRestaurant {
    pub id: RestaurantId,
    pub name: String,
    pub city_id: CityId,
    #[serde(default)]
    pub address: String,
}

/// Contents of a seed file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub cities: Vec<SeedCity>,
    pub drivers: Vec<SeedDriver>,
    pub customers: Vec<SeedCustomer>,
    pub restaurants: Vec<SeedRestaurant>,
}

impl SeedData {
    /// Read and parse a seed file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Register everything in the store. Cities go first so the others can
    /// resolve their `city_id`.
    pub async fn apply(self, store: &MemoryStore) -> Result<(), SeedError> {
        for city in &self.cities {
            store
                .add_city(City::with_id(city.id.clone(), &city.name))
                .await?;
        }

        for driver in self.drivers {
            let city = store.get_city(&driver.city_id).await?;
            store
                .add_driver(Driver::with_id(driver.id, driver.name, city))
                .await?;
        }

        for customer in self.customers {
            let city = store.get_city(&customer.city_id).await?;
            store
                .add_customer(
                    Customer::with_id(customer.id, customer.name, city)
                        .with_address(customer.address),
                )
                .await?;
        }

        for restaurant in self.restaurants {
            let city = store.get_city(&restaurant.city_id).await?;
            store
                .add_restaurant(
                    Restaurant::with_id(restaurant.id, restaurant.name, city)
                        .with_address(restaurant.address),
                )
                .await?;
        }

        info!(
            cities = store.list_cities().await.len(),
            drivers = store.list_drivers().await.len(),
            customers = store.list_customers().await.len(),
            restaurants = store.list_restaurants().await.len(),
            "Seed data loaded"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use walt_core::DriverRoster;

    use super::*;

    const SEED: &str = r#"{
        "cities": [{ "id": "tlv", "name": "Tel-Aviv" }, { "id": "hfa", "name": "Haifa" }],
        "drivers": [
            { "id": "d1", "name": "Mary", "city_id": "tlv" },
            { "id": "d2", "name": "Robert", "city_id": "hfa" }
        ],
        "customers": [{ "id": "c1", "name": "Bach", "city_id": "tlv", "address": "Ha-Yarkon 1" }],
        "restaurants": [{ "id": "r1", "name": "meat", "city_id": "tlv" }]
    }"#;

    #[tokio::test]
    async fn test_load_and_apply_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SEED.as_bytes()).unwrap();

        let store = MemoryStore::new();
        SeedData::load(file.path()).unwrap().apply(&store).await.unwrap();

        let tlv = store.get_city(&CityId::new("tlv")).await.unwrap();
        let drivers = store.drivers_in_city(&tlv).await.unwrap();
        assert_eq!(drivers.len(), 1);
        assert_eq!(drivers[0].name(), "Mary");

        let customer = store.get_customer(&CustomerId::new("c1")).await.unwrap();
        assert_eq!(customer.address, "Ha-Yarkon 1");
        assert!(store.get_restaurant(&RestaurantId::new("r1")).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_city_reference_fails() {
        let seed: SeedData = serde_json::from_str(
            r#"{ "drivers": [{ "id": "d1", "name": "Lost", "city_id": "nowhere" }] }"#,
        )
        .unwrap();

        let store = MemoryStore::new();
        let result = seed.apply(&store).await;
        assert!(matches!(result, Err(SeedError::Store(StoreError::NotFound { .. }))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = SeedData::load("/definitely/not/here.json");
        assert!(matches!(result, Err(SeedError::Io(_))));
    }
}
