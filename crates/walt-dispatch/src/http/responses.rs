//! HTTP request and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use walt_core::{City, Customer, Delivery, Driver, DriverDistance, Restaurant};

// ============================================================================
// Reference data types
// ============================================================================

/// Request body for creating a city.
#[derive(Debug, Deserialize)]
pub struct CreateCityRequest {
    /// Explicit id; generated when absent.
    pub id: Option<String>,
    pub name: String,
}

/// Request body for registering a driver.
#[derive(Debug, Deserialize)]
pub struct CreateDriverRequest {
    pub id: Option<String>,
    pub name: String,
    pub city_id: String,
}

/// Request body for registering a customer or a restaurant.
#[derive(Debug, Deserialize)]
pub struct CreatePartyRequest {
    pub id: Option<String>,
    pub name: String,
    pub city_id: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct CityResponse {
    pub id: String,
    pub name: String,
}

impl From<&City> for CityResponse {
    fn from(city: &City) -> Self {
        Self {
            id: city.id().to_string(),
            name: city.name().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub id: String,
    pub name: String,
    pub city_id: String,
    pub city_name: String,
}

impl From<&Driver> for DriverResponse {
    fn from(driver: &Driver) -> Self {
        Self {
            id: driver.id().to_string(),
            name: driver.name().to_string(),
            city_id: driver.city.id().to_string(),
            city_name: driver.city.name().to_string(),
        }
    }
}

/// Customer or restaurant.
#[derive(Debug, Serialize)]
pub struct PartyResponse {
    pub id: String,
    pub name: String,
    pub city_id: String,
    pub address: String,
}

impl From<&Customer> for PartyResponse {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id().to_string(),
            name: customer.name().to_string(),
            city_id: customer.city.id().to_string(),
            address: customer.address.clone(),
        }
    }
}

impl From<&Restaurant> for PartyResponse {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            id: restaurant.id().to_string(),
            name: restaurant.name().to_string(),
            city_id: restaurant.city.id().to_string(),
            address: restaurant.address.clone(),
        }
    }
}

// ============================================================================
// Order types
// ============================================================================

/// Request body for placing an order.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub restaurant_id: String,

    /// Requested delivery time (RFC 3339).
    pub delivery_time: DateTime<Utc>,

    /// Overrides the configured distance source.
    pub distance: Option<f64>,
}

/// A committed delivery.
#[derive(Debug, Serialize)]
pub struct DeliveryResponse {
    pub id: String,
    pub driver_id: String,
    pub driver_name: String,
    pub customer_id: String,
    pub restaurant_id: String,
    pub city_id: String,
    /// Delivery time (ISO 8601).
    pub delivery_time: String,
    pub distance: f64,
}

impl From<&Delivery> for DeliveryResponse {
    fn from(delivery: &Delivery) -> Self {
        Self {
            id: delivery.id.to_string(),
            driver_id: delivery.driver.id().to_string(),
            driver_name: delivery.driver.name().to_string(),
            customer_id: delivery.customer.id().to_string(),
            restaurant_id: delivery.restaurant.id().to_string(),
            city_id: delivery.customer.city.id().to_string(),
            delivery_time: delivery.delivery_time.to_rfc3339(),
            distance: delivery.distance.value(),
        }
    }
}

// ============================================================================
// Report types
// ============================================================================

/// Query string for the rank report.
#[derive(Debug, Default, Deserialize)]
pub struct RankQuery {
    pub city_id: Option<String>,
}

/// One row of the driver rank report.
#[derive(Debug, Serialize)]
pub struct DriverDistanceResponse {
    pub driver_id: String,
    pub driver_name: String,
    pub city_id: String,
    pub total_distance: f64,
}

impl From<&DriverDistance> for DriverDistanceResponse {
    fn from(row: &DriverDistance) -> Self {
        Self {
            driver_id: row.driver.id().to_string(),
            driver_name: row.driver.name().to_string(),
            city_id: row.driver.city.id().to_string(),
            total_distance: row.total_distance.value(),
        }
    }
}

// ============================================================================
// Error types
// ============================================================================

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
