//! Reference data: cities and the parties that live in them.

use serde::{Deserialize, Serialize};

use crate::{CityId, CustomerId, DriverId, RestaurantId};

/// Identity and display name shared by every entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Named<I> {
    /// Unique identifier.
    pub id: I,

    /// Human-readable name.
    pub name: String,
}

impl<I> Named<I> {
    /// Create a new Named value.
    pub fn new(id: I, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A city. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct City {
    #[serde(flatten)]
    pub named: Named<CityId>,
}

impl City {
    /// Create a new City with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(CityId::generate(), name)
    }

    /// Create a City with a specific id.
    pub fn with_id(id: CityId, name: impl Into<String>) -> Self {
        Self {
            named: Named::new(id, name),
        }
    }

    pub fn id(&self) -> &CityId {
        &self.named.id
    }

    pub fn name(&self) -> &str {
        &self.named.name
    }
}

/// A driver registered in exactly one city.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Driver {
    #[serde(flatten)]
    pub named: Named<DriverId>,

    /// City the driver is registered in.
    pub city: City,
}

impl Driver {
    /// Create a new Driver with a generated id.
    pub fn new(name: impl Into<String>, city: City) -> Self {
        Self::with_id(DriverId::generate(), name, city)
    }

    /// Create a Driver with a specific id.
    pub fn with_id(id: DriverId, name: impl Into<String>, city: City) -> Self {
        Self {
            named: Named::new(id, name),
            city,
        }
    }

    pub fn id(&self) -> &DriverId {
        &self.named.id
    }

    pub fn name(&self) -> &str {
        &self.named.name
    }

    /// Check if this driver is registered in the given city.
    pub fn serves(&self, city: &City) -> bool {
        self.city.id() == city.id()
    }
}

/// A customer placing orders from one city.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Customer {
    #[serde(flatten)]
    pub named: Named<CustomerId>,

    /// City the customer lives in.
    pub city: City,

    /// Street address, informational only.
    #[serde(default)]
    pub address: String,
}

impl Customer {
    /// Create a new Customer with a generated id.
    pub fn new(name: impl Into<String>, city: City) -> Self {
        Self::with_id(CustomerId::generate(), name, city)
    }

    /// Create a Customer with a specific id.
    pub fn with_id(id: CustomerId, name: impl Into<String>, city: City) -> Self {
        Self {
            named: Named::new(id, name),
            city,
            address: String::new(),
        }
    }

    /// Builder method to set the street address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn id(&self) -> &CustomerId {
        &self.named.id
    }

    pub fn name(&self) -> &str {
        &self.named.name
    }
}

/// A restaurant located in one city.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(flatten)]
    pub named: Named<RestaurantId>,

    /// City the restaurant operates in.
    pub city: City,

    /// Street address, informational only.
    #[serde(default)]
    pub address: String,
}

impl Restaurant {
    /// Create a new Restaurant with a generated id.
    pub fn new(name: impl Into<String>, city: City) -> Self {
        Self::with_id(RestaurantId::generate(), name, city)
    }

    /// Create a Restaurant with a specific id.
    pub fn with_id(id: RestaurantId, name: impl Into<String>, city: City) -> Self {
        Self {
            named: Named::new(id, name),
            city,
            address: String::new(),
        }
    }

    /// Builder method to set the street address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn id(&self) -> &RestaurantId {
        &self.named.id
    }

    pub fn name(&self) -> &str {
        &self.named.name
    }

    /// Check if the restaurant can deliver to the given customer.
    pub fn same_city_as(&self, customer: &Customer) -> bool {
        self.city.id() == customer.city.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_serves_own_city_only() {
        let tlv = City::new("Tel-Aviv");
        let haifa = City::new("Haifa");
        let driver = Driver::new("Mary", tlv.clone());

        assert!(driver.serves(&tlv));
        assert!(!driver.serves(&haifa));
    }

    #[test]
    fn test_same_city_compares_ids_not_names() {
        let a = City::with_id(CityId::new("1"), "Jerusalem");
        let b = City::with_id(CityId::new("2"), "Jerusalem");
        let customer = Customer::new("Beethoven", a);
        let restaurant = Restaurant::new("meat", b);

        assert!(!restaurant.same_city_as(&customer));
    }

    #[test]
    fn test_named_fields_flatten_in_json() {
        let city = City::with_id(CityId::new("c1"), "Beer-Sheva");
        let json = serde_json::to_value(&city).unwrap();
        assert_eq!(json["id"], "c1");
        assert_eq!(json["name"], "Beer-Sheva");
    }
}
