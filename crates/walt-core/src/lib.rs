//! Walt Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Database
//! - Runtime specifics
//!
//! All types here represent the delivery dispatch domain: cities, drivers,
//! customers, restaurants and the deliveries that bind them together, plus
//! the storage contracts the assignment pipeline reads from and writes to.

pub mod delivery;
pub mod error;
pub mod ids;
pub mod model;
pub mod store;

// Re-export commonly used types
pub use delivery::{Delivery, Distance, DriverDistance, NewDelivery};
pub use error::{CoreError, StoreError};
pub use ids::{CityId, CustomerId, DeliveryId, DriverId, RestaurantId};
pub use model::{City, Customer, Driver, Named, Restaurant};
pub use store::{DeliveryStore, DriverRoster};
