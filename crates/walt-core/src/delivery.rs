//! Delivery records and the distance they carry.

use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CoreError, Customer, DeliveryId, Driver, Restaurant};

/// Distance covered by a delivery, in abstract units.
///
/// Always finite and non-negative, which makes the ordering total.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Distance(f64);

impl Distance {
    pub const ZERO: Distance = Distance(0.0);

    /// Create a Distance, rejecting negative and non-finite values.
    /// Negative zero is normalized to zero.
    pub fn new(value: f64) -> Result<Self, CoreError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Distance(value.abs()))
        } else {
            Err(CoreError::InvalidDistance(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Eq for Distance {}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl TryFrom<f64> for Distance {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Distance::new(value)
    }
}

impl From<Distance> for f64 {
    fn from(value: Distance) -> Self {
        value.0
    }
}

impl Add for Distance {
    type Output = Distance;

    fn add(self, other: Distance) -> Distance {
        Distance(self.0 + other.0)
    }
}

impl AddAssign for Distance {
    fn add_assign(&mut self, other: Distance) {
        self.0 += other.0;
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Distance::ZERO, |acc, d| acc + d)
    }
}

impl<'a> Sum<&'a Distance> for Distance {
    fn sum<I: Iterator<Item = &'a Distance>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A delivery that has been decided but not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDelivery {
    pub driver: Driver,
    pub restaurant: Restaurant,
    pub customer: Customer,
    pub delivery_time: DateTime<Utc>,
    pub distance: Distance,
}

impl NewDelivery {
    /// Create a new unsaved delivery.
    pub fn new(
        driver: Driver,
        restaurant: Restaurant,
        customer: Customer,
        delivery_time: DateTime<Utc>,
        distance: Distance,
    ) -> Self {
        Self {
            driver,
            restaurant,
            customer,
            delivery_time,
            distance,
        }
    }

    /// Attach the identity assigned by the store.
    pub fn into_delivery(self, id: DeliveryId) -> Delivery {
        Delivery {
            id,
            driver: self.driver,
            restaurant: self.restaurant,
            customer: self.customer,
            delivery_time: self.delivery_time,
            distance: self.distance,
        }
    }
}

/// A committed assignment of a driver to an order. Never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    /// Unique delivery identifier.
    pub id: DeliveryId,

    /// Driver carrying the order.
    pub driver: Driver,

    /// Restaurant the order is picked up from.
    pub restaurant: Restaurant,

    /// Customer the order is delivered to.
    pub customer: Customer,

    /// Requested delivery time.
    pub delivery_time: DateTime<Utc>,

    /// Distance contributed to the driver's load.
    pub distance: Distance,
}

/// One row of the driver ranking report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverDistance {
    pub driver: Driver,
    pub total_distance: Distance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_rejects_negative_and_nan() {
        assert!(Distance::new(-0.5).is_err());
        assert!(Distance::new(f64::NAN).is_err());
        assert!(Distance::new(f64::INFINITY).is_err());
        assert!(Distance::new(0.0).unwrap().is_zero());
    }

    #[test]
    fn test_negative_zero_is_plain_zero() {
        let d = Distance::new(-0.0).unwrap();

        assert_eq!(d, Distance::ZERO);
        assert_eq!(d.cmp(&Distance::ZERO), std::cmp::Ordering::Equal);
        assert!(d.value().is_sign_positive());
        assert_eq!(serde_json::to_string(&d).unwrap(), "0.0");

        let parsed: Distance = serde_json::from_str("-0.0").unwrap();
        assert_eq!(parsed.cmp(&Distance::ZERO), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_distance_sum_of_empty_is_zero() {
        let none: Vec<Distance> = Vec::new();
        assert_eq!(none.iter().sum::<Distance>(), Distance::ZERO);
    }

    #[test]
    fn test_distance_sum_and_order() {
        let parts = [Distance::new(2.5).unwrap(), Distance::new(7.5).unwrap()];
        let total: Distance = parts.iter().sum();
        assert_eq!(total.value(), 10.0);
        assert!(parts[0] < parts[1]);
    }

    #[test]
    fn test_distance_deserialize_validates() {
        assert!(serde_json::from_str::<Distance>("-3").is_err());
        let d: Distance = serde_json::from_str("4.25").unwrap();
        assert_eq!(d.value(), 4.25);
    }
}
