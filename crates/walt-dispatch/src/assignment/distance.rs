//! Where a new delivery's distance comes from.
//!
//! Routing is out of scope, so the distance is supplied rather than derived
//! from geography.

use rand::Rng;

use walt_core::{CoreError, Customer, Distance, Restaurant};

/// Supplies the distance for a new delivery.
pub trait DistanceEstimator: Send + Sync {
    fn estimate(&self, restaurant: &Restaurant, customer: &Customer) -> Distance;
}

/// Uniformly random distance in `[0, max)`.
#[derive(Debug, Clone, Copy)]
pub struct RandomDistance {
    max: f64,
}

impl RandomDistance {
    /// Upper bound used when none is configured.
    pub const DEFAULT_MAX: f64 = 20.0;

    pub fn new(max: f64) -> Result<Self, CoreError> {
        if max.is_finite() && max > 0.0 {
            Ok(Self { max })
        } else {
            Err(CoreError::InvalidDistance(max))
        }
    }
}

impl Default for RandomDistance {
    fn default() -> Self {
        Self {
            max: Self::DEFAULT_MAX,
        }
    }
}

impl DistanceEstimator for RandomDistance {
    fn estimate(&self, _restaurant: &Restaurant, _customer: &Customer) -> Distance {
        let value = rand::thread_rng().gen_range(0.0..self.max);
        Distance::new(value).unwrap_or_default()
    }
}

/// The same distance for every delivery.
#[derive(Debug, Clone, Copy)]
pub struct FixedDistance(pub Distance);

impl DistanceEstimator for FixedDistance {
    fn estimate(&self, _restaurant: &Restaurant, _customer: &Customer) -> Distance {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use walt_core::City;

    use super::*;

    #[test]
    fn test_random_distance_stays_in_range() {
        let city = City::new("Haifa");
        let customer = Customer::new("Mozart", city.clone());
        let restaurant = Restaurant::new("cafe", city);
        let estimator = RandomDistance::new(2.0).unwrap();

        for _ in 0..200 {
            let d = estimator.estimate(&restaurant, &customer);
            assert!(d.value() >= 0.0 && d.value() < 2.0);
        }
    }

    #[test]
    fn test_random_distance_rejects_bad_bound() {
        assert!(RandomDistance::new(0.0).is_err());
        assert!(RandomDistance::new(-1.0).is_err());
        assert!(RandomDistance::new(f64::NAN).is_err());
    }
}
