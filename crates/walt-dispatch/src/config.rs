//! Dispatch server configuration.

use std::path::PathBuf;
use std::sync::Arc;

use walt_core::{CoreError, Distance};

use crate::assignment::{DistanceEstimator, FixedDistance, RandomDistance};

/// How new deliveries get their distance when the order does not carry one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceMode {
    /// Uniformly random in `[0, max)`.
    Random { max: f64 },
    /// Always the same value.
    Fixed(f64),
}

impl Default for DistanceMode {
    fn default() -> Self {
        Self::Random {
            max: RandomDistance::DEFAULT_MAX,
        }
    }
}

/// Dispatch server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server bind address.
    pub http_bind_addr: String,

    /// Optional JSON file with reference data loaded at startup.
    pub seed_path: Option<PathBuf>,

    /// Distance source for new deliveries.
    pub distance: DistanceMode,
}

impl Config {
    /// Build the distance estimator described by this configuration.
    pub fn estimator(&self) -> Result<Arc<dyn DistanceEstimator>, CoreError> {
        let estimator: Arc<dyn DistanceEstimator> = match self.distance {
            DistanceMode::Random { max } => Arc::new(RandomDistance::new(max)?),
            DistanceMode::Fixed(value) => Arc::new(FixedDistance(Distance::new(value)?)),
        };
        Ok(estimator)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_bind_addr: "[::1]:8080".to_string(),
            seed_path: None,
            distance: DistanceMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_estimator() {
        assert!(Config::default().estimator().is_ok());
    }

    #[test]
    fn test_negative_fixed_distance_is_rejected() {
        let config = Config {
            distance: DistanceMode::Fixed(-2.0),
            ..Default::default()
        };
        assert!(matches!(
            config.estimator(),
            Err(CoreError::InvalidDistance(_))
        ));
    }
}
