//! Busyness ranking by accumulated delivery distance.

use std::sync::Arc;

use serde::Serialize;

use walt_core::{DeliveryStore, Distance, Driver, StoreError};

use super::AssignmentError;

/// A candidate driver with the load it was ranked by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverLoad {
    pub driver: Driver,
    pub total_distance: Distance,
}

/// Orders candidates from least to most busy.
pub struct LoadRanker {
    deliveries: Arc<dyn DeliveryStore>,
}

impl LoadRanker {
    pub fn new(deliveries: Arc<dyn DeliveryStore>) -> Self {
        Self { deliveries }
    }

    /// Sum of distances over every delivery assigned to `driver`.
    ///
    /// Recomputed from the store on every call.
    pub async fn total_distance(&self, driver: &Driver) -> Result<Distance, StoreError> {
        let history = self.deliveries.deliveries_for_driver(driver).await?;
        Ok(history.iter().map(|d| d.distance).sum())
    }

    /// Candidates sorted by ascending total distance. Equal loads keep their
    /// input order.
    pub async fn rank_by_load(
        &self,
        candidates: Vec<Driver>,
    ) -> Result<Vec<DriverLoad>, StoreError> {
        let mut ranked = Vec::with_capacity(candidates.len());
        for driver in candidates {
            let total_distance = self.total_distance(&driver).await?;
            ranked.push(DriverLoad {
                driver,
                total_distance,
            });
        }

        // sort_by_key is stable
        ranked.sort_by_key(|load| load.total_distance);
        Ok(ranked)
    }

    /// The least busy candidate.
    pub async fn pick_least_busy(&self, candidates: Vec<Driver>) -> Result<Driver, AssignmentError> {
        self.rank_by_load(candidates)
            .await?
            .into_iter()
            .next()
            .map(|load| load.driver)
            .ok_or(AssignmentError::NoAvailableDrivers)
    }
}
