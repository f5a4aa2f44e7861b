//! Shared application state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::assignment::{AssignmentError, DistanceEstimator, Dispatcher};
use crate::store::MemoryStore;

/// Counters of assignment outcomes since startup.
#[derive(Debug, Default)]
pub struct AssignmentStats {
    pub assigned: AtomicU64,
    pub location_mismatch: AtomicU64,
    pub no_available_drivers: AtomicU64,
    pub failed: AtomicU64,
}

impl AssignmentStats {
    /// Record the outcome of one order.
    pub fn record<T>(&self, outcome: &Result<T, AssignmentError>) {
        let counter = match outcome {
            Ok(_) => &self.assigned,
            Err(AssignmentError::LocationMismatch { .. }) => &self.location_mismatch,
            Err(AssignmentError::NoAvailableDrivers) => &self.no_available_drivers,
            Err(_) => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Shared application state.
pub struct AppState {
    /// Reference data and delivery history.
    pub store: Arc<MemoryStore>,

    /// Assignment pipeline over `store`.
    pub dispatcher: Dispatcher,

    /// Order outcome counters for `/metrics`.
    pub stats: AssignmentStats,
}

impl AppState {
    /// Create a new AppState over an empty store, wrapped in Arc.
    pub fn new(estimator: Arc<dyn DistanceEstimator>) -> Arc<Self> {
        Self::with_store(Arc::new(MemoryStore::new()), estimator)
    }

    /// Create a new AppState over an existing store.
    pub fn with_store(store: Arc<MemoryStore>, estimator: Arc<dyn DistanceEstimator>) -> Arc<Self> {
        let dispatcher = Dispatcher::new(store.clone(), store.clone(), estimator);
        Arc::new(Self {
            store,
            dispatcher,
            stats: AssignmentStats::default(),
        })
    }
}
