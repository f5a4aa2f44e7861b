//! Walt Dispatch Library
//!
//! Assigns delivery drivers to food orders and reports driver workload.
//! The assignment pipeline lives in [`assignment`]; everything else wires it
//! to storage, configuration and HTTP.

pub mod assignment;
pub mod config;
pub mod http;
pub mod metrics;
pub mod seed;
pub mod state;
pub mod store;

pub use assignment::{AssignmentError, Dispatcher};
pub use config::Config;
pub use state::AppState;
pub use store::MemoryStore;
