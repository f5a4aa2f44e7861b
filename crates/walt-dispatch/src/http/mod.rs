//! HTTP server for the dispatch service.
//!
//! Provides endpoints for:
//! - Reference data (`/v1/cities`, `/v1/drivers`, `/v1/customers`, `/v1/restaurants`)
//! - Order placement (`/v1/orders`)
//! - Driver load (`/v1/drivers/:id/deliveries`, `/v1/drivers/:id/distance`)
//! - Rank report (`/v1/reports/driver-rank`)
//! - Health check (`/health`)
//! - Prometheus metrics (`/metrics`)

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod handlers;
pub mod responses;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Reference data
        .route(
            "/v1/cities",
            get(handlers::list_cities).post(handlers::create_city),
        )
        .route(
            "/v1/drivers",
            get(handlers::list_drivers).post(handlers::create_driver),
        )
        .route(
            "/v1/customers",
            get(handlers::list_customers).post(handlers::create_customer),
        )
        .route(
            "/v1/restaurants",
            get(handlers::list_restaurants).post(handlers::create_restaurant),
        )
        // Orders
        .route("/v1/orders", post(handlers::create_order))
        .route(
            "/v1/drivers/:id/deliveries",
            get(handlers::driver_deliveries),
        )
        .route("/v1/drivers/:id/distance", get(handlers::driver_distance))
        // Reports
        .route("/v1/reports/driver-rank", get(handlers::driver_rank))
        // Observability routes
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
