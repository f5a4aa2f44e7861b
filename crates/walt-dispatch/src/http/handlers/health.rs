//! Liveness and metrics endpoints.

use std::sync::Arc;

use axum::{extract::State, http::header, response::IntoResponse, Json};

use crate::state::AppState;

/// Liveness plus a glance at store size.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let drivers = state.store.list_drivers().await.len();
    let deliveries = state.store.delivery_count().await;
    Json(serde_json::json!({
        "status": "ok",
        "drivers": drivers,
        "deliveries": deliveries,
    }))
}

/// Prometheus text exposition of dispatch counters.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = crate::metrics::collect_metrics(&state).await;
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}
