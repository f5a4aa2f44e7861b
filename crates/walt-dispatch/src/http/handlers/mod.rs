//! HTTP request handlers.

mod directory;
mod health;
mod orders;
mod reports;

pub use directory::{
    create_city, create_customer, create_driver, create_restaurant, list_cities, list_customers,
    list_drivers, list_restaurants,
};
pub use health::{health_check, metrics_handler};
pub use orders::{create_order, driver_deliveries, driver_distance};
pub use reports::driver_rank;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use walt_core::StoreError;

use crate::http::responses::ErrorResponse;

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn store_error_response(e: &StoreError) -> Response {
    let status = match e {
        StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        StoreError::AlreadyExists { .. } | StoreError::Conflict { .. } => StatusCode::CONFLICT,
        StoreError::Unavailable(_) => {
            error!(error = %e, "Store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, e.to_string())
}
