//! Order placement and per-driver load handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

use walt_core::{CustomerId, DeliveryStore, Distance, DriverId, RestaurantId};

use super::{error_response, store_error_response};
use crate::assignment::AssignmentError;
use crate::http::responses::{CreateOrderRequest, DeliveryResponse};
use crate::state::AppState;

/// Place an order and assign it to a driver.
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> Response {
    let customer = match state.store.get_customer(&CustomerId::new(req.customer_id)).await {
        Ok(customer) => customer,
        Err(e) => return store_error_response(&e),
    };
    let restaurant = match state
        .store
        .get_restaurant(&RestaurantId::new(req.restaurant_id))
        .await
    {
        Ok(restaurant) => restaurant,
        Err(e) => return store_error_response(&e),
    };
    let distance = match req.distance.map(Distance::new).transpose() {
        Ok(distance) => distance,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let result = state
        .dispatcher
        .create_order_with_distance(&customer, &restaurant, req.delivery_time, distance)
        .await;
    state.stats.record(&result);

    match result {
        Ok(delivery) => {
            (StatusCode::CREATED, Json(DeliveryResponse::from(&delivery))).into_response()
        }
        Err(e @ AssignmentError::LocationMismatch { .. }) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
        Err(e @ AssignmentError::NoAvailableDrivers) => {
            info!(customer_id = %customer.id(), delivery_time = %req.delivery_time, "Order rejected");
            error_response(StatusCode::CONFLICT, e.to_string())
        }
        Err(AssignmentError::Store(e)) => {
            error!(error = %e, "Order failed in store");
            store_error_response(&e)
        }
    }
}

/// Deliveries assigned to a driver.
pub async fn driver_deliveries(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let driver = match state.store.get_driver(&DriverId::new(id)).await {
        Ok(driver) => driver,
        Err(e) => return store_error_response(&e),
    };

    match state.store.deliveries_for_driver(&driver).await {
        Ok(deliveries) => Json(
            deliveries
                .iter()
                .map(DeliveryResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => store_error_response(&e),
    }
}

/// Accumulated distance of a driver.
pub async fn driver_distance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let driver = match state.store.get_driver(&DriverId::new(id)).await {
        Ok(driver) => driver,
        Err(e) => return store_error_response(&e),
    };

    match state.dispatcher.total_distance(&driver).await {
        Ok(total) => Json(serde_json::json!({
            "driver_id": driver.id().as_str(),
            "total_distance": total.value(),
        }))
        .into_response(),
        Err(e) => store_error_response(&e),
    }
}
