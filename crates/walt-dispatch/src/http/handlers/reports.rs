//! Driver ranking report.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};

use walt_core::CityId;

use super::store_error_response;
use crate::http::responses::{DriverDistanceResponse, RankQuery};
use crate::state::AppState;

/// Drivers ordered by total distance, busiest first. With `?city_id=` only
/// deliveries to customers in that city are counted.
pub async fn driver_rank(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RankQuery>,
) -> Response {
    let report = match query.city_id {
        Some(city_id) => match state.store.get_city(&CityId::new(city_id)).await {
            Ok(city) => state.dispatcher.driver_rank_report_by_city(&city).await,
            Err(e) => return store_error_response(&e),
        },
        None => state.dispatcher.driver_rank_report().await,
    };

    match report {
        Ok(rows) => Json(
            rows.iter()
                .map(DriverDistanceResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => store_error_response(&e),
    }
}
