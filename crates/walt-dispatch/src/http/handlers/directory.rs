//! Reference data handlers: cities, drivers, customers, restaurants.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use walt_core::{City, CityId, Customer, CustomerId, Driver, DriverId, Restaurant, RestaurantId};

use super::{error_response, store_error_response};
use crate::http::responses::{
    CityResponse, CreateCityRequest, CreateDriverRequest, CreatePartyRequest, DriverResponse,
    PartyResponse,
};
use crate::state::AppState;

/// List cities.
pub async fn list_cities(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cities = state.store.list_cities().await;
    Json(cities.iter().map(CityResponse::from).collect::<Vec<_>>())
}

/// Create a city.
pub async fn create_city(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCityRequest>,
) -> Response {
    if req.name.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "City name must not be empty");
    }

    let id = req.id.map(CityId::new).unwrap_or_else(CityId::generate);
    match state.store.add_city(City::with_id(id, req.name)).await {
        Ok(city) => {
            info!(city_id = %city.id(), name = %city.name(), "City created");
            (StatusCode::CREATED, Json(CityResponse::from(&city))).into_response()
        }
        Err(e) => store_error_response(&e),
    }
}

/// List drivers in registration order.
pub async fn list_drivers(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let drivers = state.store.list_drivers().await;
    Json(drivers.iter().map(DriverResponse::from).collect::<Vec<_>>())
}

/// Register a driver in an existing city.
pub async fn create_driver(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateDriverRequest>,
) -> Response {
    let city = match state.store.get_city(&CityId::new(req.city_id)).await {
        Ok(city) => city,
        Err(e) => return store_error_response(&e),
    };

    let id = req.id.map(DriverId::new).unwrap_or_else(DriverId::generate);
    match state.store.add_driver(Driver::with_id(id, req.name, city)).await {
        Ok(driver) => {
            info!(driver_id = %driver.id(), city_id = %driver.city.id(), "Driver registered");
            (StatusCode::CREATED, Json(DriverResponse::from(&driver))).into_response()
        }
        Err(e) => store_error_response(&e),
    }
}

/// List customers.
pub async fn list_customers(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let customers = state.store.list_customers().await;
    Json(customers.iter().map(PartyResponse::from).collect::<Vec<_>>())
}

/// Register a customer.
pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePartyRequest>,
) -> Response {
    let city = match state.store.get_city(&CityId::new(req.city_id)).await {
        Ok(city) => city,
        Err(e) => return store_error_response(&e),
    };

    let id = req.id.map(CustomerId::new).unwrap_or_else(CustomerId::generate);
    let customer = Customer::with_id(id, req.name, city).with_address(req.address);
    match state.store.add_customer(customer).await {
        Ok(customer) => (StatusCode::CREATED, Json(PartyResponse::from(&customer))).into_response(),
        Err(e) => store_error_response(&e),
    }
}

/// List restaurants.
pub async fn list_restaurants(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let restaurants = state.store.list_restaurants().await;
    Json(restaurants.iter().map(PartyResponse::from).collect::<Vec<_>>())
}

/// Register a restaurant.
pub async fn create_restaurant(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePartyRequest>,
) -> Response {
    let city = match state.store.get_city(&CityId::new(req.city_id)).await {
        Ok(city) => city,
        Err(e) => return store_error_response(&e),
    };

    let id = req
        .id
        .map(RestaurantId::new)
        .unwrap_or_else(RestaurantId::generate);
    let restaurant = Restaurant::with_id(id, req.name, city).with_address(req.address);
    match state.store.add_restaurant(restaurant).await {
        Ok(restaurant) => {
            (StatusCode::CREATED, Json(PartyResponse::from(&restaurant))).into_response()
        }
        Err(e) => store_error_response(&e),
    }
}
