//! Geography API handlers (countries, states, cities)

use crate::api::{MessageResponse, PaginatedResponse, PaginationQuery, SuccessResponse};
use crate::domain::{CreateCityInput, CreateCountryInput, CreateStateInput};
use crate::error::Result;
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// List countries
pub async fn list_countries(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let (countries, total) = state
        .geo_service
        .list_countries(pagination.page, pagination.per_page)
        .await?;

    Ok(Json(PaginatedResponse::new(
        countries,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

/// Get country by ID
pub async fn get_country(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let country = state.geo_service.get_country(id).await?;
    Ok(Json(SuccessResponse::new(country)))
}

/// Create country
pub async fn create_country(
    State(state): State<AppState>,
    Json(input): Json<CreateCountryInput>,
) -> Result<impl IntoResponse> {
    let country = state.geo_service.create_country(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(country))))
}

/// Delete country
pub async fn delete_country(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.geo_service.delete_country(id).await?;
    Ok(Json(MessageResponse::new("Country deleted successfully")))
}

/// List states of a country
pub async fn list_states(
    State(state): State<AppState>,
    Path(country_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let states = state.geo_service.list_states(country_id).await?;
    Ok(Json(SuccessResponse::new(states)))
}

/// Get state by ID
pub async fn get_state(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let found = state.geo_service.get_state(id).await?;
    Ok(Json(SuccessResponse::new(found)))
}

/// Create state
pub async fn create_state(
    State(state): State<AppState>,
    Json(input): Json<CreateStateInput>,
) -> Result<impl IntoResponse> {
    let created = state.geo_service.create_state(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(created))))
}

/// Delete state
pub async fn delete_state(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.geo_service.delete_state(id).await?;
    Ok(Json(MessageResponse::new("State deleted successfully")))
}

/// List cities of a state
pub async fn list_cities(
    State(state): State<AppState>,
    Path(state_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let cities = state.geo_service.list_cities(state_id).await?;
    Ok(Json(SuccessResponse::new(cities)))
}

/// Get city by ID
pub async fn get_city(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let city = state.geo_service.get_city(id).await?;
    Ok(Json(SuccessResponse::new(city)))
}

/// Create city
pub async fn create_city(
    State(state): State<AppState>,
    Json(input): Json<CreateCityInput>,
) -> Result<impl IntoResponse> {
    let city = state.geo_service.create_city(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(city))))
}

/// Delete city
pub async fn delete_city(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.geo_service.delete_city(id).await?;
    Ok(Json(MessageResponse::new("City deleted successfully")))
}
