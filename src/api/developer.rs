//! Developer API handlers

use crate::api::{MessageResponse, PaginatedResponse, PaginationQuery, SuccessResponse};
use crate::domain::{CreateDeveloperInput, UpdateDeveloperInput};
use crate::error::Result;
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// List developers
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let (developers, total) = state
        .developer_service
        .list(pagination.page, pagination.per_page)
        .await?;

    Ok(Json(PaginatedResponse::new(
        developers,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

/// Get developer by ID
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<impl IntoResponse> {
    let developer = state.developer_service.get(id).await?;
    Ok(Json(SuccessResponse::new(developer)))
}

/// Create developer
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateDeveloperInput>,
) -> Result<impl IntoResponse> {
    let developer = state.developer_service.create(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(developer))))
}

/// Update developer
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateDeveloperInput>,
) -> Result<impl IntoResponse> {
    let developer = state.developer_service.update(id, input).await?;
    Ok(Json(SuccessResponse::new(developer)))
}

/// Delete developer
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.developer_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Developer deleted successfully")))
}
