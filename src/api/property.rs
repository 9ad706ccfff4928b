//! Property and image API handlers

use crate::api::{MessageResponse, PaginatedResponse, PaginationQuery, SuccessResponse};
use crate::domain::{CreateImageInput, CreatePropertyInput, UpdatePropertyInput};
use crate::error::Result;
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

/// List properties
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let (properties, total) = state
        .property_service
        .list(pagination.page, pagination.per_page)
        .await?;

    Ok(Json(PaginatedResponse::new(
        properties,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

/// Get property by ID
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<impl IntoResponse> {
    let property = state.property_service.get(id).await?;
    Ok(Json(SuccessResponse::new(property)))
}

/// Create property
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePropertyInput>,
) -> Result<impl IntoResponse> {
    let property = state.property_service.create(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(property))))
}

/// Update property
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdatePropertyInput>,
) -> Result<impl IntoResponse> {
    let property = state.property_service.update(id, input).await?;
    Ok(Json(SuccessResponse::new(property)))
}

/// Delete property
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.property_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Property deleted successfully")))
}

/// Image creation body; the property id comes from the path.
#[derive(Debug, Deserialize)]
pub struct AddImageBody {
    pub url: String,
}

/// List images of a property
pub async fn list_images(
    State(state): State<AppState>,
    Path(property_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let images = state.property_service.list_images(property_id).await?;
    Ok(Json(SuccessResponse::new(images)))
}

/// Attach an image to a property
pub async fn add_image(
    State(state): State<AppState>,
    Path(property_id): Path<i64>,
    Json(body): Json<AddImageBody>,
) -> Result<impl IntoResponse> {
    let image = state
        .property_service
        .add_image(CreateImageInput {
            url: body.url,
            property_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(image))))
}

/// Delete image
pub async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.property_service.delete_image(id).await?;
    Ok(Json(MessageResponse::new("Image deleted successfully")))
}
