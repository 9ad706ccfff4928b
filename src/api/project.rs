//! Project API handlers

use crate::api::{MessageResponse, PaginatedResponse, PaginationQuery, SuccessResponse};
use crate::domain::{CreateProjectInput, UpdateProjectInput};
use crate::error::Result;
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// List projects
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let (projects, total) = state
        .project_service
        .list(pagination.page, pagination.per_page)
        .await?;

    Ok(Json(PaginatedResponse::new(
        projects,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

/// Get project by ID
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<impl IntoResponse> {
    let project = state.project_service.get(id).await?;
    Ok(Json(SuccessResponse::new(project)))
}

/// List properties belonging to a project
pub async fn list_properties(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let properties = state.project_service.list_properties(id).await?;
    Ok(Json(SuccessResponse::new(properties)))
}

/// Create project
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProjectInput>,
) -> Result<impl IntoResponse> {
    let project = state.project_service.create(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(project))))
}

/// Update project
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateProjectInput>,
) -> Result<impl IntoResponse> {
    let project = state.project_service.update(id, input).await?;
    Ok(Json(SuccessResponse::new(project)))
}

/// Delete project
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.project_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Project deleted successfully")))
}
