//! Unified error handling for Estate Core

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Caller role absent or not in the operation's required set.
    #[error("Unauthorized: Insufficient permissions")]
    PermissionDenied,

    /// A mutation referenced a parent row that does not exist.
    #[error("Referenced {entity} {id} does not exist")]
    ReferenceNotFound { entity: &'static str, id: i64 },

    /// A mutation collided with an existing unique value.
    #[error("Unique constraint violation on {field}")]
    UniqueConstraintViolation { field: &'static str },

    /// A delete hit dependent children under a Restrict policy.
    #[error("Cannot delete {entity}: dependent {dependent} rows exist")]
    DependentRowsExist {
        entity: &'static str,
        dependent: &'static str,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Permission rejections use a fixed body shape so callers can rely on it.
        if let AppError::PermissionDenied = self {
            return (
                StatusCode::FORBIDDEN,
                Json(serde_json::json!({
                    "error": "Unauthorized: Insufficient permissions"
                })),
            )
                .into_response();
        }

        let (status, error_type, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::PermissionDenied => unreachable!("handled above"),
            AppError::ReferenceNotFound { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "reference_not_found",
                self.to_string(),
            ),
            AppError::UniqueConstraintViolation { .. } => {
                (StatusCode::CONFLICT, "unique_violation", self.to_string())
            }
            AppError::DependentRowsExist { .. } => {
                (StatusCode::CONFLICT, "dependent_rows", self.to_string())
            }
            AppError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation", msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

// Conversion from validation errors
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

// The service layer probes for collisions before writing, but a racing
// insert can still trip the engine's unique index. Lift that into the typed
// condition so the caller sees a conflict, not a server error.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return AppError::UniqueConstraintViolation {
                    field: "unique index",
                };
            }
        }
        AppError::Database(err)
    }
}
