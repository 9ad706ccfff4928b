//! Developer domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Development company behind zero or more projects.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Developer {
    pub id: i64,
    pub name: String,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDeveloperInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(url)]
    pub website: Option<String>,
}

/// Absent fields keep their stored value; `website` cannot be cleared
/// through an update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDeveloperInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
}
