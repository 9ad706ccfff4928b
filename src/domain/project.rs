//! Project domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Development project. Belongs to exactly one developer, one creator user
/// and one city; owns zero or more properties.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub developer_id: i64,
    pub user_id: i64,
    pub city_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProjectInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    pub developer_id: i64,
    pub user_id: i64,
    pub city_id: i64,
}

/// Absent fields keep their stored value; `description` cannot be cleared
/// through an update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProjectInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub developer_id: Option<i64>,
    pub user_id: Option<i64>,
    pub city_id: Option<i64>,
}
