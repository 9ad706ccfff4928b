//! Property and image domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Property listing. `project_id` is the single optional relationship in the
/// graph: a property may exist independently of any development project.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Property {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price: i64,
    pub user_id: i64,
    pub city_id: i64,
    pub project_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Image attached to a property. Holds a URL reference only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Image {
    pub id: i64,
    pub url: String,
    pub property_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePropertyInput {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price: i64,
    pub user_id: i64,
    pub city_id: i64,
    pub project_id: Option<i64>,
}

/// Partial update. Absent fields keep their stored value; of the nullable
/// fields only `project_id` supports explicit clearing (the detach below).
/// `description` cannot be cleared through an update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePropertyInput {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    pub user_id: Option<i64>,
    pub city_id: Option<i64>,
    /// Outer `None` = leave unchanged; `Some(None)` = detach from project.
    #[serde(default, with = "double_option")]
    pub project_id: Option<Option<i64>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateImageInput {
    #[validate(url)]
    pub url: String,
    pub property_id: i64,
}

/// Distinguishes "field absent" from "field explicitly null" in JSON.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<i64>::deserialize(deserializer).map(Some)
    }
}
