//! User domain model

use super::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserInput {
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: String,
    pub role: Role,
}

/// Input for updating a user. Absent fields keep their stored value;
/// nullable fields such as `name` cannot be cleared through an update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserInput {
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_input_validation() {
        let input = CreateUserInput {
            name: None,
            email: "invalid-email".to_string(),
            role: Role::Buyer,
        };
        assert!(input.validate().is_err());

        let valid_input = CreateUserInput {
            name: Some("Ada".to_string()),
            email: "ada@example.com".to_string(),
            role: Role::Seller,
        };
        assert!(valid_input.validate().is_ok());
    }

    #[test]
    fn test_update_user_input_skips_absent_fields() {
        let input = UpdateUserInput {
            name: None,
            email: None,
            role: None,
        };
        assert!(input.validate().is_ok());

        let input = UpdateUserInput {
            name: None,
            email: Some("not-an-email".to_string()),
            role: None,
        };
        assert!(input.validate().is_err());
    }
}
