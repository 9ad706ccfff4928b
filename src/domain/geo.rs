//! Geographic hierarchy: Country -> State -> City

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Country entity. `name` and `code` are globally unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

/// State entity, owned by exactly one country.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct State {
    pub id: i64,
    pub name: String,
    pub country_id: i64,
    pub created_at: DateTime<Utc>,
}

/// City entity, owned by exactly one state.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub state_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCountryInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 10))]
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStateInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub country_id: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCityInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub state_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_country_input_validation() {
        let input = CreateCountryInput {
            name: "".to_string(),
            code: "TR".to_string(),
        };
        assert!(input.validate().is_err());

        let input = CreateCountryInput {
            name: "Turkey".to_string(),
            code: "TR".to_string(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_state_input_validation() {
        let input = CreateStateInput {
            name: "Istanbul".to_string(),
            country_id: 1,
        };
        assert!(input.validate().is_ok());
    }
}
