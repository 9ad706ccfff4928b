//! Geography repositories (countries, states, cities)

use crate::domain::{
    City, Country, CreateCityInput, CreateCountryInput, CreateStateInput, State,
};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryRepository: Send + Sync {
    async fn create(&self, input: &CreateCountryInput) -> Result<Country>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Country>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Country>>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Country>>;
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Country>>;
    async fn count(&self) -> Result<i64>;
    async fn delete(&self, id: i64) -> Result<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StateRepository: Send + Sync {
    async fn create(&self, input: &CreateStateInput) -> Result<State>;
    async fn find_by_id(&self, id: i64) -> Result<Option<State>>;
    async fn list_by_country(&self, country_id: i64) -> Result<Vec<State>>;
    async fn list_ids_by_country(&self, country_id: i64) -> Result<Vec<i64>>;
    async fn count_by_country(&self, country_id: i64) -> Result<i64>;
    async fn delete(&self, id: i64) -> Result<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CityRepository: Send + Sync {
    async fn create(&self, input: &CreateCityInput) -> Result<City>;
    async fn find_by_id(&self, id: i64) -> Result<Option<City>>;
    async fn list_by_state(&self, state_id: i64) -> Result<Vec<City>>;
    async fn list_ids_by_state(&self, state_id: i64) -> Result<Vec<i64>>;
    async fn count_by_state(&self, state_id: i64) -> Result<i64>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct CountryRepositoryImpl {
    pool: MySqlPool,
}

impl CountryRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CountryRepository for CountryRepositoryImpl {
    async fn create(&self, input: &CreateCountryInput) -> Result<Country> {
        let result = sqlx::query(
            "INSERT INTO countries (name, code, created_at) VALUES (?, ?, NOW())",
        )
        .bind(&input.name)
        .bind(&input.code)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create country")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Country>> {
        let country = sqlx::query_as::<_, Country>(
            "SELECT id, name, code, created_at FROM countries WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(country)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Country>> {
        let country = sqlx::query_as::<_, Country>(
            "SELECT id, name, code, created_at FROM countries WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(country)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Country>> {
        let country = sqlx::query_as::<_, Country>(
            "SELECT id, name, code, created_at FROM countries WHERE code = ?",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(country)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Country>> {
        let countries = sqlx::query_as::<_, Country>(
            "SELECT id, name, code, created_at FROM countries ORDER BY name LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(countries)
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM countries")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM countries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Country {} not found", id)));
        }

        Ok(())
    }
}

pub struct StateRepositoryImpl {
    pool: MySqlPool,
}

impl StateRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StateRepository for StateRepositoryImpl {
    async fn create(&self, input: &CreateStateInput) -> Result<State> {
        let result = sqlx::query(
            "INSERT INTO states (name, country_id, created_at) VALUES (?, ?, NOW())",
        )
        .bind(&input.name)
        .bind(input.country_id)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create state")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<State>> {
        let state = sqlx::query_as::<_, State>(
            "SELECT id, name, country_id, created_at FROM states WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(state)
    }

    async fn list_by_country(&self, country_id: i64) -> Result<Vec<State>> {
        let states = sqlx::query_as::<_, State>(
            "SELECT id, name, country_id, created_at FROM states WHERE country_id = ? ORDER BY name",
        )
        .bind(country_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(states)
    }

    async fn list_ids_by_country(&self, country_id: i64) -> Result<Vec<i64>> {
        let rows: Vec<(i64,)> =
            sqlx::query_as("SELECT id FROM states WHERE country_id = ?")
                .bind(country_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn count_by_country(&self, country_id: i64) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM states WHERE country_id = ?")
            .bind(country_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM states WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("State {} not found", id)));
        }

        Ok(())
    }
}

pub struct CityRepositoryImpl {
    pool: MySqlPool,
}

impl CityRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CityRepository for CityRepositoryImpl {
    async fn create(&self, input: &CreateCityInput) -> Result<City> {
        let result = sqlx::query(
            "INSERT INTO cities (name, state_id, created_at) VALUES (?, ?, NOW())",
        )
        .bind(&input.name)
        .bind(input.state_id)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create city")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<City>> {
        let city = sqlx::query_as::<_, City>(
            "SELECT id, name, state_id, created_at FROM cities WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(city)
    }

    async fn list_by_state(&self, state_id: i64) -> Result<Vec<City>> {
        let cities = sqlx::query_as::<_, City>(
            "SELECT id, name, state_id, created_at FROM cities WHERE state_id = ? ORDER BY name",
        )
        .bind(state_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cities)
    }

    async fn list_ids_by_state(&self, state_id: i64) -> Result<Vec<i64>> {
        let rows: Vec<(i64,)> = sqlx::query_as("SELECT id FROM cities WHERE state_id = ?")
            .bind(state_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn count_by_state(&self, state_id: i64) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cities WHERE state_id = ?")
            .bind(state_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM cities WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("City {} not found", id)));
        }

        Ok(())
    }
}
