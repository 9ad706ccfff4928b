//! Developer repository

use crate::domain::{CreateDeveloperInput, Developer, UpdateDeveloperInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeveloperRepository: Send + Sync {
    async fn create(&self, input: &CreateDeveloperInput) -> Result<Developer>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Developer>>;
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Developer>>;
    async fn count(&self) -> Result<i64>;
    async fn update(&self, id: i64, input: &UpdateDeveloperInput) -> Result<Developer>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct DeveloperRepositoryImpl {
    pool: MySqlPool,
}

impl DeveloperRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const DEVELOPER_COLUMNS: &str = "id, name, website, created_at, updated_at";

#[async_trait]
impl DeveloperRepository for DeveloperRepositoryImpl {
    async fn create(&self, input: &CreateDeveloperInput) -> Result<Developer> {
        let result = sqlx::query(
            r#"
            INSERT INTO developers (name, website, created_at, updated_at)
            VALUES (?, ?, NOW(), NOW())
            "#,
        )
        .bind(&input.name)
        .bind(&input.website)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create developer")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Developer>> {
        let developer = sqlx::query_as::<_, Developer>(&format!(
            "SELECT {DEVELOPER_COLUMNS} FROM developers WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(developer)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Developer>> {
        let developers = sqlx::query_as::<_, Developer>(&format!(
            "SELECT {DEVELOPER_COLUMNS} FROM developers ORDER BY name LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(developers)
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM developers")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn update(&self, id: i64, input: &UpdateDeveloperInput) -> Result<Developer> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Developer {} not found", id)))?;

        let name = input.name.as_deref().unwrap_or(&existing.name);
        let website = input.website.as_ref().or(existing.website.as_ref());

        sqlx::query(
            r#"
            UPDATE developers
            SET name = ?, website = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(website)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update developer")))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM developers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Developer {} not found", id)));
        }

        Ok(())
    }
}
