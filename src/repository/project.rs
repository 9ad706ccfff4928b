//! Project repository

use crate::domain::{CreateProjectInput, Project, UpdateProjectInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create(&self, input: &CreateProjectInput) -> Result<Project>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Project>>;
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Project>>;
    async fn count(&self) -> Result<i64>;
    async fn update(&self, id: i64, input: &UpdateProjectInput) -> Result<Project>;
    async fn delete(&self, id: i64) -> Result<()>;

    // Dependent-row lookups for delete enforcement
    async fn count_by_developer(&self, developer_id: i64) -> Result<i64>;
    async fn count_by_user(&self, user_id: i64) -> Result<i64>;
    async fn count_by_city(&self, city_id: i64) -> Result<i64>;
    async fn list_ids_by_developer(&self, developer_id: i64) -> Result<Vec<i64>>;
    async fn list_ids_by_user(&self, user_id: i64) -> Result<Vec<i64>>;
    async fn list_ids_by_city(&self, city_id: i64) -> Result<Vec<i64>>;
}

pub struct ProjectRepositoryImpl {
    pool: MySqlPool,
}

impl ProjectRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn list_ids_where(&self, column: &str, value: i64) -> Result<Vec<i64>> {
        let rows: Vec<(i64,)> =
            sqlx::query_as(&format!("SELECT id FROM projects WHERE {column} = ?"))
                .bind(value)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn count_where(&self, column: &str, value: i64) -> Result<i64> {
        let row: (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM projects WHERE {column} = ?"))
                .bind(value)
                .fetch_one(&self.pool)
                .await?;
        Ok(row.0)
    }
}

const PROJECT_COLUMNS: &str =
    "id, name, description, developer_id, user_id, city_id, created_at, updated_at";

#[async_trait]
impl ProjectRepository for ProjectRepositoryImpl {
    async fn create(&self, input: &CreateProjectInput) -> Result<Project> {
        let result = sqlx::query(
            r#"
            INSERT INTO projects (name, description, developer_id, user_id, city_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.developer_id)
        .bind(input.user_id)
        .bind(input.city_id)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create project")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn update(&self, id: i64, input: &UpdateProjectInput) -> Result<Project> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))?;

        let name = input.name.as_deref().unwrap_or(&existing.name);
        let description = input.description.as_ref().or(existing.description.as_ref());
        let developer_id = input.developer_id.unwrap_or(existing.developer_id);
        let user_id = input.user_id.unwrap_or(existing.user_id);
        let city_id = input.city_id.unwrap_or(existing.city_id);

        sqlx::query(
            r#"
            UPDATE projects
            SET name = ?, description = ?, developer_id = ?, user_id = ?, city_id = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(developer_id)
        .bind(user_id)
        .bind(city_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update project")))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Project {} not found", id)));
        }

        Ok(())
    }

    async fn count_by_developer(&self, developer_id: i64) -> Result<i64> {
        self.count_where("developer_id", developer_id).await
    }

    async fn count_by_user(&self, user_id: i64) -> Result<i64> {
        self.count_where("user_id", user_id).await
    }

    async fn count_by_city(&self, city_id: i64) -> Result<i64> {
        self.count_where("city_id", city_id).await
    }

    async fn list_ids_by_developer(&self, developer_id: i64) -> Result<Vec<i64>> {
        self.list_ids_where("developer_id", developer_id).await
    }

    async fn list_ids_by_user(&self, user_id: i64) -> Result<Vec<i64>> {
        self.list_ids_where("user_id", user_id).await
    }

    async fn list_ids_by_city(&self, city_id: i64) -> Result<Vec<i64>> {
        self.list_ids_where("city_id", city_id).await
    }
}
