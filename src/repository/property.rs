//! Property and image repositories

use crate::domain::{
    CreateImageInput, CreatePropertyInput, Image, Property, UpdatePropertyInput,
};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn create(&self, input: &CreatePropertyInput) -> Result<Property>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Property>>;
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Property>>;
    async fn list_by_project(&self, project_id: i64) -> Result<Vec<Property>>;
    async fn count(&self) -> Result<i64>;
    async fn update(&self, id: i64, input: &UpdatePropertyInput) -> Result<Property>;
    async fn delete(&self, id: i64) -> Result<()>;

    // Dependent-row lookups for delete enforcement
    async fn count_by_user(&self, user_id: i64) -> Result<i64>;
    async fn count_by_city(&self, city_id: i64) -> Result<i64>;
    async fn count_by_project(&self, project_id: i64) -> Result<i64>;
    async fn list_ids_by_user(&self, user_id: i64) -> Result<Vec<i64>>;
    async fn list_ids_by_city(&self, city_id: i64) -> Result<Vec<i64>>;
    async fn list_ids_by_project(&self, project_id: i64) -> Result<Vec<i64>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn create(&self, input: &CreateImageInput) -> Result<Image>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Image>>;
    async fn list_by_property(&self, property_id: i64) -> Result<Vec<Image>>;
    async fn count_by_property(&self, property_id: i64) -> Result<i64>;
    async fn delete(&self, id: i64) -> Result<()>;
    async fn delete_by_property(&self, property_id: i64) -> Result<u64>;
}

pub struct PropertyRepositoryImpl {
    pool: MySqlPool,
}

impl PropertyRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn list_ids_where(&self, column: &str, value: i64) -> Result<Vec<i64>> {
        let rows: Vec<(i64,)> =
            sqlx::query_as(&format!("SELECT id FROM properties WHERE {column} = ?"))
                .bind(value)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn count_where(&self, column: &str, value: i64) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(&format!(
            "SELECT COUNT(*) FROM properties WHERE {column} = ?"
        ))
        .bind(value)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0)
    }
}

const PROPERTY_COLUMNS: &str =
    "id, title, description, price, user_id, city_id, project_id, created_at, updated_at";

#[async_trait]
impl PropertyRepository for PropertyRepositoryImpl {
    async fn create(&self, input: &CreatePropertyInput) -> Result<Property> {
        let result = sqlx::query(
            r#"
            INSERT INTO properties (title, description, price, user_id, city_id, project_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.user_id)
        .bind(input.city_id)
        .bind(input.project_id)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create property")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Property>> {
        let property = sqlx::query_as::<_, Property>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(property)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Property>> {
        let properties = sqlx::query_as::<_, Property>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties ORDER BY created_at DESC LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }

    async fn list_by_project(&self, project_id: i64) -> Result<Vec<Property>> {
        let properties = sqlx::query_as::<_, Property>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE project_id = ? ORDER BY created_at DESC"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM properties")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn update(&self, id: i64, input: &UpdatePropertyInput) -> Result<Property> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Property {} not found", id)))?;

        let title = input.title.as_deref().unwrap_or(&existing.title);
        let description = input.description.as_ref().or(existing.description.as_ref());
        let price = input.price.unwrap_or(existing.price);
        let user_id = input.user_id.unwrap_or(existing.user_id);
        let city_id = input.city_id.unwrap_or(existing.city_id);
        // Tri-state: absent keeps the current value, explicit null detaches.
        let project_id = match input.project_id {
            Some(value) => value,
            None => existing.project_id,
        };

        sqlx::query(
            r#"
            UPDATE properties
            SET title = ?, description = ?, price = ?, user_id = ?, city_id = ?, project_id = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(price)
        .bind(user_id)
        .bind(city_id)
        .bind(project_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update property")))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM properties WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Property {} not found", id)));
        }

        Ok(())
    }

    async fn count_by_user(&self, user_id: i64) -> Result<i64> {
        self.count_where("user_id", user_id).await
    }

    async fn count_by_city(&self, city_id: i64) -> Result<i64> {
        self.count_where("city_id", city_id).await
    }

    async fn count_by_project(&self, project_id: i64) -> Result<i64> {
        self.count_where("project_id", project_id).await
    }

    async fn list_ids_by_user(&self, user_id: i64) -> Result<Vec<i64>> {
        self.list_ids_where("user_id", user_id).await
    }

    async fn list_ids_by_city(&self, city_id: i64) -> Result<Vec<i64>> {
        self.list_ids_where("city_id", city_id).await
    }

    async fn list_ids_by_project(&self, project_id: i64) -> Result<Vec<i64>> {
        self.list_ids_where("project_id", project_id).await
    }
}

pub struct ImageRepositoryImpl {
    pool: MySqlPool,
}

impl ImageRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRepository for ImageRepositoryImpl {
    async fn create(&self, input: &CreateImageInput) -> Result<Image> {
        let result = sqlx::query(
            "INSERT INTO images (url, property_id, created_at) VALUES (?, ?, NOW())",
        )
        .bind(&input.url)
        .bind(input.property_id)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create image")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Image>> {
        let image = sqlx::query_as::<_, Image>(
            "SELECT id, url, property_id, created_at FROM images WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(image)
    }

    async fn list_by_property(&self, property_id: i64) -> Result<Vec<Image>> {
        let images = sqlx::query_as::<_, Image>(
            "SELECT id, url, property_id, created_at FROM images WHERE property_id = ? ORDER BY id",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    async fn count_by_property(&self, property_id: i64) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM images WHERE property_id = ?")
            .bind(property_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM images WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Image {} not found", id)));
        }

        Ok(())
    }

    async fn delete_by_property(&self, property_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM images WHERE property_id = ?")
            .bind(property_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
