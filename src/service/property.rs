//! Property and image business logic

use crate::domain::{
    CreateImageInput, CreatePropertyInput, Image, Property, UpdatePropertyInput,
};
use crate::error::{AppError, Result};
use crate::repository::{
    CityRepository, ImageRepository, ProjectRepository, PropertyRepository, UserRepository,
};
use crate::service::enforcement::{delete_property_tree, DeleteRules};
use std::sync::Arc;
use validator::Validate;

pub struct PropertyService<P, U, Ci, J, I>
where
    P: PropertyRepository,
    U: UserRepository,
    Ci: CityRepository,
    J: ProjectRepository,
    I: ImageRepository,
{
    repo: Arc<P>,
    user_repo: Arc<U>,
    city_repo: Arc<Ci>,
    project_repo: Arc<J>,
    image_repo: Arc<I>,
    rules: DeleteRules,
}

impl<P, U, Ci, J, I> PropertyService<P, U, Ci, J, I>
where
    P: PropertyRepository,
    U: UserRepository,
    Ci: CityRepository,
    J: ProjectRepository,
    I: ImageRepository,
{
    pub fn new(
        repo: Arc<P>,
        user_repo: Arc<U>,
        city_repo: Arc<Ci>,
        project_repo: Arc<J>,
        image_repo: Arc<I>,
        rules: DeleteRules,
    ) -> Self {
        Self {
            repo,
            user_repo,
            city_repo,
            project_repo,
            image_repo,
            rules,
        }
    }

    async fn check_user(&self, id: i64) -> Result<()> {
        if self.user_repo.find_by_id(id).await?.is_none() {
            return Err(AppError::ReferenceNotFound { entity: "User", id });
        }
        Ok(())
    }

    async fn check_city(&self, id: i64) -> Result<()> {
        if self.city_repo.find_by_id(id).await?.is_none() {
            return Err(AppError::ReferenceNotFound { entity: "City", id });
        }
        Ok(())
    }

    async fn check_project(&self, id: i64) -> Result<()> {
        if self.project_repo.find_by_id(id).await?.is_none() {
            return Err(AppError::ReferenceNotFound {
                entity: "Project",
                id,
            });
        }
        Ok(())
    }

    pub async fn create(&self, input: CreatePropertyInput) -> Result<Property> {
        input.validate()?;

        self.check_user(input.user_id).await?;
        self.check_city(input.city_id).await?;
        // project_id is the one optional link: absent is valid, present must resolve.
        if let Some(project_id) = input.project_id {
            self.check_project(project_id).await?;
        }

        self.repo.create(&input).await
    }

    pub async fn get(&self, id: i64) -> Result<Property> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Property {} not found", id)))
    }

    pub async fn list(&self, page: i64, per_page: i64) -> Result<(Vec<Property>, i64)> {
        let offset = (page - 1) * per_page;
        let properties = self.repo.list(offset, per_page).await?;
        let total = self.repo.count().await?;
        Ok((properties, total))
    }

    /// Only the fields present in the input are re-verified. `project_id`
    /// is tri-state: absent keeps the link, null detaches, a value must
    /// resolve to an existing project.
    pub async fn update(&self, id: i64, input: UpdatePropertyInput) -> Result<Property> {
        input.validate()?;
        let _ = self.get(id).await?;

        if let Some(user_id) = input.user_id {
            self.check_user(user_id).await?;
        }
        if let Some(city_id) = input.city_id {
            self.check_city(city_id).await?;
        }
        if let Some(Some(project_id)) = input.project_id {
            self.check_project(project_id).await?;
        }

        self.repo.update(id, &input).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let _ = self.get(id).await?;

        delete_property_tree(self.repo.as_ref(), self.image_repo.as_ref(), &self.rules, id).await
    }

    pub async fn add_image(&self, input: CreateImageInput) -> Result<Image> {
        input.validate()?;

        if self.repo.find_by_id(input.property_id).await?.is_none() {
            return Err(AppError::ReferenceNotFound {
                entity: "Property",
                id: input.property_id,
            });
        }

        self.image_repo.create(&input).await
    }

    pub async fn list_images(&self, property_id: i64) -> Result<Vec<Image>> {
        let _ = self.get(property_id).await?;
        self.image_repo.list_by_property(property_id).await
    }

    pub async fn delete_image(&self, id: i64) -> Result<()> {
        self.image_repo.delete(id).await
    }
}
