//! Project business logic

use crate::domain::{CreateProjectInput, Project, Property, UpdateProjectInput};
use crate::error::{AppError, Result};
use crate::repository::{
    CityRepository, DeveloperRepository, ImageRepository, ProjectRepository, PropertyRepository,
    UserRepository,
};
use crate::service::enforcement::{delete_project_tree, DeleteRules};
use std::sync::Arc;
use validator::Validate;

pub struct ProjectService<J, D, U, Ci, P, I>
where
    J: ProjectRepository,
    D: DeveloperRepository,
    U: UserRepository,
    Ci: CityRepository,
    P: PropertyRepository,
    I: ImageRepository,
{
    repo: Arc<J>,
    developer_repo: Arc<D>,
    user_repo: Arc<U>,
    city_repo: Arc<Ci>,
    property_repo: Arc<P>,
    image_repo: Arc<I>,
    rules: DeleteRules,
}

impl<J, D, U, Ci, P, I> ProjectService<J, D, U, Ci, P, I>
where
    J: ProjectRepository,
    D: DeveloperRepository,
    U: UserRepository,
    Ci: CityRepository,
    P: PropertyRepository,
    I: ImageRepository,
{
    pub fn new(
        repo: Arc<J>,
        developer_repo: Arc<D>,
        user_repo: Arc<U>,
        city_repo: Arc<Ci>,
        property_repo: Arc<P>,
        image_repo: Arc<I>,
        rules: DeleteRules,
    ) -> Self {
        Self {
            repo,
            developer_repo,
            user_repo,
            city_repo,
            property_repo,
            image_repo,
            rules,
        }
    }

    async fn check_developer(&self, id: i64) -> Result<()> {
        if self.developer_repo.find_by_id(id).await?.is_none() {
            return Err(AppError::ReferenceNotFound {
                entity: "Developer",
                id,
            });
        }
        Ok(())
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

    pub async fn create(&self, input: CreateProjectInput) -> Result<Project> {
        input.validate()?;

        self.check_developer(input.developer_id).await?;
        self.check_user(input.user_id).await?;
        self.check_city(input.city_id).await?;

        self.repo.create(&input).await
    }

    pub async fn get(&self, id: i64) -> Result<Project> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    pub async fn list(&self, page: i64, per_page: i64) -> Result<(Vec<Project>, i64)> {
        let offset = (page - 1) * per_page;
        let projects = self.repo.list(offset, per_page).await?;
        let total = self.repo.count().await?;
        Ok((projects, total))
    }

    pub async fn list_properties(&self, id: i64) -> Result<Vec<Property>> {
        let _ = self.get(id).await?;
        self.property_repo.list_by_project(id).await
    }

    /// Only the foreign keys actually present in the input are re-verified.
    pub async fn update(&self, id: i64, input: UpdateProjectInput) -> Result<Project> {
        input.validate()?;
        let _ = self.get(id).await?;

        if let Some(developer_id) = input.developer_id {
            self.check_developer(developer_id).await?;
        }
        if let Some(user_id) = input.user_id {
            self.check_user(user_id).await?;
        }
        if let Some(city_id) = input.city_id {
            self.check_city(city_id).await?;
        }

        self.repo.update(id, &input).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let _ = self.get(id).await?;

        delete_project_tree(
            self.repo.as_ref(),
            self.property_repo.as_ref(),
            self.image_repo.as_ref(),
            &self.rules,
            id,
        )
        .await
    }
}
