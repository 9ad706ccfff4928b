//! Developer business logic

use crate::domain::{CreateDeveloperInput, Developer, UpdateDeveloperInput};
use crate::error::{AppError, Result};
use crate::repository::{
    DeveloperRepository, ImageRepository, ProjectRepository, PropertyRepository,
};
use crate::service::enforcement::{
    check_restrict, delete_project_tree, DeletePolicy, DeleteRules,
};
use std::sync::Arc;
use validator::Validate;

pub struct DeveloperService<D, J, P, I>
where
    D: DeveloperRepository,
    J: ProjectRepository,
    P: PropertyRepository,
    I: ImageRepository,
{
    repo: Arc<D>,
    project_repo: Arc<J>,
    property_repo: Arc<P>,
    image_repo: Arc<I>,
    rules: DeleteRules,
}

impl<D, J, P, I> DeveloperService<D, J, P, I>
where
    D: DeveloperRepository,
    J: ProjectRepository,
    P: PropertyRepository,
    I: ImageRepository,
{
    pub fn new(
        repo: Arc<D>,
        project_repo: Arc<J>,
        property_repo: Arc<P>,
        image_repo: Arc<I>,
        rules: DeleteRules,
    ) -> Self {
        Self {
            repo,
            project_repo,
            property_repo,
            image_repo,
            rules,
        }
    }

    pub async fn create(&self, input: CreateDeveloperInput) -> Result<Developer> {
        input.validate()?;
        self.repo.create(&input).await
    }

    pub async fn get(&self, id: i64) -> Result<Developer> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Developer {} not found", id)))
    }

    pub async fn list(&self, page: i64, per_page: i64) -> Result<(Vec<Developer>, i64)> {
        let offset = (page - 1) * per_page;
        let developers = self.repo.list(offset, per_page).await?;
        let total = self.repo.count().await?;
        Ok((developers, total))
    }

    pub async fn update(&self, id: i64, input: UpdateDeveloperInput) -> Result<Developer> {
        input.validate()?;
        let _ = self.get(id).await?;
        self.repo.update(id, &input).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let _ = self.get(id).await?;

        match self.rules.developer_projects {
            DeletePolicy::Restrict => {
                let count = self.project_repo.count_by_developer(id).await?;
                check_restrict(self.rules.developer_projects, count, "Developer", "Project")?;
            }
            DeletePolicy::Cascade => {
                for project_id in self.project_repo.list_ids_by_developer(id).await? {
                    delete_project_tree(
                        self.project_repo.as_ref(),
                        self.property_repo.as_ref(),
                        self.image_repo.as_ref(),
                        &self.rules,
                        project_id,
                    )
                    .await?;
                }
            }
        }

        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::developer::MockDeveloperRepository;
    use crate::repository::project::MockProjectRepository;
    use crate::repository::property::{MockImageRepository, MockPropertyRepository};
    use chrono::Utc;
    use mockall::predicate::*;

    fn sample_developer(id: i64) -> Developer {
        let now = Utc::now();
        Developer {
            id,
            name: "Acme Homes".to_string(),
            website: Some("https://acme.example.com".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    fn service_with(
        repo: MockDeveloperRepository,
        project_repo: MockProjectRepository,
        rules: DeleteRules,
    ) -> DeveloperService<
        MockDeveloperRepository,
        MockProjectRepository,
        MockPropertyRepository,
        MockImageRepository,
    > {
        DeveloperService::new(
            Arc::new(repo),
            Arc::new(project_repo),
            Arc::new(MockPropertyRepository::new()),
            Arc::new(MockImageRepository::new()),
            rules,
        )
    }

    #[tokio::test]
    async fn test_create_developer_invalid_website() {
        let service = service_with(
            MockDeveloperRepository::new(),
            MockProjectRepository::new(),
            DeleteRules::default(),
        );

        let result = service
            .create(CreateDeveloperInput {
                name: "Acme Homes".to_string(),
                website: Some("not a url".to_string()),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_developer_restricted_by_projects() {
        let mut repo = MockDeveloperRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(sample_developer(id))));
        repo.expect_delete().never();

        let mut project_repo = MockProjectRepository::new();
        project_repo
            .expect_count_by_developer()
            .with(eq(1))
            .returning(|_| Ok(3));

        let service = service_with(repo, project_repo, DeleteRules::default());
        let result = service.delete(1).await;

        assert!(matches!(
            result,
            Err(AppError::DependentRowsExist {
                entity: "Developer",
                dependent: "Project",
            })
        ));
    }

    #[tokio::test]
    async fn test_delete_developer_without_projects() {
        let mut repo = MockDeveloperRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(sample_developer(id))));
        repo.expect_delete().with(eq(1)).returning(|_| Ok(()));

        let mut project_repo = MockProjectRepository::new();
        project_repo
            .expect_count_by_developer()
            .with(eq(1))
            .returning(|_| Ok(0));

        let service = service_with(repo, project_repo, DeleteRules::default());
        assert!(service.delete(1).await.is_ok());
    }
}
