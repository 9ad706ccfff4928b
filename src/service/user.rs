//! User business logic

use crate::domain::{CreateUserInput, UpdateUserInput, User};
use crate::error::{AppError, Result};
use crate::repository::{ImageRepository, ProjectRepository, PropertyRepository, UserRepository};
use crate::service::enforcement::{
    check_restrict, delete_project_tree, delete_property_tree, DeletePolicy, DeleteRules,
};
use std::sync::Arc;
use validator::Validate;

pub struct UserService<U, P, J, I>
where
    U: UserRepository,
    P: PropertyRepository,
    J: ProjectRepository,
    I: ImageRepository,
{
    repo: Arc<U>,
    property_repo: Arc<P>,
    project_repo: Arc<J>,
    image_repo: Arc<I>,
    rules: DeleteRules,
}

impl<U, P, J, I> UserService<U, P, J, I>
where
    U: UserRepository,
    P: PropertyRepository,
    J: ProjectRepository,
    I: ImageRepository,
{
    pub fn new(
        repo: Arc<U>,
        property_repo: Arc<P>,
        project_repo: Arc<J>,
        image_repo: Arc<I>,
        rules: DeleteRules,
    ) -> Self {
        Self {
            repo,
            property_repo,
            project_repo,
            image_repo,
            rules,
        }
    }

    pub async fn create(&self, input: CreateUserInput) -> Result<User> {
        input.validate()?;

        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::UniqueConstraintViolation {
                field: "User.email",
            });
        }

        self.repo.create(&input).await
    }

    pub async fn get(&self, id: i64) -> Result<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    pub async fn list(&self, page: i64, per_page: i64) -> Result<(Vec<User>, i64)> {
        let offset = (page - 1) * per_page;
        let users = self.repo.list(offset, per_page).await?;
        let total = self.repo.count().await?;
        Ok((users, total))
    }

    pub async fn update(&self, id: i64, input: UpdateUserInput) -> Result<User> {
        input.validate()?;
        let existing = self.get(id).await?;

        // Uniqueness is re-checked only when the email is actually changing.
        if let Some(email) = &input.email {
            if *email != existing.email && self.repo.find_by_email(email).await?.is_some() {
                return Err(AppError::UniqueConstraintViolation {
                    field: "User.email",
                });
            }
        }

        self.repo.update(id, &input).await
    }

    /// Delete a user, honoring the configured policy for owned properties
    /// and created projects.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let _ = self.get(id).await?;

        match self.rules.user_properties {
            DeletePolicy::Restrict => {
                let count = self.property_repo.count_by_user(id).await?;
                check_restrict(self.rules.user_properties, count, "User", "Property")?;
            }
            DeletePolicy::Cascade => {
                for property_id in self.property_repo.list_ids_by_user(id).await? {
                    delete_property_tree(
                        self.property_repo.as_ref(),
                        self.image_repo.as_ref(),
                        &self.rules,
                        property_id,
                    )
                    .await?;
                }
            }
        }

        match self.rules.user_projects {
            DeletePolicy::Restrict => {
                let count = self.project_repo.count_by_user(id).await?;
                check_restrict(self.rules.user_projects, count, "User", "Project")?;
            }
            DeletePolicy::Cascade => {
                for project_id in self.project_repo.list_ids_by_user(id).await? {
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
    use crate::domain::Role;
    use crate::repository::project::MockProjectRepository;
    use crate::repository::property::{MockImageRepository, MockPropertyRepository};
    use crate::repository::user::MockUserRepository;
    use chrono::Utc;
    use mockall::predicate::*;

    fn sample_user(id: i64, email: &str) -> User {
        let now = Utc::now();
        User {
            id,
            name: Some("Sample".to_string()),
            email: email.to_string(),
            role: Role::Buyer,
            created_at: now,
            updated_at: now,
        }
    }

    fn service_with(
        repo: MockUserRepository,
        property_repo: MockPropertyRepository,
        project_repo: MockProjectRepository,
        rules: DeleteRules,
    ) -> UserService<
        MockUserRepository,
        MockPropertyRepository,
        MockProjectRepository,
        MockImageRepository,
    > {
        UserService::new(
            Arc::new(repo),
            Arc::new(property_repo),
            Arc::new(project_repo),
            Arc::new(MockImageRepository::new()),
            rules,
        )
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("ada@example.com"))
            .returning(|_| Ok(None));
        repo.expect_create()
            .returning(|input| Ok(sample_user(1, &input.email)));

        let service = service_with(
            repo,
            MockPropertyRepository::new(),
            MockProjectRepository::new(),
            DeleteRules::default(),
        );

        let result = service
            .create(CreateUserInput {
                name: Some("Ada".to_string()),
                email: "ada@example.com".to_string(),
                role: Role::Seller,
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(sample_user(1, email))));

        let service = service_with(
            repo,
            MockPropertyRepository::new(),
            MockProjectRepository::new(),
            DeleteRules::default(),
        );

        let result = service
            .create(CreateUserInput {
                name: None,
                email: "dup@example.com".to_string(),
                role: Role::Buyer,
            })
            .await;

        assert!(matches!(
            result,
            Err(AppError::UniqueConstraintViolation {
                field: "User.email",
            })
        ));
    }

    #[tokio::test]
    async fn test_create_user_invalid_email() {
        let service = service_with(
            MockUserRepository::new(),
            MockPropertyRepository::new(),
            MockProjectRepository::new(),
            DeleteRules::default(),
        );

        let result = service
            .create(CreateUserInput {
                name: None,
                email: "not-an-email".to_string(),
                role: Role::Buyer,
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().with(eq(42)).returning(|_| Ok(None));

        let service = service_with(
            repo,
            MockPropertyRepository::new(),
            MockProjectRepository::new(),
            DeleteRules::default(),
        );

        let result = service.get(42).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_user_unchanged_email_is_not_revalidated() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(sample_user(id, "same@example.com"))));
        // No find_by_email expectation: submitting the current email must
        // not trigger a uniqueness probe.
        repo.expect_update()
            .returning(|id, _| Ok(sample_user(id, "same@example.com")));

        let service = service_with(
            repo,
            MockPropertyRepository::new(),
            MockProjectRepository::new(),
            DeleteRules::default(),
        );

        let result = service
            .update(
                1,
                UpdateUserInput {
                    name: Some("Renamed".to_string()),
                    email: Some("same@example.com".to_string()),
                    role: None,
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_user_changed_email_collision() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(sample_user(id, "old@example.com"))));
        repo.expect_find_by_email()
            .with(eq("taken@example.com"))
            .returning(|email| Ok(Some(sample_user(2, email))));

        let service = service_with(
            repo,
            MockPropertyRepository::new(),
            MockProjectRepository::new(),
            DeleteRules::default(),
        );

        let result = service
            .update(
                1,
                UpdateUserInput {
                    name: None,
                    email: Some("taken@example.com".to_string()),
                    role: None,
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::UniqueConstraintViolation {
                field: "User.email",
            })
        ));
    }

    #[tokio::test]
    async fn test_delete_user_restricted_by_properties() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(sample_user(id, "a@example.com"))));
        repo.expect_delete().never();

        let mut property_repo = MockPropertyRepository::new();
        property_repo
            .expect_count_by_user()
            .with(eq(1))
            .returning(|_| Ok(2));

        let service = service_with(
            repo,
            property_repo,
            MockProjectRepository::new(),
            DeleteRules::default(),
        );

        let result = service.delete(1).await;
        assert!(matches!(
            result,
            Err(AppError::DependentRowsExist {
                entity: "User",
                dependent: "Property",
            })
        ));
    }

    #[tokio::test]
    async fn test_delete_user_cascades_properties_and_projects() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(sample_user(id, "a@example.com"))));
        repo.expect_delete().with(eq(1)).returning(|_| Ok(()));

        let mut property_repo = MockPropertyRepository::new();
        property_repo
            .expect_list_ids_by_user()
            .with(eq(1))
            .returning(|_| Ok(vec![10]));
        property_repo
            .expect_list_ids_by_project()
            .with(eq(20))
            .returning(|_| Ok(vec![]));
        property_repo.expect_delete().with(eq(10)).returning(|_| Ok(()));

        let mut project_repo = MockProjectRepository::new();
        project_repo
            .expect_list_ids_by_user()
            .with(eq(1))
            .returning(|_| Ok(vec![20]));
        project_repo.expect_delete().with(eq(20)).returning(|_| Ok(()));

        let mut image_repo = MockImageRepository::new();
        image_repo
            .expect_delete_by_property()
            .with(eq(10))
            .returning(|_| Ok(1));

        let service = UserService::new(
            Arc::new(repo),
            Arc::new(property_repo),
            Arc::new(project_repo),
            Arc::new(image_repo),
            DeleteRules::cascade_all(),
        );

        let result = service.delete(1).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_user_without_children_succeeds_under_restrict() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(sample_user(id, "a@example.com"))));
        repo.expect_delete().with(eq(1)).returning(|_| Ok(()));

        let mut property_repo = MockPropertyRepository::new();
        property_repo
            .expect_count_by_user()
            .with(eq(1))
            .returning(|_| Ok(0));

        let mut project_repo = MockProjectRepository::new();
        project_repo
            .expect_count_by_user()
            .with(eq(1))
            .returning(|_| Ok(0));

        let service = service_with(repo, property_repo, project_repo, DeleteRules::default());

        let result = service.delete(1).await;
        assert!(result.is_ok());
    }
}
