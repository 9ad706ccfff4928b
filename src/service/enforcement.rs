//! Shared invariant-enforcement helpers
//!
//! Every mutation in the graph runs through the same three checks:
//! mandatory foreign keys must reference existing rows, unique fields must
//! not collide, and deletes must honor the per-relationship policy below.
//! The database schema enforces the same invariants atomically under
//! concurrency; these helpers exist to surface typed, named conditions
//! before the engine's own constraint errors.

use crate::error::{AppError, Result};
use crate::repository::{ImageRepository, ProjectRepository, PropertyRepository};

/// What happens to dependent children when their parent row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Reject the delete while dependent rows exist.
    Restrict,
    /// Remove dependent rows (and their own children) with the parent.
    Cascade,
}

/// Per-relationship delete policy for the whole graph.
///
/// One field per parent/child pair in the domain. Defaults are `Restrict`
/// everywhere except property images, which cannot outlive their property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteRules {
    pub country_states: DeletePolicy,
    pub state_cities: DeletePolicy,
    pub city_properties: DeletePolicy,
    pub city_projects: DeletePolicy,
    pub developer_projects: DeletePolicy,
    pub user_properties: DeletePolicy,
    pub user_projects: DeletePolicy,
    pub project_properties: DeletePolicy,
    pub property_images: DeletePolicy,
}

impl Default for DeleteRules {
    fn default() -> Self {
        Self {
            country_states: DeletePolicy::Restrict,
            state_cities: DeletePolicy::Restrict,
            city_properties: DeletePolicy::Restrict,
            city_projects: DeletePolicy::Restrict,
            developer_projects: DeletePolicy::Restrict,
            user_properties: DeletePolicy::Restrict,
            user_projects: DeletePolicy::Restrict,
            project_properties: DeletePolicy::Restrict,
            property_images: DeletePolicy::Cascade,
        }
    }
}

impl DeleteRules {
    /// Cascade everywhere. Used by embedders that want prune semantics.
    pub fn cascade_all() -> Self {
        Self {
            country_states: DeletePolicy::Cascade,
            state_cities: DeletePolicy::Cascade,
            city_properties: DeletePolicy::Cascade,
            city_projects: DeletePolicy::Cascade,
            developer_projects: DeletePolicy::Cascade,
            user_properties: DeletePolicy::Cascade,
            user_projects: DeletePolicy::Cascade,
            project_properties: DeletePolicy::Cascade,
            property_images: DeletePolicy::Cascade,
        }
    }
}

/// Under `Restrict`, a non-zero dependent count rejects the delete.
/// Under `Cascade` the caller proceeds to remove the children.
pub(crate) fn check_restrict(
    policy: DeletePolicy,
    dependents: i64,
    entity: &'static str,
    dependent: &'static str,
) -> Result<()> {
    if policy == DeletePolicy::Restrict && dependents > 0 {
        return Err(AppError::DependentRowsExist { entity, dependent });
    }
    Ok(())
}

/// Delete a property together with its images, per `rules.property_images`.
pub(crate) async fn delete_property_tree<P, I>(
    properties: &P,
    images: &I,
    rules: &DeleteRules,
    property_id: i64,
) -> Result<()>
where
    P: PropertyRepository,
    I: ImageRepository,
{
    match rules.property_images {
        DeletePolicy::Restrict => {
            let count = images.count_by_property(property_id).await?;
            check_restrict(rules.property_images, count, "Property", "Image")?;
        }
        DeletePolicy::Cascade => {
            images.delete_by_property(property_id).await?;
        }
    }

    properties.delete(property_id).await
}

/// Delete a project together with its properties, per
/// `rules.project_properties`. Cascaded properties take their images along.
pub(crate) async fn delete_project_tree<J, P, I>(
    projects: &J,
    properties: &P,
    images: &I,
    rules: &DeleteRules,
    project_id: i64,
) -> Result<()>
where
    J: ProjectRepository,
    P: PropertyRepository,
    I: ImageRepository,
{
    match rules.project_properties {
        DeletePolicy::Restrict => {
            let count = properties.count_by_project(project_id).await?;
            check_restrict(rules.project_properties, count, "Project", "Property")?;
        }
        DeletePolicy::Cascade => {
            for property_id in properties.list_ids_by_project(project_id).await? {
                delete_property_tree(properties, images, rules, property_id).await?;
            }
        }
    }

    projects.delete(project_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::project::MockProjectRepository;
    use crate::repository::property::{MockImageRepository, MockPropertyRepository};
    use mockall::predicate::*;
    use tokio_test::assert_ok;

    #[test]
    fn test_check_restrict_rejects_dependents() {
        let result = check_restrict(DeletePolicy::Restrict, 3, "City", "Property");
        assert!(matches!(
            result,
            Err(AppError::DependentRowsExist {
                entity: "City",
                dependent: "Property",
            })
        ));
    }

    #[test]
    fn test_check_restrict_allows_childless_delete() {
        assert!(check_restrict(DeletePolicy::Restrict, 0, "City", "Property").is_ok());
    }

    #[test]
    fn test_check_restrict_is_noop_under_cascade() {
        assert!(check_restrict(DeletePolicy::Cascade, 10, "City", "Property").is_ok());
    }

    #[test]
    fn test_default_rules() {
        let rules = DeleteRules::default();
        assert_eq!(rules.city_properties, DeletePolicy::Restrict);
        assert_eq!(rules.property_images, DeletePolicy::Cascade);
    }

    #[tokio::test]
    async fn test_delete_property_tree_cascades_images() {
        let mut properties = MockPropertyRepository::new();
        let mut images = MockImageRepository::new();

        images
            .expect_delete_by_property()
            .with(eq(5))
            .returning(|_| Ok(2));
        properties.expect_delete().with(eq(5)).returning(|_| Ok(()));

        let rules = DeleteRules::default();
        assert_ok!(delete_property_tree(&properties, &images, &rules, 5).await);
    }

    #[tokio::test]
    async fn test_delete_property_tree_restricts_on_images() {
        let properties = MockPropertyRepository::new();
        let mut images = MockImageRepository::new();

        images
            .expect_count_by_property()
            .with(eq(5))
            .returning(|_| Ok(1));

        let rules = DeleteRules {
            property_images: DeletePolicy::Restrict,
            ..DeleteRules::default()
        };

        let result = delete_property_tree(&properties, &images, &rules, 5).await;
        assert!(matches!(
            result,
            Err(AppError::DependentRowsExist {
                entity: "Property",
                dependent: "Image",
            })
        ));
    }

    #[tokio::test]
    async fn test_delete_project_tree_restricts_on_properties() {
        let mut projects = MockProjectRepository::new();
        let mut properties = MockPropertyRepository::new();
        let images = MockImageRepository::new();

        properties
            .expect_count_by_project()
            .with(eq(9))
            .returning(|_| Ok(4));
        projects.expect_delete().never();

        let rules = DeleteRules::default();
        let result = delete_project_tree(&projects, &properties, &images, &rules, 9).await;
        assert!(matches!(
            result,
            Err(AppError::DependentRowsExist {
                entity: "Project",
                dependent: "Property",
            })
        ));
    }

    #[tokio::test]
    async fn test_delete_project_tree_cascades_through_properties() {
        let mut projects = MockProjectRepository::new();
        let mut properties = MockPropertyRepository::new();
        let mut images = MockImageRepository::new();

        properties
            .expect_list_ids_by_project()
            .with(eq(9))
            .returning(|_| Ok(vec![1, 2]));
        images
            .expect_delete_by_property()
            .times(2)
            .returning(|_| Ok(0));
        properties.expect_delete().times(2).returning(|_| Ok(()));
        projects.expect_delete().with(eq(9)).returning(|_| Ok(()));

        let rules = DeleteRules {
            project_properties: DeletePolicy::Cascade,
            ..DeleteRules::default()
        };

        assert_ok!(delete_project_tree(&projects, &properties, &images, &rules, 9).await);
    }
}
