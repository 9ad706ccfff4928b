//! Business logic layer
//!
//! Services are generic over the repository traits so the invariant checks
//! can be tested against mocks without a database.

pub mod developer;
pub mod enforcement;
pub mod geo;
pub mod project;
pub mod property;
pub mod user;

pub use developer::DeveloperService;
pub use enforcement::{DeletePolicy, DeleteRules};
pub use geo::GeoService;
pub use project::ProjectService;
pub use property::PropertyService;
pub use user::UserService;
