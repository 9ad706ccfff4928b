//! Persistence layer: one repository trait + sqlx implementation per entity

pub mod developer;
pub mod geo;
pub mod project;
pub mod property;
pub mod user;

pub use developer::{DeveloperRepository, DeveloperRepositoryImpl};
pub use geo::{
    CityRepository, CityRepositoryImpl, CountryRepository, CountryRepositoryImpl,
    StateRepository, StateRepositoryImpl,
};
pub use project::{ProjectRepository, ProjectRepositoryImpl};
pub use property::{
    ImageRepository, ImageRepositoryImpl, PropertyRepository, PropertyRepositoryImpl,
};
pub use user::{UserRepository, UserRepositoryImpl};
