//! Domain models for Estate Core

pub mod developer;
pub mod geo;
pub mod project;
pub mod property;
pub mod role;
pub mod user;

pub use developer::*;
pub use geo::*;
pub use project::*;
pub use property::*;
pub use role::*;
pub use user::*;
