//! Estate Core - Real-estate Marketplace Backend
//!
//! This crate provides the backend for a role-gated real-estate marketplace:
//! a REST API over a relational domain graph of users, geography, developers,
//! projects, properties and images, with referential integrity enforced at
//! the service layer.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod repository;
pub mod server;
pub mod service;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
