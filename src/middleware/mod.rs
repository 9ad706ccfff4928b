//! HTTP middleware for Estate Core
//!
//! - Identity context: lifts the upstream-attached role into the request
//! - Role enforcement: per-route-group authorization gate

pub mod identity;
pub mod require_role;

pub use identity::{identity_context_middleware, RoleContext, ROLE_HEADER};
pub use require_role::{require_role, RoleGuard};
