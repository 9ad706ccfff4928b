//! Role enforcement middleware
//!
//! A `RoleGuard` is configured with the set of roles permitted to reach a
//! route group. Evaluation is a pure membership check against the
//! `RoleContext` placed by the identity middleware; rejected requests are
//! short-circuited with 403 and never reach the downstream handler.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::Role;
use crate::middleware::identity::RoleContext;

/// Required-role set for a group of protected operations.
///
/// One parameterized factory produces every gate variant; the named
/// constructors below are the instantiations the router actually mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGuard {
    required: &'static [Role],
}

impl RoleGuard {
    /// Build a gate from a non-empty required-role set.
    pub const fn new(required: &'static [Role]) -> Self {
        assert!(!required.is_empty(), "a gate must require at least one role");
        Self { required }
    }

    /// Top-privilege gate: platform administration (users, geography,
    /// developers).
    pub const fn admin() -> Self {
        Self::new(&[Role::Admin])
    }

    /// Mid-privilege gate: listing management (properties, projects, images).
    pub const fn sellers() -> Self {
        Self::new(&[Role::Seller, Role::Admin])
    }

    /// Broad gate: any authenticated marketplace user.
    pub const fn any_user() -> Self {
        Self::new(&[Role::Buyer, Role::Seller, Role::Admin])
    }

    /// Pure decision function: allow iff a role is present and is a member
    /// of the required set. Absence and mismatch are both ordinary denials.
    pub fn allows(&self, role: Option<Role>) -> bool {
        match role {
            Some(role) => self.required.contains(&role),
            None => false,
        }
    }

    /// The roles this gate accepts.
    pub fn required_roles(&self) -> &'static [Role] {
        self.required
    }
}

/// Gate middleware. Mounted per route group via
/// `axum::middleware::from_fn_with_state(guard, require_role)`.
pub async fn require_role(
    State(guard): State<RoleGuard>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // A missing extension means the identity middleware did not run; treat
    // it the same as an absent role.
    let role = request
        .extensions()
        .get::<RoleContext>()
        .and_then(|ctx| ctx.0);

    if !guard.allows(role) {
        return forbidden_response();
    }

    next.run(request).await
}

/// The fixed rejection response required at the service boundary.
fn forbidden_response() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "Unauthorized: Insufficient permissions"
        })),
    )
        .into_response()
}
