//! Identity context middleware
//!
//! An upstream identity collaborator authenticates each request and attaches
//! the caller's role as the `x-auth-role` header. This middleware lifts that
//! value into a typed `RoleContext` request extension so downstream gates
//! never re-parse headers. How the role was derived (token format, session
//! store) is outside this service.

use axum::{body::Body, http::Request, middleware::Next, response::Response};

use crate::domain::Role;

/// Header the upstream identity collaborator sets on authenticated requests.
pub const ROLE_HEADER: &str = "x-auth-role";

/// Caller role resolved for the current request.
///
/// `None` covers every degraded case: header missing, undecodable, or
/// carrying a literal outside the closed role set. All of them evaluate as
/// "no role" at the gate, never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleContext(pub Option<Role>);

/// Attach the caller's role (if any) to the request extensions.
pub async fn identity_context_middleware(mut request: Request<Body>, next: Next) -> Response {
    let role = request
        .headers()
        .get(ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(Role::parse);

    request.extensions_mut().insert(RoleContext(role));
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Extension, Router};
    use tower::ServiceExt;

    async fn echo_role(Extension(ctx): Extension<RoleContext>) -> String {
        match ctx.0 {
            Some(role) => role.to_string(),
            None => "none".to_string(),
        }
    }

    fn test_app() -> Router {
        Router::new()
            .route("/whoami", get(echo_role))
            .layer(axum::middleware::from_fn(identity_context_middleware))
    }

    #[tokio::test]
    async fn test_role_header_is_lifted_into_extension() {
        let request = Request::builder()
            .uri("/whoami")
            .header(ROLE_HEADER, "SELLER")
            .body(Body::empty())
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"SELLER");
    }

    #[tokio::test]
    async fn test_missing_header_yields_absent_role() {
        let request = Request::builder()
            .uri("/whoami")
            .body(Body::empty())
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"none");
    }

    #[tokio::test]
    async fn test_unknown_role_literal_yields_absent_role() {
        let request = Request::builder()
            .uri("/whoami")
            .header(ROLE_HEADER, "AGENT")
            .body(Body::empty())
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"none");
    }
}
