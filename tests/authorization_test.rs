//! Route-group authorization gate tests
//!
//! Exercises the identity middleware and role gates over a router shaped
//! like the production one, with stub handlers so no database is needed.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use estate_core::middleware::{
    identity_context_middleware, require_role, RoleGuard, ROLE_HEADER,
};
use serde_json::json;
use tower::ServiceExt;

async fn ok_handler() -> &'static str {
    "ok"
}

/// Router with the production gate layout over stub handlers.
fn gated_app() -> Router {
    let admin_routes = Router::new()
        .route("/api/v1/countries", post(ok_handler))
        .route("/api/v1/users", post(ok_handler))
        .layer(from_fn_with_state(RoleGuard::admin(), require_role));

    let seller_routes = Router::new()
        .route("/api/v1/properties", post(ok_handler))
        .route("/api/v1/projects", post(ok_handler))
        .layer(from_fn_with_state(RoleGuard::sellers(), require_role));

    let read_routes = Router::new()
        .route("/api/v1/properties", get(ok_handler))
        .route("/api/v1/countries", get(ok_handler))
        .layer(from_fn_with_state(RoleGuard::any_user(), require_role));

    Router::new()
        .route("/health", get(ok_handler))
        .merge(admin_routes)
        .merge(seller_routes)
        .merge(read_routes)
        .layer(from_fn(identity_context_middleware))
}

async fn request(method: Method, uri: &str, role: Option<&str>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = role {
        builder = builder.header(ROLE_HEADER, value);
    }
    let response = gated_app()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_admin_passes_admin_gate() {
    let (status, _) = request(Method::POST, "/api/v1/countries", Some("ADMIN")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_seller_rejected_by_admin_gate() {
    let (status, _) = request(Method::POST, "/api/v1/countries", Some("SELLER")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_buyer_rejected_by_admin_gate() {
    let (status, _) = request(Method::POST, "/api/v1/users", Some("BUYER")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_seller_passes_seller_gate() {
    let (status, _) = request(Method::POST, "/api/v1/properties", Some("SELLER")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_passes_seller_gate() {
    let (status, _) = request(Method::POST, "/api/v1/projects", Some("ADMIN")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_buyer_rejected_by_seller_gate() {
    let (status, _) = request(Method::POST, "/api/v1/properties", Some("BUYER")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_every_role_passes_read_gate() {
    for role in ["BUYER", "SELLER", "ADMIN"] {
        let (status, _) = request(Method::GET, "/api/v1/properties", Some(role)).await;
        assert_eq!(status, StatusCode::OK, "role {} must read", role);
    }
}

#[tokio::test]
async fn test_absent_role_rejected_everywhere() {
    for (method, uri) in [
        (Method::POST, "/api/v1/countries"),
        (Method::POST, "/api/v1/properties"),
        (Method::GET, "/api/v1/properties"),
    ] {
        let (status, _) = request(method, uri, None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn test_unknown_role_literal_fails_closed() {
    // Literals outside the closed role set are treated as no role at all.
    for role in ["AGENT", "USER", "superadmin", ""] {
        let (status, _) = request(Method::GET, "/api/v1/countries", Some(role)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "literal {:?}", role);
    }
}

#[tokio::test]
async fn test_rejection_body_is_the_fixed_contract() {
    let (status, body) = request(Method::POST, "/api/v1/users", Some("SELLER")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        body,
        json!({ "error": "Unauthorized: Insufficient permissions" })
    );
}

#[tokio::test]
async fn test_health_is_not_gated() {
    let (status, _) = request(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}
