//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::middleware::{identity_context_middleware, require_role, RoleGuard};
use crate::repository::{
    CityRepositoryImpl, CountryRepositoryImpl, DeveloperRepositoryImpl, ImageRepositoryImpl,
    ProjectRepositoryImpl, PropertyRepositoryImpl, StateRepositoryImpl, UserRepositoryImpl,
};
use crate::service::{
    DeveloperService, GeoService, ProjectService, PropertyService, UserService,
};
use anyhow::Result;
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Router,
};
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    pub user_service: Arc<
        UserService<
            UserRepositoryImpl,
            PropertyRepositoryImpl,
            ProjectRepositoryImpl,
            ImageRepositoryImpl,
        >,
    >,
    pub geo_service: Arc<
        GeoService<
            CountryRepositoryImpl,
            StateRepositoryImpl,
            CityRepositoryImpl,
            PropertyRepositoryImpl,
            ProjectRepositoryImpl,
            ImageRepositoryImpl,
        >,
    >,
    pub developer_service: Arc<
        DeveloperService<
            DeveloperRepositoryImpl,
            ProjectRepositoryImpl,
            PropertyRepositoryImpl,
            ImageRepositoryImpl,
        >,
    >,
    pub project_service: Arc<
        ProjectService<
            ProjectRepositoryImpl,
            DeveloperRepositoryImpl,
            UserRepositoryImpl,
            CityRepositoryImpl,
            PropertyRepositoryImpl,
            ImageRepositoryImpl,
        >,
    >,
    pub property_service: Arc<
        PropertyService<
            PropertyRepositoryImpl,
            UserRepositoryImpl,
            CityRepositoryImpl,
            ProjectRepositoryImpl,
            ImageRepositoryImpl,
        >,
    >,
}

impl AppState {
    /// Wire repositories and services off a connection pool.
    pub fn new(config: Config, db_pool: MySqlPool) -> Self {
        let rules = config.delete_rules;

        let user_repo = Arc::new(UserRepositoryImpl::new(db_pool.clone()));
        let country_repo = Arc::new(CountryRepositoryImpl::new(db_pool.clone()));
        let state_repo = Arc::new(StateRepositoryImpl::new(db_pool.clone()));
        let city_repo = Arc::new(CityRepositoryImpl::new(db_pool.clone()));
        let developer_repo = Arc::new(DeveloperRepositoryImpl::new(db_pool.clone()));
        let project_repo = Arc::new(ProjectRepositoryImpl::new(db_pool.clone()));
        let property_repo = Arc::new(PropertyRepositoryImpl::new(db_pool.clone()));
        let image_repo = Arc::new(ImageRepositoryImpl::new(db_pool.clone()));

        let user_service = Arc::new(UserService::new(
            user_repo.clone(),
            property_repo.clone(),
            project_repo.clone(),
            image_repo.clone(),
            rules,
        ));
        let geo_service = Arc::new(GeoService::new(
            country_repo,
            state_repo,
            city_repo.clone(),
            property_repo.clone(),
            project_repo.clone(),
            image_repo.clone(),
            rules,
        ));
        let developer_service = Arc::new(DeveloperService::new(
            developer_repo.clone(),
            project_repo.clone(),
            property_repo.clone(),
            image_repo.clone(),
            rules,
        ));
        let project_service = Arc::new(ProjectService::new(
            project_repo.clone(),
            developer_repo,
            user_repo.clone(),
            city_repo.clone(),
            property_repo.clone(),
            image_repo.clone(),
            rules,
        ));
        let property_service = Arc::new(PropertyService::new(
            property_repo,
            user_repo,
            city_repo,
            project_repo,
            image_repo,
            rules,
        ));

        Self {
            config: Arc::new(config),
            db_pool,
            user_service,
            geo_service,
            developer_service,
            project_service,
            property_service,
        }
    }
}

/// Run the server
pub async fn run(config: Config) -> Result<()> {
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    sqlx::migrate!("./migrations").run(&db_pool).await?;
    info!("Database migrations applied");

    let http_addr = config.http_addr();
    let state = AppState::new(config, db_pool);
    let app = build_router(state);

    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the HTTP router.
///
/// Three role gates cover the API surface: `admin` for platform data
/// (users, geography, developers), `sellers` for listing management
/// (properties, projects, images), `any_user` for all reads. Every gate sits
/// behind the identity middleware that resolves the caller's role.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Admin-only mutations
    let admin_routes = Router::new()
        .route("/api/v1/users", post(api::user::create))
        .route(
            "/api/v1/users/{id}",
            put(api::user::update).delete(api::user::delete),
        )
        .route("/api/v1/countries", post(api::geo::create_country))
        .route("/api/v1/countries/{id}", delete(api::geo::delete_country))
        .route("/api/v1/states", post(api::geo::create_state))
        .route("/api/v1/states/{id}", delete(api::geo::delete_state))
        .route("/api/v1/cities", post(api::geo::create_city))
        .route("/api/v1/cities/{id}", delete(api::geo::delete_city))
        .route("/api/v1/developers", post(api::developer::create))
        .route(
            "/api/v1/developers/{id}",
            put(api::developer::update).delete(api::developer::delete),
        )
        .layer(from_fn_with_state(RoleGuard::admin(), require_role));

    // Listing-management mutations
    let seller_routes = Router::new()
        .route("/api/v1/properties", post(api::property::create))
        .route(
            "/api/v1/properties/{id}",
            put(api::property::update).delete(api::property::delete),
        )
        .route(
            "/api/v1/properties/{id}/images",
            post(api::property::add_image),
        )
        .route("/api/v1/images/{id}", delete(api::property::delete_image))
        .route("/api/v1/projects", post(api::project::create))
        .route(
            "/api/v1/projects/{id}",
            put(api::project::update).delete(api::project::delete),
        )
        .layer(from_fn_with_state(RoleGuard::sellers(), require_role));

    // Reads, open to any authenticated user
    let read_routes = Router::new()
        .route("/api/v1/users", get(api::user::list))
        .route("/api/v1/users/{id}", get(api::user::get))
        .route("/api/v1/countries", get(api::geo::list_countries))
        .route("/api/v1/countries/{id}", get(api::geo::get_country))
        .route(
            "/api/v1/countries/{id}/states",
            get(api::geo::list_states),
        )
        .route("/api/v1/states/{id}", get(api::geo::get_state))
        .route("/api/v1/states/{id}/cities", get(api::geo::list_cities))
        .route("/api/v1/cities/{id}", get(api::geo::get_city))
        .route("/api/v1/developers", get(api::developer::list))
        .route("/api/v1/developers/{id}", get(api::developer::get))
        .route("/api/v1/projects", get(api::project::list))
        .route("/api/v1/projects/{id}", get(api::project::get))
        .route(
            "/api/v1/projects/{id}/properties",
            get(api::project::list_properties),
        )
        .route("/api/v1/properties", get(api::property::list))
        .route("/api/v1/properties/{id}", get(api::property::get))
        .route(
            "/api/v1/properties/{id}/images",
            get(api::property::list_images),
        )
        .layer(from_fn_with_state(RoleGuard::any_user(), require_role));

    Router::new()
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready))
        .merge(admin_routes)
        .merge(seller_routes)
        .merge(read_routes)
        .layer(from_fn(identity_context_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
