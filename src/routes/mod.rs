//! Route definitions and router assembly for the kennel API.

pub mod auth;
pub mod environments;
pub mod health;
pub mod members;
pub mod posts;
pub mod puppies;
pub mod stats;
pub mod uploads;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    services::ServeDir, trace::TraceLayer,
};
use uuid::Uuid;

use crate::services::upload::PUBLIC_PREFIX;
use crate::AppState;

/// Headroom for multipart boundaries and headers around the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Body of a successful DELETE.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: Uuid,
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.frontend_url);
    let upload_dir = state.config.upload_dir.clone();
    let upload_body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    let auth_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me));

    let content_routes = Router::new()
        .route("/posts", get(posts::list).post(posts::create))
        .route(
            "/posts/{id}",
            get(posts::get_by_id).put(posts::update).delete(posts::delete),
        )
        .route("/members", get(members::list).post(members::create))
        .route(
            "/members/{id}",
            get(members::get_by_id)
                .put(members::update)
                .delete(members::delete),
        )
        .route("/puppies", get(puppies::list).post(puppies::create))
        .route(
            "/puppies/{id}",
            get(puppies::get_by_id)
                .put(puppies::update)
                .delete(puppies::delete),
        )
        .route(
            "/environments",
            get(environments::list).post(environments::create),
        )
        .route(
            "/environments/{id}",
            get(environments::get_by_id)
                .put(environments::update)
                .delete(environments::delete),
        );

    let upload_routes = Router::new()
        .route("/uploads", post(uploads::upload))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(upload_body_limit));

    let api_routes = Router::new()
        .route("/stats", get(stats::get_stats))
        .merge(auth_routes)
        .merge(content_routes)
        .merge(upload_routes);

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", api_routes)
        .nest_service(PUBLIC_PREFIX, ServeDir::new(upload_dir))
        // Middleware layers (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Allow the admin frontend origin; an unparsable origin disables cross-origin access.
fn build_cors_layer(frontend_url: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match frontend_url.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            tracing::warn!(frontend_url, error = %e, "Invalid FRONTEND_URL, CORS disabled");
            cors
        }
    }
}
