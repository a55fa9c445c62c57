//! Route table.

pub mod blog;
pub mod contact;
pub mod health;
pub mod vault;

use std::time::Duration;

use axum::Router;
use axum::http::Method;
use axum::http::header::CONTENT_TYPE;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::ApiState;

/// Build the application router.
pub fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/blog", get(blog::list))
        .route("/api/blog/categories", get(blog::categories))
        .route("/api/blog/{slug}", get(blog::show))
        .route("/api/blog/{slug}/related", get(blog::related))
        .route("/api/contact", post(contact::submit))
        .route("/api/vault/verify", post(vault::verify))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
