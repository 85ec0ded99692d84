//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//!
//! # Page shells (sidebar loads via HTMX)
//! GET  /                       - Home
//! GET  /metrics                - Metrics dashboard (worker home link)
//! GET  /map                    - Container and route map
//! GET  /containers             - Container list
//! GET  /containers/{id}        - Container detail
//! GET  /settings               - Settings
//! GET  /about                  - About
//!
//! # Sidebar
//! GET  /sidebar?path=<path>    - Sidebar fragment for a page at <path>
//!
//! # Auth
//! GET  /auth/login             - Unauthenticated entry page
//! POST /auth/logout            - Logout action
//! ```

pub mod auth;
pub mod pages;
pub mod sidebar;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page))
        .route("/logout", post(auth::logout))
}

/// Create the container routes router.
pub fn container_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::containers))
        .route("/{id}", get(pages::container))
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/", get(pages::home))
        .route("/metrics", get(pages::metrics))
        .route("/map", get(pages::map))
        .nest("/containers", container_routes())
        .route("/settings", get(pages::settings))
        .route("/about", get(pages::about))
        .route("/sidebar", get(sidebar::show))
        .nest("/auth", auth_routes())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
