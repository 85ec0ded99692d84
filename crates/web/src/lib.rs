//! WasteTrack web library.
//!
//! This crate provides the web application as a library so the router can be
//! composed by the binary and driven in-process by the integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tower_sessions::SessionStore;
use tracing::Span;

use middleware::{create_session_layer, request_id_middleware};
use state::AppState;

/// Compose `routes` with static files, sessions, tracing and request IDs.
///
/// Sentry layers are left to the caller so tests can run without a hub, and
/// the session store is injected so tests can use `MemoryStore`.
pub fn build_app<S>(routes: Router<AppState>, state: AppState, sessions: S) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = create_session_layer(sessions, state.config());
    let static_dir = ServeDir::new(&state.config().static_dir);

    routes
        .nest_service("/static", static_dir)
        .layer(session_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
