//! Authentication route handlers.
//!
//! Credential checks live in the login service, not here. This module only
//! serves the unauthenticated entry page and tears the session down.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::error::{add_breadcrumb, clear_sentry_user};
use crate::middleware::{BrowserStore, CookieRemovals, RedirectNavigator};
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {}

/// Display the login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate {}
}

/// Handle logout.
///
/// Removes the `access_token` cookie, deletes the session artifacts, ends the
/// session and redirects to the login page. Always redirects, even if the
/// session store fails.
pub async fn logout(State(state): State<AppState>, session: Session, headers: HeaderMap) -> Response {
    let store = BrowserStore::new(session.clone());
    let mut jar = CookieRemovals::default();
    let mut navigator = RedirectNavigator::for_request(&headers);

    let report = state
        .terminator()
        .logout(&store, &mut jar, &mut navigator)
        .await;
    if !report.is_clean() {
        tracing::warn!(failed_keys = ?report.failed_keys, "logout left session artifacts behind");
    }
    end_session(&session).await;

    clear_sentry_user();
    add_breadcrumb("auth", "Logged out");

    let mut response = navigator.into_response();
    jar.apply(&mut response);
    response
}

/// Destroy the session and leave it empty for the session layer.
///
/// The session layer persists a modified, non-empty session after the handler
/// and answers with a bare 500 if that fails, which would drop the redirect.
/// A session without an ID and without data is never persisted, so when the
/// store rejects the delete the ID is still dropped locally.
async fn end_session(session: &Session) {
    let Err(error) = session.flush().await else {
        return;
    };
    tracing::warn!(%error, "failed to flush session");

    // Clears the ID before it touches the store.
    if let Err(error) = session.cycle_id().await {
        tracing::debug!(%error, "session store still unavailable");
    }
}
