//! Sidebar fragment.
//!
//! Page shells render the loading placeholder, which asks for this fragment
//! with `hx-trigger="load"`. Each fragment request is one mount: the role is
//! read from the session once and the navigation is composed for the path the
//! shell was rendered at.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::Query;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use wastetrack_core::{NavLink, RoleResolver, SidebarView};

use crate::error::{AppError, Result};
use crate::middleware::BrowserStore;

/// Query parameters for the sidebar fragment.
#[derive(Debug, Deserialize)]
pub struct SidebarQuery {
    /// Current route path of the page shell.
    #[serde(default = "root_path")]
    pub path: String,
}

fn root_path() -> String {
    "/".to_string()
}

/// URL of the sidebar fragment for a page rendered at `path`.
#[must_use]
pub fn sidebar_url(path: &str) -> String {
    format!("/sidebar?path={}", urlencoding::encode(path))
}

/// Sidebar fragment template.
///
/// While `loading` is set only the placeholder is rendered.
#[derive(Template, WebTemplate)]
#[template(path = "sidebar/nav.html")]
pub struct SidebarTemplate {
    pub loading: bool,
    pub links: Vec<NavLink>,
    pub avatar_initial: char,
    pub sidebar_url: String,
}

impl SidebarTemplate {
    /// Template for a composed view at `path`.
    #[must_use]
    pub fn new(view: SidebarView, path: &str) -> Self {
        let sidebar_url = sidebar_url(path);
        match view {
            SidebarView::Loading => Self {
                loading: true,
                links: Vec::new(),
                avatar_initial: '?',
                sidebar_url,
            },
            SidebarView::Ready {
                links,
                avatar_initial,
            } => Self {
                loading: false,
                links,
                avatar_initial,
                sidebar_url,
            },
        }
    }
}

/// Render the sidebar for the current session.
///
/// # Errors
///
/// Returns 400 if `path` is not an absolute path.
#[instrument(skip(session))]
pub async fn show(session: Session, Query(query): Query<SidebarQuery>) -> Result<SidebarTemplate> {
    if !query.path.starts_with('/') {
        return Err(AppError::BadRequest("path must be absolute".to_string()));
    }

    let store = BrowserStore::new(session);
    let mut resolver = RoleResolver::new();
    let state = resolver.resolve(&store).await;

    tracing::debug!(?state, "sidebar mounted");
    Ok(SidebarTemplate::new(
        SidebarView::compose(state, &query.path),
        &query.path,
    ))
}
