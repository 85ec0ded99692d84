//! Page shells.
//!
//! Every authenticated page renders the same shell: the sidebar placeholder
//! (which loads the real sidebar for this path) next to the page content.
//! Page bodies are owned by their feature modules; the shells here only carry
//! the title.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::Path;
use tracing::instrument;

use super::sidebar::sidebar_url;
use crate::error::{AppError, Result};

/// Page shell template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/page.html")]
pub struct PageTemplate {
    pub title: &'static str,
    pub subtitle: Option<String>,
    pub sidebar_url: String,
}

impl PageTemplate {
    /// Shell for a page rendered at `path`.
    #[must_use]
    pub fn new(title: &'static str, path: &str) -> Self {
        Self {
            title,
            subtitle: None,
            sidebar_url: sidebar_url(path),
        }
    }

    /// Set the line shown under the title.
    #[must_use]
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}

/// Display the home page.
pub async fn home() -> PageTemplate {
    PageTemplate::new("Inicio", "/")
}

/// Display the metrics dashboard.
pub async fn metrics() -> PageTemplate {
    PageTemplate::new("Métricas", "/metrics")
}

/// Display the container and route map.
pub async fn map() -> PageTemplate {
    PageTemplate::new("Mapa de contenedores y rutas", "/map")
}

/// Display the container list.
pub async fn containers() -> PageTemplate {
    PageTemplate::new("Contenedores", "/containers")
}

/// Display a single container.
///
/// # Errors
///
/// Returns 404 if `segment` is not a numeric container ID.
#[instrument]
pub async fn container(Path(segment): Path<String>) -> Result<PageTemplate> {
    let id: u64 = segment
        .parse()
        .map_err(|_| AppError::NotFound(format!("container {segment}")))?;

    // The sidebar must see the path as requested, not the normalized ID.
    Ok(PageTemplate::new("Contenedores", &format!("/containers/{segment}"))
        .subtitle(format!("Contenedor #{id}")))
}

/// Display the settings page.
pub async fn settings() -> PageTemplate {
    PageTemplate::new("Ajustes", "/settings")
}

/// Display the about page.
pub async fn about() -> PageTemplate {
    PageTemplate::new("Acerca de nosotros", "/about")
}
