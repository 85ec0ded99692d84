//! Application state shared across handlers.

use std::sync::Arc;

use wastetrack_core::SessionTerminator;

use crate::config::WebConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebConfig,
    terminator: SessionTerminator,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: WebConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                terminator: SessionTerminator::new(),
            }),
        }
    }

    /// Get a reference to the web configuration.
    #[must_use]
    pub fn config(&self) -> &WebConfig {
        &self.inner.config
    }

    /// Get the session terminator used by the logout route.
    #[must_use]
    pub fn terminator(&self) -> &SessionTerminator {
        &self.inner.terminator
    }
}
