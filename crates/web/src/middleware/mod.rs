//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`)
//! 2. `TraceLayer` (`http_request` span)
//! 3. Request ID (reuse or create `x-request-id`, recorded on the span)
//! 4. Session layer (tower-sessions, `PostgreSQL` store shared with the login service)
//!
//! The [`client`] module adapts the browser session, cookies and redirects to
//! the collaborator traits of `wastetrack-core`.

pub mod client;
pub mod request_id;
pub mod session;

pub use client::{BrowserStore, CookieRemovals, RedirectNavigator};
pub use request_id::request_id_middleware;
pub use session::{create_postgres_store, create_session_layer};
