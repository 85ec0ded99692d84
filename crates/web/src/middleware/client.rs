//! Browser-side collaborators for the core resolver and terminator.
//!
//! - [`BrowserStore`] exposes the tower-sessions session as a `ClientStore`
//! - [`CookieRemovals`] collects `Set-Cookie` removals as a `TokenJar`
//! - [`RedirectNavigator`] turns `go_to` into a redirect response

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use serde_json::Value;
use tower_sessions::Session;
use tower_sessions::cookie::Cookie;
use wastetrack_core::logout::LOGIN_ROUTE;
use wastetrack_core::{ClientStore, Navigator, TokenJar};

/// Header HTMX sets on every request it issues.
const HX_REQUEST: &str = "hx-request";

/// Response header telling HTMX to perform a full-page redirect.
const HX_REDIRECT: &str = "hx-redirect";

/// The browser session viewed as a string key/value store.
///
/// Values written by other code as non-string JSON (e.g. a boolean login
/// flag) are returned as their JSON text.
#[derive(Clone)]
pub struct BrowserStore {
    session: Session,
}

impl BrowserStore {
    /// Wrap a request's session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl ClientStore for BrowserStore {
    type Error = tower_sessions::session::Error;

    async fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let value = self.session.get_value(key).await?;
        Ok(value.map(|value| match value {
            Value::String(text) => text,
            other => other.to_string(),
        }))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.session
            .insert_value(key, Value::String(value.to_owned()))
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), Self::Error> {
        self.session.remove_value(key).await?;
        Ok(())
    }
}

/// Cookie removals to send with the response.
#[derive(Debug, Default)]
pub struct CookieRemovals {
    cookies: Vec<Cookie<'static>>,
}

impl CookieRemovals {
    /// `Set-Cookie` header values, one per removed cookie.
    pub fn header_values(&self) -> impl Iterator<Item = HeaderValue> + '_ {
        self.cookies
            .iter()
            .filter_map(|cookie| HeaderValue::from_str(&cookie.to_string()).ok())
    }

    /// Append the removals to `response`.
    pub fn apply(&self, response: &mut Response) {
        for value in self.header_values() {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
}

impl TokenJar for CookieRemovals {
    fn remove(&mut self, name: &str, path: &str) {
        let mut cookie = Cookie::new(name.to_owned(), "");
        cookie.set_path(path.to_owned());
        cookie.make_removal();
        self.cookies.push(cookie);
    }
}

/// Records the navigation target and renders it as a redirect.
///
/// HTMX requests get an `HX-Redirect` header so the whole page navigates
/// instead of swapping the redirect target into the sidebar.
#[derive(Debug, Default)]
pub struct RedirectNavigator {
    target: Option<String>,
    htmx: bool,
}

impl RedirectNavigator {
    /// Navigator for a request with the given headers.
    #[must_use]
    pub fn for_request(headers: &HeaderMap) -> Self {
        let htmx = headers
            .get(HX_REQUEST)
            .is_some_and(|value| value.as_bytes() == b"true");
        Self { target: None, htmx }
    }
}

impl Navigator for RedirectNavigator {
    fn go_to(&mut self, path: &str) {
        self.target = Some(path.to_owned());
    }
}

impl IntoResponse for RedirectNavigator {
    fn into_response(self) -> Response {
        let target = self.target.unwrap_or_else(|| LOGIN_ROUTE.to_owned());
        if self.htmx {
            (StatusCode::OK, [(HX_REDIRECT, target)]).into_response()
        } else {
            Redirect::to(&target).into_response()
        }
    }
}
