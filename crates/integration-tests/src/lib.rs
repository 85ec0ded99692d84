//! Integration test harness for the WasteTrack web app.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p wastetrack-integration-tests
//! ```
//!
//! Tests drive the composed router in-process with `tower::ServiceExt::oneshot`.
//! [`Browser`] keeps a cookie jar across requests, so the session cookie and
//! the `access_token` cookie behave like they would in a real browser.
//!
//! The login service is not part of this repository. Tests stand in for it
//! through two extra routes mounted only here:
//!
//! ```text
//! POST /__test/session         - Insert the JSON object's entries into the session
//! GET  /__test/session/{key}   - Read a session value (404 when absent)
//! ```
//!
//! [`FaultyStore`] wraps `MemoryStore` and can be switched into failure modes
//! to check that logout still redirects when the session database misbehaves.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    Json, Router,
    body::Body,
    extract::Path,
    http::{HeaderMap, Request, StatusCode, header},
    routing::{get, post},
};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tower::ServiceExt;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store;
use tower_sessions::{MemoryStore, Session, SessionStore, cookie::Cookie};
use wastetrack_core::Role;
use wastetrack_web::config::WebConfig;
use wastetrack_web::state::AppState;
use wastetrack_web::{build_app, routes};

/// A response with its body read to a string.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Every `Set-Cookie` header value.
    #[must_use]
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_owned)
            .collect()
    }

    /// A header as a string, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Test stand-in for the login service.
fn login_service_routes() -> Router<AppState> {
    Router::new()
        .route("/__test/session", post(seed_session))
        .route("/__test/session/{key}", get(read_session))
}

async fn seed_session(session: Session, Json(entries): Json<Map<String, Value>>) -> StatusCode {
    for (key, value) in entries {
        if session.insert_value(&key, value).await.is_err() {
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
    }
    StatusCode::NO_CONTENT
}

async fn read_session(session: Session, Path(key): Path<String>) -> Result<Json<Value>, StatusCode> {
    match session.get_value(&key).await {
        Ok(Some(value)) => Ok(Json(value)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// Session store that can be told to fail.
///
/// Clones share the records and the failure switches.
#[derive(Debug, Clone, Default)]
pub struct FaultyStore {
    inner: MemoryStore,
    reads_fail: Arc<AtomicBool>,
    writes_fail: Arc<AtomicBool>,
}

impl FaultyStore {
    /// Records stay readable but every save and delete fails.
    pub fn fail_writes(&self) {
        self.writes_fail.store(true, Ordering::SeqCst);
    }

    /// Every store operation fails, as with an unreachable database.
    pub fn fail_everything(&self) {
        self.reads_fail.store(true, Ordering::SeqCst);
        self.writes_fail.store(true, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool, operation: &str) -> session_store::Result<()> {
        if flag.load(Ordering::SeqCst) {
            Err(session_store::Error::Backend(format!("{operation} refused")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SessionStore for FaultyStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        Self::check(&self.writes_fail, "create")?;
        self.inner.create(record).await
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        Self::check(&self.writes_fail, "save")?;
        self.inner.save(record).await
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        Self::check(&self.reads_fail, "load")?;
        self.inner.load(id).await
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        Self::check(&self.writes_fail, "delete")?;
        self.inner.delete(id).await
    }
}

/// A browser talking to a fresh in-process app.
pub struct Browser {
    app: Router,
    cookies: BTreeMap<String, String>,
}

impl Default for Browser {
    fn default() -> Self {
        Self::new()
    }
}

impl Browser {
    /// Create a browser with an empty cookie jar and a fresh app.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(MemoryStore::default())
    }

    /// Create a browser whose app keeps sessions in `store`.
    #[must_use]
    pub fn with_store<S>(store: S) -> Self
    where
        S: SessionStore + Clone,
    {
        let state = AppState::new(WebConfig::default());
        let routes = routes::routes().merge(login_service_routes());
        Self {
            app: build_app(routes, state, store),
            cookies: BTreeMap::new(),
        }
    }

    /// Set a cookie as if the server had issued it.
    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.cookies.insert(name.to_owned(), value.to_owned());
    }

    /// Current value of a cookie.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Log in the way the login service does: session artifacts plus token.
    pub async fn login(&mut self, role: Role) {
        self.seed_session(serde_json::json!({
            "isLoggedIn": "true",
            "role": role.encode(),
            "guid": "5f0c2a9e-user",
        }))
        .await;
        self.set_cookie("access_token", "signed-token");
    }

    /// Insert session entries.
    ///
    /// String values are stored as raw storage text, the way the login
    /// service writes them.
    pub async fn seed_session(&mut self, entries: Value) {
        let request = Request::post("/__test/session")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(entries.to_string()))
            .expect("valid request");
        let response = self.send(request).await;
        assert_eq!(response.status, StatusCode::NO_CONTENT, "seeding session failed");
    }

    /// Read a raw session value.
    pub async fn session_value(&mut self, key: &str) -> Option<Value> {
        let response = self.get(&format!("/__test/session/{key}")).await;
        match response.status {
            StatusCode::OK => Some(serde_json::from_str(&response.body).expect("JSON session value")),
            StatusCode::NOT_FOUND => None,
            status => panic!("unexpected status {status} reading session"),
        }
    }

    /// GET `uri`.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = Request::get(uri).body(Body::empty()).expect("valid request");
        self.send(request).await
    }

    /// POST an empty body to `uri` with extra headers.
    pub async fn post(&mut self, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::post(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(Body::empty()).expect("valid request");
        self.send(request).await
    }

    async fn send(&mut self, mut request: Request<Body>) -> TestResponse {
        if !self.cookies.is_empty() {
            let cookie_header = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            request.headers_mut().insert(
                header::COOKIE,
                cookie_header.parse().expect("valid cookie header"),
            );
        }

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});
        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX)
            .await
            .expect("readable body");

        let response = TestResponse {
            status: parts.status,
            headers: parts.headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        };
        self.store_cookies(&response);
        response
    }

    fn store_cookies(&mut self, response: &TestResponse) {
        for raw in response.set_cookies() {
            let Ok(cookie) = Cookie::parse(raw) else {
                continue;
            };
            let expired = cookie
                .max_age()
                .is_some_and(|max_age| max_age.is_zero() || max_age.is_negative());
            if expired {
                self.cookies.remove(cookie.name());
            } else {
                self.cookies
                    .insert(cookie.name().to_owned(), cookie.value().to_owned());
            }
        }
    }
}
