//! Session teardown.
//!
//! Logout runs three steps in a fixed order:
//!
//! 1. remove the session token the external authorization gate checks,
//! 2. delete every local session artifact from the client store,
//! 3. navigate to the unauthenticated entry route.
//!
//! Step 2 is best-effort. A store failure is logged and skipped so that the
//! redirect in step 3 always happens.

use tracing::{info, warn};

use crate::store::{ClientStore, keys};

/// Name of the session token cookie inspected by the authorization gate.
pub const SESSION_TOKEN: &str = "access_token";

/// Path the session token is scoped to.
pub const SESSION_TOKEN_PATH: &str = "/";

/// Unauthenticated entry route.
pub const LOGIN_ROUTE: &str = "/auth/login";

/// Holder of the session token (a cookie jar in the browser).
///
/// Removing an absent token is a no-op.
pub trait TokenJar {
    /// Remove the token `name` scoped to `path`.
    fn remove(&mut self, name: &str, path: &str);
}

/// Client-side navigation dispatcher.
pub trait Navigator {
    /// Navigate to `path`.
    fn go_to(&mut self, path: &str);
}

/// Outcome of a logout, for logging and tests.
///
/// Callers are not expected to act on it; logout always ends in navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogoutReport {
    /// Store keys whose deletion failed.
    pub failed_keys: Vec<&'static str>,
}

impl LogoutReport {
    /// Whether every store deletion succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed_keys.is_empty()
    }
}

/// Ordered, best-effort session teardown.
#[derive(Debug, Clone, Copy)]
pub struct SessionTerminator {
    token: &'static str,
    token_path: &'static str,
    artifacts: &'static [&'static str],
    login_route: &'static str,
}

impl Default for SessionTerminator {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTerminator {
    /// Terminator for the standard session artifacts.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            token: SESSION_TOKEN,
            token_path: SESSION_TOKEN_PATH,
            artifacts: &keys::SESSION_ARTIFACTS,
            login_route: LOGIN_ROUTE,
        }
    }

    /// Tear down the session and navigate to the login route.
    ///
    /// Safe to call when already logged out.
    pub async fn logout<S, J, N>(&self, store: &S, jar: &mut J, navigator: &mut N) -> LogoutReport
    where
        S: ClientStore,
        J: TokenJar,
        N: Navigator,
    {
        jar.remove(self.token, self.token_path);

        let mut report = LogoutReport::default();
        for &key in self.artifacts {
            if let Err(error) = store.delete(key).await {
                warn!(key, %error, "failed to delete session artifact");
                report.failed_keys.push(key);
            }
        }

        navigator.go_to(self.login_route);

        info!(
            failed = report.failed_keys.len(),
            redirect = self.login_route,
            "session terminated"
        );
        report
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::store::InMemoryStore;

    /// Every collaborator call, in order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        RemoveToken(String, String),
        GoTo(String),
    }

    type Log = Arc<Mutex<Vec<Call>>>;

    /// Jar holding a single optional token, logging removals.
    struct FakeJar {
        token: Option<String>,
        log: Log,
    }

    impl TokenJar for FakeJar {
        fn remove(&mut self, name: &str, path: &str) {
            if name == SESSION_TOKEN && path == SESSION_TOKEN_PATH {
                self.token = None;
            }
            self.log
                .lock()
                .unwrap()
                .push(Call::RemoveToken(name.to_owned(), path.to_owned()));
        }
    }

    struct FakeNavigator {
        log: Log,
    }

    impl Navigator for FakeNavigator {
        fn go_to(&mut self, path: &str) {
            self.log.lock().unwrap().push(Call::GoTo(path.to_owned()));
        }
    }

    fn logged_in_store() -> InMemoryStore {
        InMemoryStore::with_entries([
            (keys::LOGIN_FLAG, "true"),
            (keys::ROLE, "\"worker\""),
            (keys::USER_ID, "7f1c"),
            ("theme", "dark"),
        ])
    }

    fn collaborators() -> (FakeJar, FakeNavigator, Log) {
        let log: Log = Arc::default();
        let jar = FakeJar {
            token: Some("signed".to_owned()),
            log: Arc::clone(&log),
        };
        let navigator = FakeNavigator {
            log: Arc::clone(&log),
        };
        (jar, navigator, log)
    }

    #[tokio::test]
    async fn test_logout_clears_everything_and_redirects() {
        let store = logged_in_store();
        let (mut jar, mut navigator, log) = collaborators();

        let report = SessionTerminator::new()
            .logout(&store, &mut jar, &mut navigator)
            .await;

        assert!(report.is_clean());
        assert!(jar.token.is_none());
        for key in keys::SESSION_ARTIFACTS {
            assert!(!store.contains(key), "{key} should be deleted");
        }
        // Unrelated keys survive.
        assert!(store.contains("theme"));

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                Call::RemoveToken("access_token".to_owned(), "/".to_owned()),
                Call::GoTo("/auth/login".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn test_logout_twice_is_idempotent() {
        let store = logged_in_store();
        let (mut jar, mut navigator, log) = collaborators();
        let terminator = SessionTerminator::new();

        let first = terminator.logout(&store, &mut jar, &mut navigator).await;
        let second = terminator.logout(&store, &mut jar, &mut navigator).await;

        assert!(first.is_clean());
        assert!(second.is_clean());
        assert!(jar.token.is_none());

        let navigations = log
            .lock()
            .unwrap()
            .iter()
            .filter(|call| matches!(call, Call::GoTo(_)))
            .count();
        assert_eq!(navigations, 2, "one navigation per call");
    }

    #[tokio::test]
    async fn test_logout_when_never_logged_in() {
        let store = InMemoryStore::new();
        let (mut jar, mut navigator, log) = collaborators();
        jar.token = None;

        let report = SessionTerminator::new()
            .logout(&store, &mut jar, &mut navigator)
            .await;

        assert!(report.is_clean());
        assert_eq!(
            log.lock().unwrap().last(),
            Some(&Call::GoTo("/auth/login".to_owned()))
        );
    }

    #[tokio::test]
    async fn test_unavailable_store_still_navigates() {
        let store = logged_in_store();
        store.set_available(false);
        let (mut jar, mut navigator, log) = collaborators();

        let report = SessionTerminator::new()
            .logout(&store, &mut jar, &mut navigator)
            .await;

        assert_eq!(report.failed_keys, vec!["isLoggedIn", "role", "guid"]);
        // The token is removed before the store is touched.
        assert!(jar.token.is_none());
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                Call::RemoveToken("access_token".to_owned(), "/".to_owned()),
                Call::GoTo("/auth/login".to_owned()),
            ]
        );
    }
}
