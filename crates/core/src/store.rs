//! Per-client persistent key/value storage.
//!
//! The sidebar never owns this storage; it is injected through [`ClientStore`]
//! so the resolver and terminator can run against [`InMemoryStore`] in tests
//! and against the browser session in the web crate.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// Fixed keys written by the login flow.
pub mod keys {
    /// Boolean-ish "logged in" marker.
    pub const LOGIN_FLAG: &str = "isLoggedIn";

    /// JSON-encoded role name.
    pub const ROLE: &str = "role";

    /// Opaque user identifier.
    pub const USER_ID: &str = "guid";

    /// Every local session artifact cleared at logout.
    pub const SESSION_ARTIFACTS: [&str; 3] = [LOGIN_FLAG, ROLE, USER_ID];
}

/// String key/value storage that survives page reloads.
///
/// Deleting an absent key is not an error.
pub trait ClientStore {
    /// Error raised when the underlying storage cannot be reached.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Remove `key`.
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Errors from [`InMemoryStore`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Storage was switched off with [`InMemoryStore::set_available`].
    #[error("storage unavailable")]
    Unavailable,
}

/// In-process [`ClientStore`] used by tests and local tooling.
///
/// Can be switched to an unavailable mode in which every operation fails,
/// which mimics a browser with storage disabled.
#[derive(Debug)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
    available: AtomicBool,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create an empty, available store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Create a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value.to_owned()))
            .collect();
        Self {
            entries: Mutex::new(map),
            available: AtomicBool::new(true),
        }
    }

    /// Toggle availability. While unavailable every operation fails.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Whether `key` is currently stored, regardless of availability.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Number of stored entries, regardless of availability.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable)
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // The map holds plain strings, so a poisoned guard is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ClientStore for InMemoryStore {
    type Error = StoreError;

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        self.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.lock().remove(key);
        Ok(())
    }
}
