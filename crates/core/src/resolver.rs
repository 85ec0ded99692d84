//! Role resolution state machine.
//!
//! A [`RoleResolver`] is created per mount in the `Loading` state and moves to
//! `Resolved(role)` or `Absent` on its first [`RoleResolver::resolve`] call.
//! Later calls return the cached state, so a role written to the store after
//! mount is not observed until the next mount.

use tracing::{debug, warn};

use crate::store::{ClientStore, keys};
use crate::types::{ResolutionState, Role, RoleError};

/// One-shot resolver of the persisted role.
#[derive(Debug, Default)]
pub struct RoleResolver {
    state: ResolutionState,
}

impl RoleResolver {
    /// Create a resolver in the `Loading` state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ResolutionState::Loading,
        }
    }

    /// Current state without touching the store.
    #[must_use]
    pub const fn state(&self) -> ResolutionState {
        self.state
    }

    /// Read the role from `store` once and settle the state.
    ///
    /// Never fails: a missing, malformed or unknown value, and a store read
    /// error, all resolve to [`ResolutionState::Absent`].
    pub async fn resolve<S: ClientStore>(&mut self, store: &S) -> ResolutionState {
        if self.state.is_resolved() {
            return self.state;
        }

        self.state = match store.get(keys::ROLE).await {
            Ok(raw) => match Role::decode(raw.as_deref()) {
                Ok(role) => {
                    debug!(%role, "resolved role");
                    ResolutionState::Resolved(role)
                }
                Err(RoleError::Missing) => {
                    debug!("no role stored");
                    ResolutionState::Absent
                }
                Err(error) => {
                    warn!(%error, "ignoring stored role");
                    ResolutionState::Absent
                }
            },
            Err(error) => {
                warn!(%error, "could not read role from client store");
                ResolutionState::Absent
            }
        };

        self.state
    }
}
