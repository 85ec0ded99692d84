//! Outcome of reading the persisted role at mount time.

use super::role::Role;

/// Tri-state role resolution.
///
/// Kept distinct from `Option<Role>` so that "not read yet" can never be
/// mistaken for "read, and there is no role".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResolutionState {
    /// The store has not been read yet.
    #[default]
    Loading,
    /// A known role was found.
    Resolved(Role),
    /// The store was read and holds no usable role.
    Absent,
}

impl ResolutionState {
    /// Whether the store has been read.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Self::Loading)
    }

    /// The resolved role, if any.
    #[must_use]
    pub const fn role(self) -> Option<Role> {
        match self {
            Self::Resolved(role) => Some(role),
            Self::Loading | Self::Absent => None,
        }
    }

    /// Whether this state grants `role`.
    #[must_use]
    pub fn has_role(self, role: Role) -> bool {
        self.role() == Some(role)
    }

    /// Avatar fallback: the role initial, or `?` without a role.
    #[must_use]
    pub const fn avatar_initial(self) -> char {
        match self {
            Self::Resolved(role) => role.initial(),
            Self::Loading | Self::Absent => '?',
        }
    }
}
