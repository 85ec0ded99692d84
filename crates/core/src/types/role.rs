//! Access tier attached to the current session.

use core::fmt;

/// Errors that can occur when decoding a stored [`Role`].
#[derive(thiserror::Error, Debug)]
pub enum RoleError {
    /// Nothing is stored under the role key, or the stored value is empty.
    #[error("no role stored")]
    Missing,
    /// The stored value is not a JSON-encoded string.
    #[error("stored role is not a JSON string: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The decoded value is not one of the known role names.
    #[error("unknown role: {0:?}")]
    Unknown(String),
}

/// Closed set of access tiers.
///
/// The login flow persists the role as a JSON-encoded string, e.g. `"worker"`
/// including the quotes. Matching is case-insensitive.
///
/// ## Examples
///
/// ```
/// use wastetrack_core::Role;
///
/// assert_eq!(Role::decode(Some("\"Worker\"")).ok(), Some(Role::Worker));
/// assert_eq!(Role::decode(Some("\"citizen\"")).ok(), Some(Role::Citizen));
///
/// assert!(Role::decode(None).is_err());             // absent
/// assert!(Role::decode(Some("worker")).is_err());   // not JSON
/// assert!(Role::decode(Some("\"admin\"")).is_err()); // unknown
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Member of the public.
    Citizen,
    /// Municipal staff; sees the metrics dashboard.
    Worker,
}

impl Role {
    /// Every known role, in declaration order.
    pub const ALL: [Self; 2] = [Self::Citizen, Self::Worker];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Worker => "worker",
        }
    }

    /// Uppercase first letter of the role name, used as avatar fallback.
    #[must_use]
    pub const fn initial(self) -> char {
        match self {
            Self::Citizen => 'C',
            Self::Worker => 'W',
        }
    }

    /// Match a plain (already decoded) role name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::Unknown`] if the lowercased name is not a known role.
    pub fn from_name(name: &str) -> Result<Self, RoleError> {
        let normalized = name.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or(RoleError::Unknown(normalized))
    }

    /// Decode the raw value persisted under the role key.
    ///
    /// The value must be a JSON string whose lowercased content is exactly a
    /// known role name. Surrounding whitespace inside the quotes is not trimmed.
    ///
    /// # Errors
    ///
    /// - [`RoleError::Missing`] when `raw` is `None` or empty
    /// - [`RoleError::Malformed`] when `raw` is not a JSON string
    /// - [`RoleError::Unknown`] when the decoded name is not a known role
    pub fn decode(raw: Option<&str>) -> Result<Self, RoleError> {
        let raw = raw.filter(|value| !value.is_empty()).ok_or(RoleError::Missing)?;
        let name: String = serde_json::from_str(raw)?;
        Self::from_name(&name)
    }

    /// Encode the role the way the login flow persists it.
    #[must_use]
    pub fn encode(self) -> String {
        format!("\"{}\"", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_roles() {
        assert_eq!(Role::decode(Some("\"worker\"")).unwrap(), Role::Worker);
        assert_eq!(Role::decode(Some("\"citizen\"")).unwrap(), Role::Citizen);
    }

    #[test]
    fn test_decode_is_case_insensitive() {
        assert_eq!(Role::decode(Some("\"Worker\"")).unwrap(), Role::Worker);
        assert_eq!(Role::decode(Some("\"WORKER\"")).unwrap(), Role::Worker);
        assert_eq!(Role::decode(Some("\"cItIzEn\"")).unwrap(), Role::Citizen);
    }

    #[test]
    fn test_decode_escaped_json_string() {
        // \u0057 is 'W'
        assert_eq!(Role::decode(Some("\"\\u0057orker\"")).unwrap(), Role::Worker);
    }

    #[test]
    fn test_decode_missing() {
        assert!(matches!(Role::decode(None), Err(RoleError::Missing)));
        assert!(matches!(Role::decode(Some("")), Err(RoleError::Missing)));
    }

    #[test]
    fn test_decode_unquoted_is_malformed() {
        assert!(matches!(
            Role::decode(Some("worker")),
            Err(RoleError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_non_string_json_is_malformed() {
        for raw in ["42", "true", "null", "[\"worker\"]", "{\"role\":\"worker\"}"] {
            assert!(
                matches!(Role::decode(Some(raw)), Err(RoleError::Malformed(_))),
                "{raw} should be malformed"
            );
        }
    }

    #[test]
    fn test_decode_unknown_names() {
        for raw in ["\"admin\"", "\"\"", "\" worker\"", "\"workers\"", "\"citizen \""] {
            assert!(
                matches!(Role::decode(Some(raw)), Err(RoleError::Unknown(_))),
                "{raw} should be unknown"
            );
        }
    }

    #[test]
    fn test_encode_decode_agree() {
        for role in Role::ALL {
            assert_eq!(Role::decode(Some(&role.encode())).unwrap(), role);
        }
    }

    #[test]
    fn test_initial() {
        assert_eq!(Role::Worker.initial(), 'W');
        assert_eq!(Role::Citizen.initial(), 'C');
    }
}
