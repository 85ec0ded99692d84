//! Sidebar navigation table and render gating.

use crate::types::{ResolutionState, Role};

/// How an entry decides whether it is the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Active only when the path equals the match path.
    Exact,
    /// Active on the match path and on any sub-path below it
    /// (`/containers` matches `/containers/42`, not `/containersX`).
    Subtree,
}

/// A static navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    /// Link target.
    pub href: &'static str,
    /// Path compared against the current route.
    pub match_path: &'static str,
    /// How `match_path` is compared.
    pub rule: MatchRule,
    /// Display label.
    pub label: &'static str,
    /// Phosphor icon class.
    pub icon: &'static str,
    /// Role required to see the entry; `None` means any resolved state.
    pub required_role: Option<Role>,
}

impl NavEntry {
    /// Whether `path` marks this entry active.
    #[must_use]
    pub fn is_active(&self, path: &str) -> bool {
        match self.rule {
            MatchRule::Exact => path == self.match_path,
            MatchRule::Subtree => {
                path == self.match_path
                    || path
                        .strip_prefix(self.match_path)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }

    /// Whether the entry is rendered for a resolved `state`.
    #[must_use]
    pub fn is_visible(&self, state: ResolutionState) -> bool {
        self.required_role.is_none_or(|role| state.has_role(role))
    }
}

/// Sidebar entries in render order.
pub const NAV_ENTRIES: [NavEntry; 5] = [
    // Links to the metrics dashboard but is highlighted on the root path.
    NavEntry {
        href: "/metrics",
        match_path: "/",
        rule: MatchRule::Exact,
        label: "Inicio",
        icon: "ph-house",
        required_role: Some(Role::Worker),
    },
    NavEntry {
        href: "/map",
        match_path: "/map",
        rule: MatchRule::Exact,
        label: "Mapa de contenedores y rutas",
        icon: "ph-map-trifold",
        required_role: None,
    },
    NavEntry {
        href: "/containers",
        match_path: "/containers",
        rule: MatchRule::Subtree,
        label: "Contenedores",
        icon: "ph-trash",
        required_role: None,
    },
    NavEntry {
        href: "/settings",
        match_path: "/settings",
        rule: MatchRule::Exact,
        label: "Ajustes",
        icon: "ph-gear",
        required_role: None,
    },
    NavEntry {
        href: "/about",
        match_path: "/about",
        rule: MatchRule::Exact,
        label: "Acerca de nosotros",
        icon: "ph-info",
        required_role: None,
    },
];

/// A rendered link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

/// What the sidebar shows for a resolution state and current path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarView {
    /// Role not read yet: placeholder only, no links.
    Loading,
    /// Full sidebar.
    Ready {
        links: Vec<NavLink>,
        avatar_initial: char,
    },
}

impl SidebarView {
    /// Compose the sidebar for `state` at `path`.
    #[must_use]
    pub fn compose(state: ResolutionState, path: &str) -> Self {
        if !state.is_resolved() {
            return Self::Loading;
        }

        let links = NAV_ENTRIES
            .iter()
            .filter(|entry| entry.is_visible(state))
            .map(|entry| NavLink {
                href: entry.href,
                label: entry.label,
                icon: entry.icon,
                active: entry.is_active(path),
            })
            .collect();

        Self::Ready {
            links,
            avatar_initial: state.avatar_initial(),
        }
    }
}
