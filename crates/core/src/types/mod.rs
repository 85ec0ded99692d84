//! Core types for the WasteTrack sidebar.

pub mod resolution;
pub mod role;

pub use resolution::ResolutionState;
pub use role::{Role, RoleError};
