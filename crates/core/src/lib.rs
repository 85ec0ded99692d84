//! WasteTrack Core - Role resolution and session lifecycle.
//!
//! This crate holds the logic behind the navigation sidebar of the WasteTrack
//! web application. The `web` crate renders it and wires it to the browser
//! session.
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure logic - no HTTP and no
//! real storage. Persistent client storage, the session token jar and the
//! navigation dispatcher are injected through traits, so everything here can
//! be exercised against in-memory fakes.
//!
//! # Modules
//!
//! - [`types`] - `Role` and the tri-state `ResolutionState`
//! - [`store`] - `ClientStore` trait, fixed keys and `InMemoryStore`
//! - [`resolver`] - one-shot `RoleResolver` state machine
//! - [`nav`] - navigation table, active matching and render gating
//! - [`logout`] - ordered, best-effort `SessionTerminator`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod logout;
pub mod nav;
pub mod resolver;
pub mod store;
pub mod types;

pub use logout::{LogoutReport, Navigator, SessionTerminator, TokenJar};
pub use nav::{NavEntry, NavLink, SidebarView};
pub use resolver::RoleResolver;
pub use store::{ClientStore, InMemoryStore, StoreError};
pub use types::*;
