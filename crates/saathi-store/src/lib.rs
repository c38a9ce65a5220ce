//! # saathi-store
//!
//! The application state: one slice per domain, each owning a plain state
//! struct, an action enum, and a pure synchronous reducer. The aggregate
//! [`AppState`] is constructed once at startup and injected wherever it is
//! needed; every write goes through [`AppState::dispatch`], which routes an
//! action to exactly one slice reducer. No slice reducer reads another
//! slice's state.

pub mod admin;
pub mod auth;
pub mod matches;
pub mod messaging;
pub mod models;
pub mod notification;
pub mod profile;
pub mod search;
pub mod store;
pub mod subscription;
pub mod verification;

pub use models::*;
pub use store::{new_store, Action, AppState, Store};
