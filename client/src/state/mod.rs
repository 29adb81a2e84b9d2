//! Application state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` and `toast` are provided once by the root component; `fleet` is
//! owned by the map page. `session` is the persisted record behind `auth`.

pub mod auth;
pub mod fleet;
pub mod session;
pub mod toast;
