//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared chrome (sidebar, toasts, pagination), the route
//! guard, and the fleet map host while reading shared state from Leptos
//! context providers.

pub mod fleet_map;
pub mod paginator;
pub mod protected;
pub mod sidebar;
pub mod toast_host;
