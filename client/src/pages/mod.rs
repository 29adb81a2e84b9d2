//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its own fetches and route-scoped state and delegates shared
//! rendering to `components`.

pub mod dashboard;
pub mod fleet;
pub mod login;
pub mod profile;
pub mod receipts;
pub mod trips;
pub mod unauthorized;
