//! Networking modules for the fleet REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns the shared client handle and error taxonomy, `api` wraps each
//! endpoint, and `types` defines the wire schema.

pub mod api;
pub mod http;
pub mod types;
