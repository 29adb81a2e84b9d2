//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns and pure view logic
//! from page and component code to improve reuse and testability.

pub mod fetch;
pub mod format;
pub mod guard;
pub mod nav;
pub mod pagination;
pub mod password;
pub mod storage;
