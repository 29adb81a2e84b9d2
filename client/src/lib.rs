//! # client
//!
//! Leptos + WASM frontend for the bike-sharing fleet console.
//!
//! This crate contains pages, components, application state (auth context,
//! toasts, fleet selection), REST types, and browser utilities. It drives the
//! `map` crate for imperative canvas rendering via the `FleetMap` bridge
//! component.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install panic/log hooks and hydrate the server-rendered app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger init failed: {e}").into());
    }
    leptos::mount::hydrate_body(app::App);
}
