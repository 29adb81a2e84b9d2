//! Map surface for the fleet console.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns a
//! Web-Mercator camera, the set of station and bike markers drawn on top of
//! raster tiles, and the reconciliation rules that keep those markers in step
//! with the fleet lists the host feeds it. The host (the `client` crate's
//! `FleetMap` component) wires DOM events to the engine and reacts to the
//! [`engine::Action`]s it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level view and testable [`engine::MapCore`] |
//! | [`marker`] | Marker types and the layered marker store |
//! | [`layers`] | Station rebuild and incremental bike reconciliation |
//! | [`focus`] | Padded visibility check and fly-to animation |
//! | [`camera`] | Mercator projection and screen conversions |
//! | [`hit`] | Hit-testing markers under the pointer |
//! | [`tiles`] | Raster tile coverage and URL templates |
//! | [`render`] | Canvas2D drawing and the tile image cache |
//! | [`consts`] | Shared numeric constants (zoom limits, stacking priorities, etc.) |

pub mod camera;
pub mod consts;
pub mod engine;
pub mod focus;
pub mod hit;
pub mod layers;
pub mod marker;
pub mod render;
pub mod tiles;
