//! Rendering: draws tiles and markers to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads engine state and produces pixels; the only state it owns is the
//! tile image cache.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::MapView::render`]) hands the result to the host.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::camera::Camera;
use crate::engine::MapCore;
use crate::marker::{Marker, MarkerKind};
use crate::tiles::{TileCoord, tile_url, visible_tiles};

const BACKGROUND: &str = "#dfe6ea";
const STATION_FILL: &str = "#1d4ed8";
const BIKE_FILL: &str = "#16a34a";
const MARKER_OUTLINE: &str = "#ffffff";
const SELECTED_OUTLINE: &str = "#f59e0b";

/// Half the edge length of a station square, in CSS pixels.
const STATION_HALF_PX: f64 = 7.0;
const BIKE_RADIUS_PX: f64 = 6.0;
const SELECTED_BIKE_RADIUS_PX: f64 = 8.0;

/// Markers this far outside the viewport are not drawn.
const CULL_MARGIN_PX: f64 = 16.0;

/// Upper bound on cached tile images before stale zoom levels are evicted.
const MAX_CACHED_TILES: usize = 256;

/// Tile images keyed by coordinate, created lazily and loaded by the browser.
pub struct TileCache {
    template: String,
    images: HashMap<TileCoord, HtmlImageElement>,
    on_load: Option<js_sys::Function>,
}

impl TileCache {
    #[must_use]
    pub fn new(template: &str, on_load: Option<js_sys::Function>) -> Self {
        Self { template: template.to_owned(), images: HashMap::new(), on_load }
    }

    fn image(&mut self, coord: TileCoord) -> Result<&HtmlImageElement, JsValue> {
        match self.images.entry(coord) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let img = HtmlImageElement::new()?;
                img.set_cross_origin(Some("anonymous"));
                if let Some(cb) = &self.on_load {
                    img.set_onload(Some(cb));
                }
                img.set_src(&tile_url(&self.template, coord));
                Ok(entry.insert(img))
            }
        }
    }

    fn evict_except_zoom(&mut self, z: u32) {
        if self.images.len() > MAX_CACHED_TILES {
            self.images.retain(|coord, _| coord.z == z);
        }
    }
}

/// Fetch the canvas's 2D context.
///
/// # Errors
///
/// Returns `Err` if the browser refuses a 2D context for the element.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("2d context has unexpected type"))
}

/// Draw the full scene: background, tiles, then markers bottom-first.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(ctx: &CanvasRenderingContext2d, core: &MapCore, tiles: &mut TileCache) -> Result<(), JsValue> {
    let camera = &core.camera;

    ctx.set_transform(core.dpr, 0.0, 0.0, core.dpr, 0.0, 0.0)?;
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, camera.width, camera.height);

    draw_tiles(ctx, camera, tiles)?;

    for marker in core.store.sorted_markers() {
        draw_marker(ctx, camera, marker)?;
    }
    Ok(())
}

fn draw_tiles(ctx: &CanvasRenderingContext2d, camera: &Camera, tiles: &mut TileCache) -> Result<(), JsValue> {
    let placements = visible_tiles(camera);
    if let Some(first) = placements.first() {
        tiles.evict_except_zoom(first.coord.z);
    }
    for placement in placements {
        let img = tiles.image(placement.coord)?;
        if !img.complete() || img.natural_width() == 0 {
            continue;
        }
        ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            placement.screen_x,
            placement.screen_y,
            placement.size,
            placement.size,
        )?;
    }
    Ok(())
}

fn draw_marker(ctx: &CanvasRenderingContext2d, camera: &Camera, marker: &Marker) -> Result<(), JsValue> {
    let p = camera.to_screen(marker.position);
    if p.x < -CULL_MARGIN_PX
        || p.y < -CULL_MARGIN_PX
        || p.x > camera.width + CULL_MARGIN_PX
        || p.y > camera.height + CULL_MARGIN_PX
    {
        return Ok(());
    }

    let outline = if marker.selected { SELECTED_OUTLINE } else { MARKER_OUTLINE };
    ctx.set_stroke_style_str(outline);
    ctx.set_line_width(if marker.selected { 3.0 } else { 2.0 });

    match marker.kind {
        MarkerKind::Station => {
            let side = STATION_HALF_PX * 2.0;
            ctx.set_fill_style_str(STATION_FILL);
            ctx.fill_rect(p.x - STATION_HALF_PX, p.y - STATION_HALF_PX, side, side);
            ctx.stroke_rect(p.x - STATION_HALF_PX, p.y - STATION_HALF_PX, side, side);
        }
        MarkerKind::Bike => {
            let radius = if marker.selected { SELECTED_BIKE_RADIUS_PX } else { BIKE_RADIUS_PX };
            ctx.set_fill_style_str(BIKE_FILL);
            ctx.begin_path();
            ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI)?;
            ctx.fill();
            ctx.stroke();
        }
    }
    Ok(())
}
