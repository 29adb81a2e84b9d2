use web_sys::HtmlCanvasElement;

use crate::camera::{Camera, LatLng, Point};
use crate::consts::WHEEL_ZOOM_STEP;
use crate::focus::{FlyTo, plan_focus};
use crate::hit::{Hit, hit_test};
use crate::layers::{LayerReport, MarkerInput, rebuild_stations, reconcile_bikes};
use crate::marker::MarkerStore;
use crate::render::{self, TileCache};
use crate::tiles::DEFAULT_TILE_URL;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Pointer travel (CSS pixels) below which a press + release counts as a click.
const CLICK_SLOP_PX: f64 = 4.0;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    RenderNeeded,
    MarkerClicked(Hit),
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    pressed_at: Point,
    last: Point,
    travelled: f64,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `MapView` so it can be tested without WASM/browser dependencies.
#[derive(Debug)]
pub struct MapCore {
    pub store: MarkerStore,
    pub camera: Camera,
    pub dpr: f64,
    flight: Option<FlyTo>,
    drag: Option<Drag>,
}

impl Default for MapCore {
    fn default() -> Self {
        Self { store: MarkerStore::new(), camera: Camera::default(), dpr: 1.0, flight: None, drag: None }
    }
}

impl MapCore {
    #[must_use]
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self { camera: Camera::new(center, zoom), ..Self::default() }
    }

    // --- Data inputs ---

    /// Rebuild the station layer.
    pub fn set_stations(&mut self, stations: &[MarkerInput], selected: Option<&str>) -> LayerReport {
        rebuild_stations(&mut self.store, stations, selected)
    }

    /// Reconcile the bike layer.
    pub fn set_bikes(&mut self, bikes: &[MarkerInput], selected: Option<&str>) -> LayerReport {
        reconcile_bikes(&mut self.store, bikes, selected)
    }

    // --- Viewport ---

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width: f64, height: f64, dpr: f64) {
        self.camera.width = width.max(1.0);
        self.camera.height = height.max(1.0);
        self.dpr = dpr.max(1.0);
    }

    /// Start a fly-to toward `target` unless it is already visible.
    /// Returns whether a transition was started.
    pub fn focus_on(&mut self, target: Option<LatLng>, now_ms: f64) -> bool {
        let Some(target) = target else {
            return false;
        };
        match plan_focus(&self.camera, target, now_ms) {
            Some(flight) => {
                self.flight = Some(flight);
                true
            }
            None => false,
        }
    }

    /// Advance any running transition. Returns `true` while more frames are needed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Some(flight) = self.flight else {
            return false;
        };
        self.camera.center = flight.sample(now_ms);
        if flight.is_finished(now_ms) {
            self.flight = None;
            return false;
        }
        true
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.flight.is_some()
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Action {
        self.flight = None;
        self.drag = Some(Drag { pressed_at: screen_pt, last: screen_pt, travelled: 0.0 });
        Action::None
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Action {
        let Some(drag) = self.drag.as_mut() else {
            return Action::None;
        };
        let dx = screen_pt.x - drag.last.x;
        let dy = screen_pt.y - drag.last.y;
        drag.last = screen_pt;
        drag.travelled = drag
            .travelled
            .max(((screen_pt.x - drag.pressed_at.x).powi(2) + (screen_pt.y - drag.pressed_at.y).powi(2)).sqrt());
        self.camera.pan_by(dx, dy);
        Action::RenderNeeded
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Action {
        let Some(drag) = self.drag.take() else {
            return Action::None;
        };
        if drag.travelled > CLICK_SLOP_PX {
            return Action::RenderNeeded;
        }
        match hit_test(screen_pt, &self.store, &self.camera) {
            Some(hit) => Action::MarkerClicked(hit),
            None => Action::None,
        }
    }

    /// Drop any in-progress drag (pointer left the canvas).
    pub fn on_pointer_cancel(&mut self) -> Action {
        self.drag = None;
        Action::None
    }

    /// Zoom around the cursor; one notch is 100 delta units of `delta_y`.
    pub fn on_wheel(&mut self, screen_pt: Point, delta_y: f64) -> Action {
        if delta_y == 0.0 {
            return Action::None;
        }
        self.flight = None;
        let zoom = self.camera.zoom - (delta_y / 100.0) * WHEEL_ZOOM_STEP;
        self.camera.zoom_around(screen_pt, zoom);
        Action::RenderNeeded
    }
}

/// The full map view. Wraps `MapCore` and owns the browser canvas element.
pub struct MapView {
    canvas: HtmlCanvasElement,
    pub core: MapCore,
    tiles: TileCache,
}

impl MapView {
    /// Create a view bound to `canvas`.
    ///
    /// `on_tile_load` is invoked whenever a tile image finishes loading so the host
    /// can schedule a redraw.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, core: MapCore, on_tile_load: Option<js_sys::Function>) -> Self {
        Self { canvas, core, tiles: TileCache::new(DEFAULT_TILE_URL, on_tile_load) }
    }

    /// Update viewport size and resize the canvas backing store to match.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        self.canvas.set_width((self.core.camera.width * self.core.dpr).round() as u32);
        self.canvas.set_height((self.core.camera.height * self.core.dpr).round() as u32);
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&mut self) -> Result<(), wasm_bindgen::JsValue> {
        let ctx = render::context_2d(&self.canvas)?;
        render::draw(&ctx, &self.core, &mut self.tiles)
    }
}
