#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_LATITUDE, MAX_ZOOM, MIN_ZOOM, TILE_SIZE_PX};

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A point in either screen space (CSS pixels) or world space (Mercator pixels at a zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width of the whole Mercator world at `zoom`, in pixels.
#[must_use]
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE_PX * zoom.exp2()
}

/// Project a geographic position to world pixels at `zoom`.
#[must_use]
pub fn project(pos: LatLng, zoom: f64) -> Point {
    let size = world_size(zoom);
    let lat = pos.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let sin_lat = lat.to_radians().sin();
    let x = (pos.lng + 180.0) / 360.0 * size;
    let y = (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI)) * size;
    Point::new(x, y)
}

/// Inverse of [`project`].
#[must_use]
pub fn unproject(world: Point, zoom: f64) -> LatLng {
    let size = world_size(zoom);
    let lng = world.x / size * 360.0 - 180.0;
    let n = PI - 2.0 * PI * world.y / size;
    let lat = n.sinh().atan().to_degrees();
    LatLng::new(lat, lng)
}

/// Map camera: which geographic point sits at the viewport centre, at what zoom.
///
/// `width` / `height` are the viewport size in CSS pixels.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub center: LatLng,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { center: LatLng::new(0.0, 0.0), zoom: MIN_ZOOM, width: 0.0, height: 0.0 }
    }
}

impl Camera {
    #[must_use]
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self { center, zoom: clamp_zoom(zoom), ..Self::default() }
    }

    /// Screen-space centre of the viewport.
    #[must_use]
    pub fn viewport_center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    /// Convert a geographic position to screen coordinates (CSS pixels).
    #[must_use]
    pub fn to_screen(&self, pos: LatLng) -> Point {
        let world = project(pos, self.zoom);
        let origin = project(self.center, self.zoom);
        let half = self.viewport_center();
        Point::new(world.x - origin.x + half.x, world.y - origin.y + half.y)
    }

    /// Convert a screen-space point to a geographic position.
    #[must_use]
    pub fn to_lat_lng(&self, screen: Point) -> LatLng {
        let origin = project(self.center, self.zoom);
        let half = self.viewport_center();
        unproject(Point::new(origin.x + screen.x - half.x, origin.y + screen.y - half.y), self.zoom)
    }

    /// Whether `pos` lies inside the viewport shrunk by `padding` pixels on every edge.
    ///
    /// The padding is capped at half the viewport so a tiny viewport still has a
    /// (degenerate) visible region at its centre.
    #[must_use]
    pub fn contains_padded(&self, pos: LatLng, padding: f64) -> bool {
        let p = self.to_screen(pos);
        let pad_x = padding.min(self.width * 0.5);
        let pad_y = padding.min(self.height * 0.5);
        p.x >= pad_x && p.x <= self.width - pad_x && p.y >= pad_y && p.y <= self.height - pad_y
    }

    /// Move the camera so content follows a drag of `(dx, dy)` screen pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let half = self.viewport_center();
        self.center = self.to_lat_lng(Point::new(half.x - dx, half.y - dy));
    }

    /// Change zoom while keeping the geographic point under `anchor` fixed on screen.
    pub fn zoom_around(&mut self, anchor: Point, zoom: f64) {
        let pinned = self.to_lat_lng(anchor);
        self.zoom = clamp_zoom(zoom);
        let pinned_world = project(pinned, self.zoom);
        let half = self.viewport_center();
        self.center = unproject(
            Point::new(pinned_world.x - (anchor.x - half.x), pinned_world.y - (anchor.y - half.y)),
            self.zoom,
        );
    }
}

/// Clamp a zoom level to the supported range.
#[must_use]
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}
