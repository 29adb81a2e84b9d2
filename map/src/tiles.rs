//! Raster tile math: which `{z}/{x}/{y}` tiles cover the viewport and where they land on screen.

#[cfg(test)]
#[path = "tiles_test.rs"]
mod tiles_test;

use crate::camera::{Camera, project};
use crate::consts::{MAX_ZOOM, MIN_ZOOM, TILE_SIZE_PX};

/// Default raster source.
pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Address of one raster tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub z: u32,
    pub x: u32,
    pub y: u32,
}

/// A tile plus its top-left screen position and on-screen edge length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlacement {
    pub coord: TileCoord,
    pub screen_x: f64,
    pub screen_y: f64,
    pub size: f64,
}

/// Expand a `{z}/{x}/{y}` URL template.
#[must_use]
pub fn tile_url(template: &str, coord: TileCoord) -> String {
    template
        .replace("{z}", &coord.z.to_string())
        .replace("{x}", &coord.x.to_string())
        .replace("{y}", &coord.y.to_string())
}

/// Tiles covering the camera's viewport at the nearest integer zoom.
///
/// Columns wrap around the antimeridian; rows outside the Mercator square are dropped.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn visible_tiles(camera: &Camera) -> Vec<TilePlacement> {
    if camera.width <= 0.0 || camera.height <= 0.0 {
        return Vec::new();
    }
    let z = camera.zoom.round().clamp(MIN_ZOOM, MAX_ZOOM);
    let scale = (camera.zoom - z).exp2();
    let size = TILE_SIZE_PX * scale;
    let tiles_per_axis = z.exp2() as i64;

    let origin = project(camera.center, z);
    let half = camera.viewport_center();
    let left = origin.x - half.x / scale;
    let top = origin.y - half.y / scale;
    let right = origin.x + half.x / scale;
    let bottom = origin.y + half.y / scale;

    let x0 = (left / TILE_SIZE_PX).floor() as i64;
    let x1 = (right / TILE_SIZE_PX).ceil() as i64 - 1;
    let y0 = ((top / TILE_SIZE_PX).floor() as i64).max(0);
    let y1 = ((bottom / TILE_SIZE_PX).ceil() as i64 - 1).min(tiles_per_axis - 1);

    let mut out = Vec::new();
    for ty in y0..=y1 {
        for tx in x0..=x1 {
            let coord = TileCoord { z: z as u32, x: tx.rem_euclid(tiles_per_axis) as u32, y: ty as u32 };
            out.push(TilePlacement {
                coord,
                screen_x: (tx as f64 * TILE_SIZE_PX - left) * scale,
                screen_y: (ty as f64 * TILE_SIZE_PX - top) * scale,
                size,
            });
        }
    }
    out
}
