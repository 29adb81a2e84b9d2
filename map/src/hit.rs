#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::MARKER_HIT_RADIUS_PX;
use crate::marker::{MarkerKind, MarkerStore};

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub kind: MarkerKind,
    pub id: String,
}

/// Find the topmost marker whose centre lies within the hit radius of `screen_pt`.
#[must_use]
pub fn hit_test(screen_pt: Point, store: &MarkerStore, camera: &Camera) -> Option<Hit> {
    let radius_sq = MARKER_HIT_RADIUS_PX * MARKER_HIT_RADIUS_PX;
    store.sorted_markers().into_iter().rev().find_map(|marker| {
        let p = camera.to_screen(marker.position);
        let dx = p.x - screen_pt.x;
        let dy = p.y - screen_pt.y;
        (dx * dx + dy * dy <= radius_sq).then(|| Hit { kind: marker.kind, id: marker.id.clone() })
    })
}
