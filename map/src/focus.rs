//! Viewport focus: decide whether the selected entity needs the camera to move,
//! and animate the move.

#[cfg(test)]
#[path = "focus_test.rs"]
mod focus_test;

use crate::camera::{Camera, LatLng};
use crate::consts::{FOCUS_DURATION_MS, FOCUS_PADDING_PX};
use crate::layers::MarkerInput;

/// Where the camera should look: the selected bike if it has a location,
/// otherwise the selected station if it has one.
#[must_use]
pub fn focus_target(selected_bike: Option<&MarkerInput>, selected_station: Option<&MarkerInput>) -> Option<LatLng> {
    selected_bike
        .and_then(|b| b.position)
        .or_else(|| selected_station.and_then(|s| s.position))
}

/// Plan a fly-to toward `target`, or `None` when it is already comfortably visible.
#[must_use]
pub fn plan_focus(camera: &Camera, target: LatLng, now_ms: f64) -> Option<FlyTo> {
    if camera.contains_padded(target, FOCUS_PADDING_PX) {
        return None;
    }
    Some(FlyTo::new(camera.center, target, now_ms))
}

/// An in-flight camera transition between two centres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyTo {
    pub from: LatLng,
    pub to: LatLng,
    pub started_ms: f64,
    pub duration_ms: f64,
}

impl FlyTo {
    #[must_use]
    pub fn new(from: LatLng, to: LatLng, started_ms: f64) -> Self {
        Self { from, to, started_ms, duration_ms: FOCUS_DURATION_MS }
    }

    /// Linear progress in `[0, 1]` at `now_ms`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.started_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Camera centre at `now_ms`, eased.
    #[must_use]
    pub fn sample(&self, now_ms: f64) -> LatLng {
        let t = ease_in_out_cubic(self.progress(now_ms));
        LatLng::new(
            self.from.lat + (self.to.lat - self.from.lat) * t,
            self.from.lng + (self.to.lng - self.from.lng) * t,
        )
    }

    #[must_use]
    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

/// Cubic ease-in-out on `[0, 1]`.
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
