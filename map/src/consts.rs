//! Shared numeric constants for the map crate.

// ── Projection ──────────────────────────────────────────────────

/// Edge length of one raster tile in CSS pixels.
pub const TILE_SIZE_PX: f64 = 256.0;

/// Latitude bound of the Web-Mercator square, in degrees.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Zoom limits for the camera.
pub const MIN_ZOOM: f64 = 2.0;
pub const MAX_ZOOM: f64 = 19.0;

/// Zoom change per wheel notch (one notch = 100 delta units).
pub const WHEEL_ZOOM_STEP: f64 = 0.5;

// ── Markers ─────────────────────────────────────────────────────

/// Stacking priority shared by every station marker.
pub const STATION_Z_INDEX: i32 = 100;

/// Stacking priority shared by every bike marker that is not selected.
pub const BIKE_BASE_Z_INDEX: i32 = 200;

/// Stacking priority of the selected bike; above every other marker.
pub const SELECTED_Z_INDEX: i32 = 1_000;

/// Screen-space hit slop around a marker centre, in pixels.
pub const MARKER_HIT_RADIUS_PX: f64 = 12.0;

// ── Focus ───────────────────────────────────────────────────────

/// Inset applied to every viewport edge before deciding whether a target is visible.
pub const FOCUS_PADDING_PX: f64 = 48.0;

/// Duration of a fly-to transition, in milliseconds.
pub const FOCUS_DURATION_MS: f64 = 600.0;
