#![allow(clippy::float_cmp)]

use super::*;

fn camera() -> Camera {
    Camera { center: LatLng::new(40.0, -74.0), zoom: 14.0, width: 800.0, height: 600.0 }
}

// --- focus_target ---

#[test]
fn bike_wins_over_station() {
    let bike = MarkerInput::new("b1", Some(LatLng::new(1.0, 1.0)));
    let station = MarkerInput::new("s1", Some(LatLng::new(2.0, 2.0)));
    assert_eq!(focus_target(Some(&bike), Some(&station)), Some(LatLng::new(1.0, 1.0)));
}

#[test]
fn unlocated_bike_falls_back_to_station() {
    let bike = MarkerInput::new("b1", None);
    let station = MarkerInput::new("s1", Some(LatLng::new(2.0, 2.0)));
    assert_eq!(focus_target(Some(&bike), Some(&station)), Some(LatLng::new(2.0, 2.0)));
}

#[test]
fn nothing_selected_has_no_target() {
    assert_eq!(focus_target(None, None), None);
    let station = MarkerInput::new("s1", None);
    assert_eq!(focus_target(None, Some(&station)), None);
}

// --- plan_focus ---

#[test]
fn visible_target_needs_no_flight() {
    let cam = camera();
    assert!(plan_focus(&cam, cam.center, 0.0).is_none());
}

#[test]
fn offscreen_target_plans_flight_from_current_centre() {
    let cam = camera();
    let target = LatLng::new(41.0, -73.0);
    let flight = plan_focus(&cam, target, 1_000.0);
    assert_eq!(
        flight,
        Some(FlyTo { from: cam.center, to: target, started_ms: 1_000.0, duration_ms: FOCUS_DURATION_MS })
    );
}

#[test]
fn target_in_padding_band_triggers_flight() {
    let cam = camera();
    let near_edge = cam.to_lat_lng(crate::camera::Point::new(5.0, 300.0));
    assert!(plan_focus(&cam, near_edge, 0.0).is_some());
}

// --- FlyTo ---

#[test]
fn sample_starts_at_origin_and_ends_at_target() {
    let flight = FlyTo::new(LatLng::new(0.0, 0.0), LatLng::new(10.0, 20.0), 100.0);
    assert_eq!(flight.sample(100.0), LatLng::new(0.0, 0.0));
    assert_eq!(flight.sample(100.0 + FOCUS_DURATION_MS), LatLng::new(10.0, 20.0));
    assert_eq!(flight.sample(1e9), LatLng::new(10.0, 20.0));
}

#[test]
fn sample_midpoint_is_halfway() {
    let flight = FlyTo::new(LatLng::new(0.0, 0.0), LatLng::new(10.0, 20.0), 0.0);
    let mid = flight.sample(FOCUS_DURATION_MS / 2.0);
    assert!((mid.lat - 5.0).abs() < 1e-9);
    assert!((mid.lng - 10.0).abs() < 1e-9);
}

#[test]
fn is_finished_after_duration() {
    let flight = FlyTo::new(LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0), 0.0);
    assert!(!flight.is_finished(FOCUS_DURATION_MS - 1.0));
    assert!(flight.is_finished(FOCUS_DURATION_MS));
}

#[test]
fn zero_duration_is_immediately_finished() {
    let flight = FlyTo { duration_ms: 0.0, ..FlyTo::new(LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0), 0.0) };
    assert!(flight.is_finished(0.0));
    assert_eq!(flight.sample(0.0), LatLng::new(1.0, 1.0));
}

#[test]
fn easing_is_monotonic_and_bounded() {
    let mut prev = ease_in_out_cubic(0.0);
    assert_eq!(prev, 0.0);
    for i in 1..=20 {
        let v = ease_in_out_cubic(f64::from(i) / 20.0);
        assert!(v >= prev);
        prev = v;
    }
    assert_eq!(prev, 1.0);
}
