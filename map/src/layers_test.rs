use super::*;

fn located(id: &str, lat: f64, lng: f64) -> MarkerInput {
    MarkerInput::new(id, Some(LatLng::new(lat, lng)))
}

fn unlocated(id: &str) -> MarkerInput {
    MarkerInput::new(id, None)
}

fn instance(store: &MarkerStore, id: &str) -> Option<u64> {
    store.get(MarkerKind::Bike, id).map(|m| m.instance)
}

// =============================================================
// Bikes: set equality
// =============================================================

#[test]
fn bike_ids_match_located_inputs() {
    let mut store = MarkerStore::new();
    let bikes = vec![located("b1", 1.0, 1.0), unlocated("b2"), located("b3", 3.0, 3.0)];
    let report = reconcile_bikes(&mut store, &bikes, None);
    assert_eq!(store.ids(MarkerKind::Bike), vec!["b1", "b3"]);
    assert_eq!(report.created, 2);
    assert_eq!(report.skipped, 1);
}

#[test]
fn bike_losing_location_is_removed() {
    let mut store = MarkerStore::new();
    reconcile_bikes(&mut store, &[located("b1", 1.0, 1.0)], None);
    let report = reconcile_bikes(&mut store, &[unlocated("b1")], None);
    assert!(store.ids(MarkerKind::Bike).is_empty());
    assert_eq!(report.removed, 1);
    assert_eq!(report.skipped, 1);
}

#[test]
fn empty_input_clears_bike_layer() {
    let mut store = MarkerStore::new();
    reconcile_bikes(&mut store, &[located("b1", 1.0, 1.0), located("b2", 2.0, 2.0)], None);
    let report = reconcile_bikes(&mut store, &[], None);
    assert_eq!(store.len(MarkerKind::Bike), 0);
    assert_eq!(report.removed, 2);
}

// =============================================================
// Bikes: identity preservation
// =============================================================

#[test]
fn moved_bike_keeps_instance_and_new_bike_is_created() {
    let mut store = MarkerStore::new();
    reconcile_bikes(&mut store, &[located("b1", 1.0, 1.0)], None);
    let b1_before = instance(&store, "b1");

    let report = reconcile_bikes(&mut store, &[located("b1", 2.0, 2.0), located("b2", 3.0, 3.0)], None);

    assert_eq!(instance(&store, "b1"), b1_before);
    assert_eq!(store.get(MarkerKind::Bike, "b1").map(|m| m.position), Some(LatLng::new(2.0, 2.0)));
    assert!(instance(&store, "b2").is_some());
    assert_eq!(report, LayerReport { created: 1, moved: 1, unchanged: 0, removed: 0, skipped: 0 });
}

#[test]
fn removed_bike_is_evicted_and_survivor_untouched() {
    let mut store = MarkerStore::new();
    reconcile_bikes(&mut store, &[located("b1", 1.0, 1.0), located("b2", 2.0, 2.0)], None);
    let b2_before = store.get(MarkerKind::Bike, "b2").cloned();

    let report = reconcile_bikes(&mut store, &[located("b2", 2.0, 2.0)], None);

    assert!(store.get(MarkerKind::Bike, "b1").is_none());
    assert_eq!(store.get(MarkerKind::Bike, "b2").cloned(), b2_before);
    assert_eq!(report, LayerReport { created: 0, moved: 0, unchanged: 1, removed: 1, skipped: 0 });
}

// =============================================================
// Bikes: stacking
// =============================================================

#[test]
fn selected_bike_is_raised() {
    let mut store = MarkerStore::new();
    reconcile_bikes(&mut store, &[located("b1", 1.0, 1.0), located("b2", 2.0, 2.0)], Some("b2"));
    let b1 = store.get(MarkerKind::Bike, "b1").cloned();
    let b2 = store.get(MarkerKind::Bike, "b2").cloned();
    assert_eq!(b1.as_ref().map(|m| (m.z_index, m.selected)), Some((BIKE_BASE_Z_INDEX, false)));
    assert_eq!(b2.as_ref().map(|m| (m.z_index, m.selected)), Some((SELECTED_Z_INDEX, true)));
}

#[test]
fn changing_selection_lowers_previous_bike() {
    let mut store = MarkerStore::new();
    let bikes = vec![located("b1", 1.0, 1.0), located("b2", 2.0, 2.0)];
    reconcile_bikes(&mut store, &bikes, Some("b1"));
    reconcile_bikes(&mut store, &bikes, Some("b2"));
    assert_eq!(store.get(MarkerKind::Bike, "b1").map(|m| m.z_index), Some(BIKE_BASE_Z_INDEX));
    assert_eq!(store.get(MarkerKind::Bike, "b2").map(|m| m.z_index), Some(SELECTED_Z_INDEX));
}

#[test]
fn selected_bike_tops_every_station() {
    let mut store = MarkerStore::new();
    rebuild_stations(&mut store, &[located("s1", 1.0, 1.0)], None);
    reconcile_bikes(&mut store, &[located("b1", 1.0, 1.0)], Some("b1"));
    let top = store.sorted_markers().last().map(|m| m.id.clone());
    assert_eq!(top.as_deref(), Some("b1"));
}

// =============================================================
// Stations
// =============================================================

#[test]
fn stations_are_rebuilt_with_fresh_instances() {
    let mut store = MarkerStore::new();
    rebuild_stations(&mut store, &[located("s1", 1.0, 1.0)], None);
    let before = store.get(MarkerKind::Station, "s1").map(|m| m.instance);
    let report = rebuild_stations(&mut store, &[located("s1", 1.0, 1.0), located("s2", 2.0, 2.0)], None);
    let after = store.get(MarkerKind::Station, "s1").map(|m| m.instance);
    assert_ne!(before, after);
    assert_eq!(report.removed, 1);
    assert_eq!(report.created, 2);
}

#[test]
fn stations_without_location_are_skipped() {
    let mut store = MarkerStore::new();
    let report = rebuild_stations(&mut store, &[unlocated("s1"), located("s2", 2.0, 2.0)], None);
    assert_eq!(store.ids(MarkerKind::Station), vec!["s2"]);
    assert_eq!(report.skipped, 1);
}

#[test]
fn selected_station_is_flagged() {
    let mut store = MarkerStore::new();
    rebuild_stations(&mut store, &[located("s1", 1.0, 1.0), located("s2", 2.0, 2.0)], Some("s2"));
    assert_eq!(store.get(MarkerKind::Station, "s1").map(|m| m.selected), Some(false));
    assert_eq!(store.get(MarkerKind::Station, "s2").map(|m| m.selected), Some(true));
}

#[test]
fn station_rebuild_leaves_bikes_alone() {
    let mut store = MarkerStore::new();
    reconcile_bikes(&mut store, &[located("b1", 1.0, 1.0)], None);
    let before = instance(&store, "b1");
    rebuild_stations(&mut store, &[], None);
    assert_eq!(instance(&store, "b1"), before);
}
