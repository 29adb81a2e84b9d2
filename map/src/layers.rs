//! Marker reconciliation for the station and bike layers.
//!
//! Stations change rarely, so their layer is rebuilt from scratch on every
//! update. Bikes move constantly, so their layer is diffed against the incoming
//! list: stale markers are evicted, surviving markers are moved in place, and
//! only genuinely new bikes get a fresh marker. Entities without a known
//! location never produce a marker; they are counted in the returned report.

#[cfg(test)]
#[path = "layers_test.rs"]
mod layers_test;

use std::collections::HashSet;

use crate::camera::LatLng;
use crate::consts::{BIKE_BASE_Z_INDEX, SELECTED_Z_INDEX, STATION_Z_INDEX};
use crate::marker::{MarkerKind, MarkerStore};

/// One entity to place on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerInput {
    pub id: String,
    pub position: Option<LatLng>,
}

impl MarkerInput {
    #[must_use]
    pub fn new(id: impl Into<String>, position: Option<LatLng>) -> Self {
        Self { id: id.into(), position }
    }
}

/// What a reconciliation pass did to a layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerReport {
    pub created: usize,
    pub moved: usize,
    pub unchanged: usize,
    pub removed: usize,
    /// Inputs dropped because they had no location.
    pub skipped: usize,
}

/// Replace every station marker with one per located station.
pub fn rebuild_stations(store: &mut MarkerStore, stations: &[MarkerInput], selected: Option<&str>) -> LayerReport {
    let mut report = LayerReport { removed: store.len(MarkerKind::Station), ..LayerReport::default() };
    store.clear(MarkerKind::Station);

    for station in stations {
        let Some(position) = station.position else {
            report.skipped += 1;
            continue;
        };
        store.add(MarkerKind::Station, &station.id, position, STATION_Z_INDEX);
        store.restyle(MarkerKind::Station, &station.id, STATION_Z_INDEX, selected == Some(station.id.as_str()));
        report.created += 1;
    }
    report
}

/// Bring the bike layer in line with `bikes` without recreating surviving markers.
///
/// After this call the bike layer's id set equals the ids in `bikes` that have a
/// position. The selected bike is raised to [`SELECTED_Z_INDEX`]; all others sit
/// at [`BIKE_BASE_Z_INDEX`].
pub fn reconcile_bikes(store: &mut MarkerStore, bikes: &[MarkerInput], selected: Option<&str>) -> LayerReport {
    let mut report = LayerReport::default();

    let located: HashSet<&str> = bikes
        .iter()
        .filter(|b| b.position.is_some())
        .map(|b| b.id.as_str())
        .collect();
    for id in store.ids(MarkerKind::Bike) {
        if !located.contains(id.as_str()) {
            store.remove(MarkerKind::Bike, &id);
            report.removed += 1;
        }
    }

    for bike in bikes {
        let Some(position) = bike.position else {
            report.skipped += 1;
            continue;
        };
        let is_selected = selected == Some(bike.id.as_str());
        let z_index = if is_selected { SELECTED_Z_INDEX } else { BIKE_BASE_Z_INDEX };

        match store.get(MarkerKind::Bike, &bike.id).map(|m| m.position) {
            Some(current) if current == position => report.unchanged += 1,
            Some(_) => {
                store.move_to(MarkerKind::Bike, &bike.id, position);
                report.moved += 1;
            }
            None => {
                store.add(MarkerKind::Bike, &bike.id, position, z_index);
                report.created += 1;
            }
        }
        store.restyle(MarkerKind::Bike, &bike.id, z_index, is_selected);
    }
    report
}
