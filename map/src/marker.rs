//! Marker model and the in-memory store that owns every live marker.
//!
//! Markers are split into two layers keyed by entity id: stations and bikes.
//! Each marker receives a monotonically increasing `instance` serial when it is
//! created; moving a marker keeps its serial, so callers can tell an in-place
//! move from a remove + re-add. The renderer and hit-tester read markers through
//! [`MarkerStore::sorted_markers`] to respect stacking order.

#[cfg(test)]
#[path = "marker_test.rs"]
mod marker_test;

use std::collections::HashMap;

use crate::camera::LatLng;

/// Which layer a marker lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Station,
    Bike,
}

/// A single visual pin.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Entity id (bike or station id).
    pub id: String,
    pub kind: MarkerKind,
    pub position: LatLng,
    /// Stacking priority; higher values draw above and win hit-tests.
    pub z_index: i32,
    /// Highlight flag for the currently selected entity.
    pub selected: bool,
    /// Creation serial, unique for the lifetime of the store.
    pub instance: u64,
}

/// Owns the station and bike layers.
#[derive(Debug, Default)]
pub struct MarkerStore {
    stations: HashMap<String, Marker>,
    bikes: HashMap<String, Marker>,
    next_instance: u64,
}

impl MarkerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn layer(&self, kind: MarkerKind) -> &HashMap<String, Marker> {
        match kind {
            MarkerKind::Station => &self.stations,
            MarkerKind::Bike => &self.bikes,
        }
    }

    fn layer_mut(&mut self, kind: MarkerKind) -> &mut HashMap<String, Marker> {
        match kind {
            MarkerKind::Station => &mut self.stations,
            MarkerKind::Bike => &mut self.bikes,
        }
    }

    /// Create a marker, replacing any existing marker with the same id in that layer.
    /// Returns the new marker's instance serial.
    pub fn add(&mut self, kind: MarkerKind, id: &str, position: LatLng, z_index: i32) -> u64 {
        self.next_instance += 1;
        let instance = self.next_instance;
        let marker = Marker { id: id.to_owned(), kind, position, z_index, selected: false, instance };
        self.layer_mut(kind).insert(id.to_owned(), marker);
        instance
    }

    /// Move an existing marker in place. Returns `false` if no such marker exists.
    pub fn move_to(&mut self, kind: MarkerKind, id: &str, position: LatLng) -> bool {
        match self.layer_mut(kind).get_mut(id) {
            Some(marker) => {
                marker.position = position;
                true
            }
            None => false,
        }
    }

    /// Update stacking priority and highlight of an existing marker.
    pub fn restyle(&mut self, kind: MarkerKind, id: &str, z_index: i32, selected: bool) -> bool {
        match self.layer_mut(kind).get_mut(id) {
            Some(marker) => {
                marker.z_index = z_index;
                marker.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Remove a marker by id, returning it if present.
    pub fn remove(&mut self, kind: MarkerKind, id: &str) -> Option<Marker> {
        self.layer_mut(kind).remove(id)
    }

    /// Drop every marker in a layer.
    pub fn clear(&mut self, kind: MarkerKind) {
        self.layer_mut(kind).clear();
    }

    /// Look up a marker by id.
    #[must_use]
    pub fn get(&self, kind: MarkerKind, id: &str) -> Option<&Marker> {
        self.layer(kind).get(id)
    }

    /// Ids present in a layer, sorted for deterministic output.
    #[must_use]
    pub fn ids(&self, kind: MarkerKind) -> Vec<String> {
        let mut ids: Vec<String> = self.layer(kind).keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Every marker ordered bottom-first: by `z_index`, stations before bikes on ties, then id.
    #[must_use]
    pub fn sorted_markers(&self) -> Vec<&Marker> {
        let mut markers: Vec<&Marker> = self.stations.values().chain(self.bikes.values()).collect();
        markers.sort_by(|a, b| {
            a.z_index
                .cmp(&b.z_index)
                .then_with(|| kind_rank(a.kind).cmp(&kind_rank(b.kind)))
                .then_with(|| a.id.cmp(&b.id))
        });
        markers
    }

    /// Number of markers in a layer.
    #[must_use]
    pub fn len(&self, kind: MarkerKind) -> usize {
        self.layer(kind).len()
    }

    /// Whether both layers are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty() && self.bikes.is_empty()
    }
}

fn kind_rank(kind: MarkerKind) -> u8 {
    match kind {
        MarkerKind::Station => 0,
        MarkerKind::Bike => 1,
    }
}
