//! Fleet map page state: the latest bike and station lists plus selection.
//!
//! DESIGN
//! ======
//! Bike and station selection are mutually exclusive. `focus_seq` increments
//! on every selection so re-selecting the same entity still re-centers the map.

#[cfg(test)]
#[path = "fleet_test.rs"]
mod fleet_test;

use crate::net::types::{Bike, Location, Station};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FleetState {
    pub bikes: Vec<Bike>,
    pub stations: Vec<Station>,
    pub selected_bike: Option<String>,
    pub selected_station: Option<String>,
    pub focus_seq: u64,
    pub bikes_loaded: bool,
    pub stations_loaded: bool,
}

impl FleetState {
    /// Replace the bike list, dropping the selection if that bike vanished.
    pub fn apply_bikes(&mut self, bikes: Vec<Bike>) {
        self.bikes = bikes;
        self.bikes_loaded = true;
        if let Some(id) = self.selected_bike.as_deref() {
            if !self.bikes.iter().any(|b| b.id == id) {
                self.selected_bike = None;
            }
        }
    }

    /// Replace the station list, dropping the selection if that station vanished.
    pub fn apply_stations(&mut self, stations: Vec<Station>) {
        self.stations = stations;
        self.stations_loaded = true;
        if let Some(id) = self.selected_station.as_deref() {
            if !self.stations.iter().any(|s| s.id == id) {
                self.selected_station = None;
            }
        }
    }

    pub fn select_bike(&mut self, id: &str) {
        self.selected_bike = Some(id.to_owned());
        self.selected_station = None;
        self.focus_seq += 1;
    }

    pub fn select_station(&mut self, id: &str) {
        self.selected_station = Some(id.to_owned());
        self.selected_bike = None;
        self.focus_seq += 1;
    }

    pub fn clear_selection(&mut self) {
        self.selected_bike = None;
        self.selected_station = None;
    }

    #[must_use]
    pub fn selected_bike(&self) -> Option<&Bike> {
        let id = self.selected_bike.as_deref()?;
        self.bikes.iter().find(|b| b.id == id)
    }

    #[must_use]
    pub fn selected_station(&self) -> Option<&Station> {
        let id = self.selected_station.as_deref()?;
        self.stations.iter().find(|s| s.id == id)
    }

    /// Where the map should look: the selected bike if it has a position,
    /// otherwise the selected station.
    #[must_use]
    pub fn focus_location(&self) -> Option<Location> {
        self.selected_bike()
            .and_then(|b| b.location)
            .or_else(|| self.selected_station().and_then(|s| s.location))
    }

    /// Bikes currently docked at `station_id`.
    #[must_use]
    pub fn bikes_at(&self, station_id: &str) -> Vec<&Bike> {
        self.bikes
            .iter()
            .filter(|b| b.station_id.as_deref() == Some(station_id))
            .collect()
    }
}

impl FleetState {
    /// Mean position of the located stations, used as the map's opening view.
    #[must_use]
    pub fn station_centroid(&self) -> Option<Location> {
        let located: Vec<Location> = self.stations.iter().filter_map(|s| s.location).collect();
        if located.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let n = located.len() as f64;
        let lat = located.iter().map(|l| l.lat).sum::<f64>() / n;
        let lng = located.iter().map(|l| l.lng).sum::<f64>() / n;
        Some(Location { lat, lng })
    }

    /// Bikes that cannot be placed on the map.
    #[must_use]
    pub fn unlocated_bike_count(&self) -> usize {
        self.bikes.iter().filter(|b| b.location.is_none()).count()
    }
}
