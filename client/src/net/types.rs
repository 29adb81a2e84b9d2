//! Wire DTOs for the fleet REST API.
//!
//! DESIGN
//! ======
//! Payloads are parsed leniently: ids may arrive as strings or integers,
//! optional profile fields default to empty, and unknown bike statuses map to
//! `Unknown` so one odd record never fails a whole list.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// IDENTITY
// =============================================================================

/// Staff role. Closed set; no hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Superadmin,
    Admin,
    Staff,
    Maintenance,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Superadmin, Role::Admin, Role::Staff, Role::Maintenance];

    /// Wire spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Superadmin => "superadmin",
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Maintenance => "maintenance",
        }
    }

    /// Human-readable label for chrome.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Superadmin => "Super admin",
            Self::Admin => "Admin",
            Self::Staff => "Staff",
            Self::Maintenance => "Maintenance",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role string outside the known set.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_owned()))
    }
}

/// A staff account as returned by the API and embedded in the session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    /// Raw role string as reported by the server; the session's typed role is authoritative.
    pub role: String,
    #[serde(deserialize_with = "deserialize_opt_id")]
    pub station_id: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}

/// `POST /login` body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// `POST /login` response. Every field is optional on the wire; the auth
/// context decides whether the shape is a success.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    pub role: Option<String>,
    pub token: Option<String>,
    pub user: Option<User>,
}

/// `PUT /users/{id}` body.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

// =============================================================================
// FLEET
// =============================================================================

/// A geographic position in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "lon", alias = "longitude")]
    pub lng: f64,
}

/// Operational state of a bike.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BikeStatus {
    Available,
    InUse,
    Maintenance,
    Offline,
    #[default]
    #[serde(other)]
    Unknown,
}

impl BikeStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::InUse => "In use",
            Self::Maintenance => "Maintenance",
            Self::Offline => "Offline",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bike {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    pub label: String,
    pub status: BikeStatus,
    pub battery_pct: Option<u8>,
    /// Last reported position; `None` when the bike has never reported one.
    pub location: Option<Location>,
    #[serde(deserialize_with = "deserialize_opt_id")]
    pub station_id: Option<String>,
}

impl Bike {
    /// Label for lists, falling back to the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.label.is_empty() { &self.id } else { &self.label }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Station {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub address: String,
    pub capacity: u32,
    pub available_bikes: u32,
    pub location: Option<Location>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Trip {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub bike_id: String,
    pub user_name: String,
    #[serde(deserialize_with = "deserialize_opt_id")]
    pub start_station_id: Option<String>,
    #[serde(deserialize_with = "deserialize_opt_id")]
    pub end_station_id: Option<String>,
    pub started_at: String,
    pub ended_at: Option<String>,
    pub distance_km: f64,
    pub cost: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Receipt {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub trip_id: String,
    pub user_name: String,
    pub amount: f64,
    pub payment_method: String,
    pub issued_at: String,
}

// =============================================================================
// REVENUE
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StationRevenue {
    #[serde(deserialize_with = "deserialize_id")]
    pub station_id: String,
    pub station_name: String,
    pub amount: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevenueSummary {
    pub today: f64,
    pub week: f64,
    pub month: f64,
    pub total: f64,
    pub trips_today: u32,
    pub by_station: Vec<StationRevenue>,
}

impl RevenueSummary {
    /// Per-station rows, highest revenue first.
    #[must_use]
    pub fn ranked_stations(&self) -> Vec<StationRevenue> {
        let mut rows = self.by_station.clone();
        rows.sort_by(|a, b| b.amount.total_cmp(&a.amount).then_with(|| a.station_name.cmp(&b.station_name)));
        rows
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn id_from_value<E: serde::de::Error>(value: serde_json::Value) -> Result<Option<String>, E> {
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        _ => Err(E::custom("expected string or number id")),
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    id_from_value::<D::Error>(value)?.ok_or_else(|| D::Error::custom("id must not be null"))
}

fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    id_from_value::<D::Error>(value)
}
