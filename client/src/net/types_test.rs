#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Role
// =============================================================

#[test]
fn role_parses_every_wire_spelling() {
    for role in Role::ALL {
        assert_eq!(role.as_str().parse::<Role>(), Ok(role));
    }
}

#[test]
fn role_rejects_unknown_and_case_variants() {
    assert_eq!("owner".parse::<Role>(), Err(UnknownRole("owner".to_owned())));
    assert!("Staff".parse::<Role>().is_err());
    assert!("".parse::<Role>().is_err());
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Superadmin).unwrap(), "\"superadmin\"");
    assert_eq!(Role::Maintenance.to_string(), "maintenance");
}

// =============================================================
// User
// =============================================================

#[test]
fn user_defaults_missing_fields() {
    let user: User = serde_json::from_str(r#"{"id":"u1","name":"Ana"}"#).unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.email, "");
    assert_eq!(user.role, "");
    assert_eq!(user.station_id, None);
}

#[test]
fn user_accepts_numeric_and_mongo_ids() {
    let user: User = serde_json::from_str(r#"{"_id":42,"stationId":7}"#).unwrap();
    assert_eq!(user.id, "42");
    assert_eq!(user.station_id.as_deref(), Some("7"));
}

#[test]
fn user_rejects_object_id() {
    let result = serde_json::from_str::<User>(r#"{"id":{"oid":"x"}}"#);
    assert!(result.is_err());
}

#[test]
fn user_serializes_camel_case() {
    let user = User { id: "u1".to_owned(), station_id: Some("s1".to_owned()), ..User::default() };
    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value["stationId"], "s1");
    assert!(value.get("station_id").is_none());
}

// =============================================================
// Login
// =============================================================

#[test]
fn login_response_tolerates_missing_fields() {
    let resp: LoginResponse = serde_json::from_str(r#"{"token":"t1"}"#).unwrap();
    assert_eq!(resp.token.as_deref(), Some("t1"));
    assert!(resp.role.is_none());
    assert!(resp.user.is_none());
}

#[test]
fn login_request_wire_shape() {
    let req = LoginRequest { identifier: "a@b.com".to_owned(), password: "x".to_owned() };
    assert_eq!(
        serde_json::to_value(&req).unwrap(),
        serde_json::json!({"identifier": "a@b.com", "password": "x"})
    );
}

#[test]
fn profile_update_omits_absent_password() {
    let update = ProfileUpdate { name: "Ana".to_owned(), email: "a@b.com".to_owned(), phone: None, password: None };
    let value = serde_json::to_value(&update).unwrap();
    assert!(value.get("password").is_none());
    assert!(value.get("phone").is_none());
}

// =============================================================
// Fleet
// =============================================================

#[test]
fn bike_without_location_parses() {
    let bike: Bike = serde_json::from_str(r#"{"id":"b1","status":"available"}"#).unwrap();
    assert_eq!(bike.location, None);
    assert_eq!(bike.status, BikeStatus::Available);
}

#[test]
fn bike_location_accepts_long_aliases() {
    let bike: Bike = serde_json::from_str(r#"{"id":"b1","location":{"latitude":1.5,"longitude":2.5}}"#).unwrap();
    assert_eq!(bike.location, Some(Location { lat: 1.5, lng: 2.5 }));
}

#[test]
fn bike_unknown_status_maps_to_unknown() {
    let bike: Bike = serde_json::from_str(r#"{"id":"b1","status":"stolen"}"#).unwrap();
    assert_eq!(bike.status, BikeStatus::Unknown);
}

#[test]
fn bike_in_use_is_snake_case() {
    let bike: Bike = serde_json::from_str(r#"{"id":"b1","status":"in_use"}"#).unwrap();
    assert_eq!(bike.status, BikeStatus::InUse);
}

#[test]
fn bike_display_name_falls_back_to_id() {
    let bike = Bike { id: "b9".to_owned(), ..Bike::default() };
    assert_eq!(bike.display_name(), "b9");
    let named = Bike { label: "Cargo 1".to_owned(), ..bike };
    assert_eq!(named.display_name(), "Cargo 1");
}

#[test]
fn station_counts_default_to_zero() {
    let station: Station = serde_json::from_str(r#"{"id":3,"name":"Central"}"#).unwrap();
    assert_eq!(station.id, "3");
    assert_eq!(station.capacity, 0);
    assert_eq!(station.available_bikes, 0);
}

#[test]
fn trip_null_end_station_is_none() {
    let trip: Trip = serde_json::from_str(r#"{"id":"t1","bikeId":"b1","endStationId":null}"#).unwrap();
    assert_eq!(trip.bike_id, "b1");
    assert_eq!(trip.end_station_id, None);
}

// =============================================================
// Revenue
// =============================================================

#[test]
fn ranked_stations_sorts_by_amount_desc() {
    let summary = RevenueSummary {
        by_station: vec![
            StationRevenue { station_id: "a".to_owned(), station_name: "A".to_owned(), amount: 10.0 },
            StationRevenue { station_id: "b".to_owned(), station_name: "B".to_owned(), amount: 30.0 },
            StationRevenue { station_id: "c".to_owned(), station_name: "C".to_owned(), amount: 20.0 },
        ],
        ..RevenueSummary::default()
    };
    let order: Vec<String> = summary.ranked_stations().into_iter().map(|r| r.station_id).collect();
    assert_eq!(order, vec!["b", "c", "a"]);
}

#[test]
fn revenue_summary_parses_camel_case() {
    let summary: RevenueSummary =
        serde_json::from_str(r#"{"today":12.5,"tripsToday":4,"byStation":[{"stationId":1,"amount":3}]}"#).unwrap();
    assert_eq!(summary.today, 12.5);
    assert_eq!(summary.trips_today, 4);
    assert_eq!(summary.by_station[0].station_id, "1");
    assert_eq!(summary.by_station[0].amount, 3.0);
}
