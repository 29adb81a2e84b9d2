use super::*;

#[test]
fn money_rounds_and_groups() {
    assert_eq!(money(0.0), "$0.00");
    assert_eq!(money(12.5), "$12.50");
    assert_eq!(money(1234.567), "$1,234.57");
    assert_eq!(money(1_000_000.0), "$1,000,000.00");
    assert_eq!(money(-3.2), "-$3.20");
}

#[test]
fn timestamp_trims_iso_strings() {
    assert_eq!(timestamp("2024-05-01T08:30:12Z"), "2024-05-01 08:30");
    assert_eq!(timestamp("yesterday"), "yesterday");
    assert_eq!(timestamp("  "), EMPTY_CELL);
    assert_eq!(optional_timestamp(None), EMPTY_CELL);
}

#[test]
fn distance_and_battery() {
    assert_eq!(distance_km(3.16), "3.2 km");
    assert_eq!(battery(Some(87)), "87%");
    assert_eq!(battery(None), EMPTY_CELL);
}

#[test]
fn or_dash_treats_empty_as_missing() {
    assert_eq!(or_dash(Some("s1")), "s1");
    assert_eq!(or_dash(Some("")), EMPTY_CELL);
    assert_eq!(or_dash(None), EMPTY_CELL);
}
