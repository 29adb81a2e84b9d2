use axum::http::HeaderValue;

use super::*;

// =============================================================================
// upstream_url
// =============================================================================

#[test]
fn upstream_url_joins_base_and_path() {
    assert_eq!(upstream_url("http://fleet:8080", "bikes", None), "http://fleet:8080/bikes");
}

#[test]
fn upstream_url_normalizes_slashes() {
    assert_eq!(upstream_url("http://fleet:8080/", "/users/7", None), "http://fleet:8080/users/7");
}

#[test]
fn upstream_url_keeps_base_path_prefix() {
    assert_eq!(upstream_url("https://fleet.test/v2", "revenue/summary", None), "https://fleet.test/v2/revenue/summary");
}

#[test]
fn upstream_url_appends_query() {
    assert_eq!(
        upstream_url("http://fleet:8080", "trips", Some("page=2&sort=desc")),
        "http://fleet:8080/trips?page=2&sort=desc"
    );
}

#[test]
fn upstream_url_ignores_empty_query() {
    assert_eq!(upstream_url("http://fleet:8080", "trips", Some("")), "http://fleet:8080/trips");
}

// =============================================================================
// raw_rest
// =============================================================================

#[test]
fn raw_rest_keeps_percent_escapes() {
    let uri: Uri = "/api/users/a%2Fb%3Fx%3D1?page=2".parse().unwrap();
    assert_eq!(raw_rest(&uri), "users/a%2Fb%3Fx%3D1");
}

#[test]
fn raw_rest_is_empty_outside_the_prefix() {
    let uri: Uri = "/healthz".parse().unwrap();
    assert_eq!(raw_rest(&uri), "");
}

// =============================================================================
// header filtering
// =============================================================================

#[test]
fn hop_by_hop_names_are_recognized() {
    assert!(is_hop_by_hop(&header::CONNECTION));
    assert!(is_hop_by_hop(&header::TRANSFER_ENCODING));
    assert!(is_hop_by_hop(&header::UPGRADE));
    assert!(!is_hop_by_hop(&header::AUTHORIZATION));
    assert!(!is_hop_by_hop(&header::CONTENT_TYPE));
}

#[test]
fn end_to_end_headers_keeps_authorization_and_content_type() {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer t1"));
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));

    let out = end_to_end_headers(&headers, &[]);
    assert_eq!(out.get(header::AUTHORIZATION).unwrap(), "Bearer t1");
    assert_eq!(out.get(header::CONTENT_TYPE).unwrap(), "application/json");
    assert!(out.get(header::CONNECTION).is_none());
    assert!(out.get(header::TRANSFER_ENCODING).is_none());
}

#[test]
fn end_to_end_headers_drops_connection_listed_names() {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONNECTION, HeaderValue::from_static("close, X-Session-Hint"));
    headers.insert("x-session-hint", HeaderValue::from_static("abc"));
    headers.insert("x-request-id", HeaderValue::from_static("r-1"));

    let out = end_to_end_headers(&headers, &[]);
    assert!(out.get("x-session-hint").is_none());
    assert_eq!(out.get("x-request-id").unwrap(), "r-1");
}

#[test]
fn end_to_end_headers_applies_extra_drops() {
    let mut headers = HeaderMap::new();
    headers.insert(header::HOST, HeaderValue::from_static("console.local"));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    let out = end_to_end_headers(&headers, &[header::HOST, header::CONTENT_LENGTH]);
    assert!(out.get(header::HOST).is_none());
    assert!(out.get(header::CONTENT_LENGTH).is_none());
    assert_eq!(out.get(header::ACCEPT).unwrap(), "application/json");
}

#[test]
fn end_to_end_headers_preserves_repeated_values() {
    let mut headers = HeaderMap::new();
    headers.append(header::SET_COOKIE, HeaderValue::from_static("a=1"));
    headers.append(header::SET_COOKIE, HeaderValue::from_static("b=2"));

    let out = end_to_end_headers(&headers, &[]);
    assert_eq!(out.get_all(header::SET_COOKIE).iter().count(), 2);
}
