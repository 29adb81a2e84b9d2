use super::*;

#[test]
fn user_endpoint_formats_expected_path() {
    assert_eq!(user_endpoint("u123"), "/users/u123");
}

#[test]
fn user_endpoint_escapes_reserved_characters() {
    assert_eq!(user_endpoint("a/b c"), "/users/a%2Fb%20c");
}

#[test]
fn list_payload_accepts_bare_arrays() {
    let parsed: ListPayload<Station> = serde_json::from_str(r#"[{"id":"s1","name":"Dock"}]"#).unwrap();
    let items = parsed.into_vec();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Dock");
}

#[test]
fn list_payload_accepts_data_envelope() {
    let parsed: ListPayload<Bike> = serde_json::from_str(r#"{"data":[{"id":"b1"},{"id":"b2"}]}"#).unwrap();
    let ids: Vec<String> = parsed.into_vec().into_iter().map(|b| b.id).collect();
    assert_eq!(ids, vec!["b1".to_owned(), "b2".to_owned()]);
}

#[test]
fn user_reply_accepts_bare_record() {
    let user = parse_user_reply(r#"{"id":7,"name":"Dana","stationId":"s1"}"#).unwrap();
    assert_eq!(user.id, "7");
    assert_eq!(user.name, "Dana");
    assert_eq!(user.station_id.as_deref(), Some("s1"));
}

#[test]
fn user_reply_accepts_user_envelope() {
    let user = parse_user_reply(r#"{"message":"ok","user":{"id":"7","name":"Dana"}}"#).unwrap();
    assert_eq!(user.id, "7");
    assert_eq!(user.name, "Dana");
}

#[test]
fn user_reply_without_record_is_none() {
    assert_eq!(parse_user_reply(r#"{"message":"Profile updated"}"#), None);
    assert_eq!(parse_user_reply(""), None);
    assert_eq!(parse_user_reply("  \n"), None);
    assert_eq!(parse_user_reply("OK"), None);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn calls_are_unavailable_without_browser() {
    let http = ApiClient::default();
    let result = futures::executor::block_on(fetch_bikes(&http));
    assert_eq!(result.unwrap_err(), ApiError::Unavailable);
    let login = futures::executor::block_on(login(&http, "a@b.com", "x"));
    assert_eq!(login.unwrap_err(), ApiError::Unavailable);
}
