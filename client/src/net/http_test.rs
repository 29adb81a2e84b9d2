use super::*;

// =============================================================
// ApiError
// =============================================================

#[test]
fn from_status_singles_out_401() {
    assert_eq!(ApiError::from_status(401), ApiError::Unauthorized);
    assert_eq!(ApiError::from_status(403), ApiError::Status(403));
    assert_eq!(ApiError::from_status(500), ApiError::Status(500));
}

#[test]
fn user_message_covers_server_errors() {
    assert_eq!(ApiError::Status(503).user_message(), "The server had a problem (503).");
    assert_eq!(ApiError::Status(422).user_message(), "Request failed (422).");
    assert!(ApiError::Transport("boom".to_owned()).user_message().contains("connection"));
}

#[test]
fn display_includes_status() {
    assert_eq!(ApiError::Status(418).to_string(), "request failed: 418");
}

// =============================================================
// ApiClient
// =============================================================

#[test]
fn url_joins_prefix_and_path() {
    let client = ApiClient::default();
    assert_eq!(client.url("/bikes"), "/api/bikes");
    assert_eq!(client.url("stations"), "/api/stations");
}

#[test]
fn url_tolerates_trailing_slash_prefix() {
    let client = ApiClient::new("/proxy/");
    assert_eq!(client.url("/login"), "/proxy/login");
}

#[test]
fn new_client_has_no_authorization() {
    assert_eq!(ApiClient::default().authorization(), None);
}

#[test]
fn set_bearer_formats_header() {
    let client = ApiClient::default();
    client.set_bearer("t1");
    assert_eq!(client.authorization().as_deref(), Some("Bearer t1"));
}

#[test]
fn clones_share_authorization() {
    let client = ApiClient::default();
    let clone = client.clone();
    client.set_bearer("t1");
    assert_eq!(clone.authorization().as_deref(), Some("Bearer t1"));
    clone.clear_authorization();
    assert_eq!(client.authorization(), None);
}
