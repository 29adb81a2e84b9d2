use super::*;
use crate::util::storage::MemoryStore;

fn staff_session() -> Session {
    let user = User { id: "u1".to_owned(), email: "a@b.com".to_owned(), role: "staff".to_owned(), ..User::default() };
    Session::authenticated(user, Role::Staff, "t1".to_owned())
}

// =============================================================
// Serialization
// =============================================================

#[test]
fn default_session_serializes_with_empty_role() {
    let json = serde_json::to_value(Session::default()).unwrap();
    assert_eq!(json, serde_json::json!({ "user": null, "role": "", "token": "", "isAuthenticated": false }));
}

#[test]
fn authenticated_session_serializes_role_string() {
    let json = serde_json::to_value(staff_session()).unwrap();
    assert_eq!(json["role"], "staff");
    assert_eq!(json["token"], "t1");
    assert_eq!(json["isAuthenticated"], true);
    assert_eq!(json["user"]["email"], "a@b.com");
}

#[test]
fn unknown_role_reads_back_as_none() {
    let session: Session = serde_json::from_str(r#"{"role":"owner","token":"t"}"#).unwrap();
    assert_eq!(session.role, None);
}

// =============================================================
// Load / persist
// =============================================================

#[test]
fn load_missing_record_is_default() {
    let store = MemoryStore::new();
    assert_eq!(Session::load(&store), Session::default());
}

#[test]
fn load_corrupt_record_is_default() {
    let store = MemoryStore::new();
    store.seed(AUTH_KEY, "{not json");
    assert_eq!(Session::load(&store), Session::default());
}

#[test]
fn load_rederives_flag_from_token() {
    let store = MemoryStore::new();
    store.seed(AUTH_KEY, r#"{"user":null,"role":"admin","token":"","isAuthenticated":true}"#);
    let session = Session::load(&store);
    assert!(!session.is_authenticated);
    assert_eq!(session.role, Some(Role::Admin));

    store.seed(AUTH_KEY, r#"{"role":"admin","token":"t9","isAuthenticated":false}"#);
    assert!(Session::load(&store).is_authenticated);
}

#[test]
fn persist_then_load_restores_session() {
    let store = MemoryStore::new();
    let session = staff_session();
    session.persist(&store).unwrap();
    assert_eq!(store.get(TOKEN_KEY), Ok(Some("t1".to_owned())));
    assert_eq!(Session::load(&store), session);
}

#[test]
fn persisting_empty_session_removes_token_key() {
    let store = MemoryStore::new();
    store.seed(TOKEN_KEY, "stale");
    Session::default().persist(&store).unwrap();
    assert_eq!(store.get(TOKEN_KEY), Ok(None));
}

#[test]
fn clear_removes_both_keys() {
    let store = MemoryStore::new();
    staff_session().persist(&store).unwrap();
    Session::clear(&store).unwrap();
    assert_eq!(store.get(AUTH_KEY), Ok(None));
    assert_eq!(store.get(TOKEN_KEY), Ok(None));
}

// =============================================================
// Authorization
// =============================================================

#[test]
fn unauthenticated_session_is_never_authorized() {
    let session = Session::default();
    assert!(!session.is_authorized(None));
    assert!(!session.is_authorized(Some(&[])));
    assert!(!session.is_authorized(Some(&[Role::Staff])));
}

#[test]
fn empty_allow_list_admits_any_login() {
    let session = staff_session();
    assert!(session.is_authorized(None));
    assert!(session.is_authorized(Some(&[])));
}

#[test]
fn allow_list_is_exact_membership() {
    let session = staff_session();
    assert!(!session.is_authorized(Some(&[Role::Superadmin])));
    assert!(session.is_authorized(Some(&[Role::Admin, Role::Staff])));
}

#[test]
fn token_without_role_fails_role_checks() {
    let session = Session { token: "t".to_owned(), ..Session::default() }.normalized();
    assert!(session.is_authorized(None));
    assert!(!session.is_authorized(Some(&[Role::Staff])));
}
