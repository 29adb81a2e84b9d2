//! Auth context: the single source of truth for who is logged in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Constructed once by the root component with its store and HTTP client and
//! handed to route guards, the sidebar, and pages through Leptos context.
//! Clones share the same signal, store, and header slot.
//!
//! TRANSITIONS
//! ===========
//! Every transition replaces the whole [`Session`], re-persists it, and keeps
//! the client's `Authorization` header in step. A failed login touches
//! nothing.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use leptos::prelude::*;

use crate::net::api;
use crate::net::http::{ApiClient, ApiError};
use crate::net::types::{LoginResponse, ProfileUpdate, Role, UnknownRole, User};
use crate::state::session::Session;
use crate::util::storage::KeyValueStore;

/// Why a 2xx login response could not become a session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoginShapeError {
    #[error("login response has no token")]
    MissingToken,
    #[error("login response has no role")]
    MissingRole,
    #[error(transparent)]
    UnknownRole(#[from] UnknownRole),
}

/// Turn a login response into a full session record.
///
/// The embedded user defaults to an empty record; its role falls back to the
/// session role and its email to `identifier` when that looks like an address.
///
/// # Errors
///
/// Returns [`LoginShapeError`] when the token or role is missing or the role
/// is not one of the known set.
pub fn build_session(identifier: &str, response: LoginResponse) -> Result<Session, LoginShapeError> {
    let token = response.token.filter(|t| !t.is_empty()).ok_or(LoginShapeError::MissingToken)?;
    let role_raw = response.role.filter(|r| !r.is_empty()).ok_or(LoginShapeError::MissingRole)?;
    let role: Role = role_raw.parse()?;

    let mut user = response.user.unwrap_or_default();
    if user.role.is_empty() {
        user.role = role.as_str().to_owned();
    }
    if user.email.is_empty() && identifier.contains('@') {
        user.email = identifier.trim().to_owned();
    }
    Ok(Session::authenticated(user, role, token))
}

/// Shared auth handle.
#[derive(Clone)]
pub struct AuthContext {
    session: RwSignal<Session>,
    store: Arc<dyn KeyValueStore>,
    http: ApiClient,
}

impl AuthContext {
    /// Load the persisted session and restore the bearer header if it holds a token.
    pub fn new(store: Arc<dyn KeyValueStore>, http: ApiClient) -> Self {
        let session = Session::load(store.as_ref());
        if session.is_authenticated {
            http.set_bearer(&session.token);
        }
        Self { session: RwSignal::new(session), store, http }
    }

    /// Reactive view of the current session.
    #[must_use]
    pub fn session(&self) -> ReadSignal<Session> {
        self.session.read_only()
    }

    /// Current session without subscribing.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.session.get_untracked()
    }

    /// The HTTP client carrying this session's bearer header.
    #[must_use]
    pub fn http(&self) -> &ApiClient {
        &self.http
    }

    /// Log in with `POST /login`. Returns whether a session was established.
    pub async fn login(&self, identifier: &str, password: &str) -> bool {
        let result = api::login(&self.http, identifier, password).await;
        self.complete_login(identifier, result)
    }

    /// Apply the outcome of a login request.
    pub fn complete_login(&self, identifier: &str, result: Result<LoginResponse, ApiError>) -> bool {
        let response = match result {
            Ok(response) => response,
            Err(ApiError::Unauthorized) => {
                log::info!("auth: login rejected for {identifier}");
                return false;
            }
            Err(e) => {
                log::warn!("auth: login request failed: {e}");
                return false;
            }
        };
        let session = match build_session(identifier, response) {
            Ok(session) => session,
            Err(e) => {
                log::warn!("auth: unusable login response: {e}");
                return false;
            }
        };
        if let Err(e) = session.persist(self.store.as_ref()) {
            log::warn!("auth: session not persisted: {e}");
        }
        self.http.set_bearer(&session.token);
        self.session.set(session);
        true
    }

    /// Reset to the empty session, drop persisted keys, and clear the header.
    pub fn logout(&self) {
        if let Err(e) = Session::clear(self.store.as_ref()) {
            log::warn!("auth: persisted session not cleared: {e}");
        }
        self.http.clear_authorization();
        self.session.set(Session::default());
    }

    /// Tracked authorization check against an optional allow-list.
    #[must_use]
    pub fn is_authorized(&self, allowed: Option<&[Role]>) -> bool {
        self.session.with(|s| s.is_authorized(allowed))
    }

    /// Replace the embedded user after a profile save.
    ///
    /// Ignored when logged out or when `user` is someone else. Returns whether
    /// the session changed.
    pub fn refresh_user(&self, mut user: User) -> bool {
        let mut next = self.session.get_untracked();
        if !next.is_authenticated {
            return false;
        }
        let same_user = next
            .user
            .as_ref()
            .is_none_or(|current| current.id.is_empty() || current.id == user.id);
        if !same_user {
            log::warn!("auth: ignoring profile refresh for another user ({})", user.id);
            return false;
        }
        if user.role.is_empty() {
            user.role = next.role.map(Role::as_str).unwrap_or_default().to_owned();
        }
        next.user = Some(user);
        if let Err(e) = next.persist(self.store.as_ref()) {
            log::warn!("auth: session not persisted: {e}");
        }
        self.session.set(next);
        true
    }

    /// Fold a saved profile into the session user.
    ///
    /// Returns the merged user when the session changed, `None` when logged
    /// out or no user is embedded.
    pub fn apply_profile_update(&self, update: &ProfileUpdate, reply: Option<User>) -> Option<User> {
        let current = self.session.with_untracked(|s| s.user.clone())?;
        let merged = merge_profile_update(&current, update, reply.as_ref());
        self.refresh_user(merged.clone()).then_some(merged)
    }
}

/// The session user after a successful profile save.
///
/// The submitted fields always land on `current`; fields the server echoed
/// back override them only when the reply names the same user.
pub(crate) fn merge_profile_update(current: &User, update: &ProfileUpdate, reply: Option<&User>) -> User {
    let mut merged = current.clone();
    merged.name.clone_from(&update.name);
    merged.email.clone_from(&update.email);
    merged.phone.clone_from(&update.phone);

    let Some(reply) = reply.filter(|r| !r.id.is_empty() && r.id == current.id) else {
        return merged;
    };
    if !reply.name.is_empty() {
        merged.name.clone_from(&reply.name);
    }
    if !reply.email.is_empty() {
        merged.email.clone_from(&reply.email);
    }
    if !reply.role.is_empty() {
        merged.role.clone_from(&reply.role);
    }
    if reply.phone.is_some() {
        merged.phone.clone_from(&reply.phone);
    }
    if reply.station_id.is_some() {
        merged.station_id.clone_from(&reply.station_id);
    }
    if reply.avatar_url.is_some() {
        merged.avatar_url.clone_from(&reply.avatar_url);
    }
    merged
}

/// Fetch the auth context provided by the root component.
#[must_use]
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
