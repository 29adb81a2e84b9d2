//! The persisted session record.
//!
//! DESIGN
//! ======
//! `Session` is replaced wholesale on every transition and re-serialized in
//! full under [`AUTH_KEY`]; the bearer token is duplicated alone under
//! [`TOKEN_KEY`]. `is_authenticated` is always re-derived from the token when
//! a record is loaded, so a hand-edited record cannot claim a login it does
//! not have.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

use crate::net::types::{Role, User};
use crate::util::storage::{KeyValueStore, StorageError};

/// Storage key holding the full serialized session.
pub const AUTH_KEY: &str = "auth";
/// Storage key holding the bare bearer token.
pub const TOKEN_KEY: &str = "token";

/// Who is logged in, and with which token.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Session {
    pub user: Option<User>,
    #[serde(with = "role_or_empty")]
    pub role: Option<Role>,
    pub token: String,
    pub is_authenticated: bool,
}

impl Session {
    /// A logged-in session for `role` holding `token`.
    #[must_use]
    pub fn authenticated(user: User, role: Role, token: String) -> Self {
        Self { user: Some(user), role: Some(role), token, is_authenticated: true }.normalized()
    }

    /// Re-derive `is_authenticated` from the token.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.is_authenticated = !self.token.is_empty();
        self
    }

    /// Read the persisted record, falling back to the empty session when it
    /// is missing, unreadable, or corrupt.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(AUTH_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                log::warn!("session: could not read persisted record: {e}");
                return Self::default();
            }
        };
        match serde_json::from_str::<Self>(&raw) {
            Ok(session) => session.normalized(),
            Err(e) => {
                log::warn!("session: discarding corrupt persisted record: {e}");
                Self::default()
            }
        }
    }

    /// Write the whole record, plus the bare token when there is one.
    ///
    /// # Errors
    ///
    /// Returns the first [`StorageError`] from the backing store.
    pub fn persist(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        let raw = serde_json::to_string(self).map_err(|e| StorageError::Write(e.to_string()))?;
        store.set(AUTH_KEY, &raw)?;
        if self.token.is_empty() {
            store.remove(TOKEN_KEY)
        } else {
            store.set(TOKEN_KEY, &self.token)
        }
    }

    /// Remove both persisted keys. Both removals are attempted even if the
    /// first fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`StorageError`] encountered.
    pub fn clear(store: &dyn KeyValueStore) -> Result<(), StorageError> {
        let auth = store.remove(AUTH_KEY);
        let token = store.remove(TOKEN_KEY);
        auth.and(token)
    }

    /// `false` without a token. With no allow-list (or an empty one) any
    /// authenticated session passes; otherwise the role must be listed.
    #[must_use]
    pub fn is_authorized(&self, allowed: Option<&[Role]>) -> bool {
        if self.token.is_empty() {
            return false;
        }
        match allowed {
            None | Some([]) => true,
            Some(roles) => self.role.is_some_and(|role| roles.contains(&role)),
        }
    }
}

/// `Option<Role>` as a plain string, empty when absent. Unknown strings read
/// back as `None`.
mod role_or_empty {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::net::types::Role;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(role: &Option<Role>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(role.map_or("", Role::as_str))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Role>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(raw.parse().ok())
    }
}
