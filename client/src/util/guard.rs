//! Route guard decisions and login redirect targets.
//!
//! The decision is a pure function of the session so it can be re-run on
//! every session change and tested without a router.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::net::types::Role;
use crate::state::session::Session;
use crate::util::nav::home_for;

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Outcome of checking a session against a route's allow-list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Not logged in; carries the full login URL including `next`.
    Login(String),
    Unauthorized,
}

impl GuardDecision {
    /// Where to navigate, if anywhere.
    #[must_use]
    pub fn redirect(&self) -> Option<&str> {
        match self {
            Self::Allow => None,
            Self::Login(url) => Some(url),
            Self::Unauthorized => Some(UNAUTHORIZED_PATH),
        }
    }
}

/// Decide whether `session` may view `current_path` given its allow-list.
#[must_use]
pub fn decide(session: &Session, allowed: &[Role], current_path: &str) -> GuardDecision {
    if !session.is_authenticated {
        return GuardDecision::Login(login_redirect(current_path));
    }
    if session.is_authorized(Some(allowed)) {
        GuardDecision::Allow
    } else {
        GuardDecision::Unauthorized
    }
}

/// Path plus query string, tolerating a `search` with or without its `?`.
#[must_use]
pub fn current_target(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() { pathname.to_owned() } else { format!("{pathname}?{search}") }
}

/// `/login?next=<path>` with the path percent-encoded.
#[must_use]
pub fn login_redirect(next: &str) -> String {
    if next.is_empty() {
        return LOGIN_PATH.to_owned();
    }
    format!("{LOGIN_PATH}?next={}", encode_component(next))
}

/// Accept `next` only when it is a same-origin absolute path.
#[must_use]
pub fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//") && !n.contains('\\'))
        .filter(|n| !n.starts_with(LOGIN_PATH))
}

/// Where the login page sends a freshly authenticated user.
#[must_use]
pub fn post_login_target(next: Option<&str>, role: Option<Role>) -> String {
    safe_next(next).map_or_else(|| home_for(role).to_owned(), str::to_owned)
}

/// Percent-encode everything outside the URI unreserved set.
#[must_use]
pub fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
