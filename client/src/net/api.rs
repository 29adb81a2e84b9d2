//! REST API helpers for the fleet backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` through the shared
//! [`ApiClient`], which carries the bearer header.
//! Server-side (SSR): stubs returning [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`; pages turn failures into toasts
//! and the auth context turns login failures into a plain `false`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(any(test, feature = "hydrate"))]
use serde::Deserialize;

use super::http::{ApiClient, ApiError};
#[cfg(feature = "hydrate")]
use super::types::LoginRequest;
use super::types::{Bike, LoginResponse, ProfileUpdate, Receipt, RevenueSummary, Station, Trip, User};
#[cfg(any(test, feature = "hydrate"))]
use crate::util::guard::encode_component;

#[cfg(feature = "hydrate")]
const LOGIN_PATH: &str = "/login";
#[cfg(feature = "hydrate")]
const BIKES_PATH: &str = "/bikes";
#[cfg(feature = "hydrate")]
const STATIONS_PATH: &str = "/stations";
#[cfg(feature = "hydrate")]
const TRIPS_PATH: &str = "/trips";
#[cfg(feature = "hydrate")]
const RECEIPTS_PATH: &str = "/receipts";
#[cfg(feature = "hydrate")]
const REVENUE_SUMMARY_PATH: &str = "/revenue/summary";

#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn user_endpoint(user_id: &str) -> String {
    format!("/users/{}", encode_component(user_id))
}

/// List responses arrive either bare or wrapped in `{ "data": [...] }`.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ListPayload<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

#[cfg(any(test, feature = "hydrate"))]
impl<T> ListPayload<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}

/// Single-user responses arrive bare or wrapped in `{ "user": {...} }`.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum UserPayload {
    Wrapped { user: User },
    Bare(User),
}

#[cfg(any(test, feature = "hydrate"))]
impl UserPayload {
    /// The embedded record, or `None` when the body named no user id.
    pub(crate) fn into_user(self) -> Option<User> {
        let (Self::Wrapped { user } | Self::Bare(user)) = self;
        (!user.id.is_empty()).then_some(user)
    }
}

/// Read the user echoed by a save. Empty, non-JSON, and acknowledgement-only
/// bodies such as `{"message": "..."}` yield `None`.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn parse_user_reply(body: &str) -> Option<User> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<UserPayload>(body) {
        Ok(payload) => payload.into_user(),
        Err(e) => {
            log::debug!("api: save reply is not a user record: {e}");
            None
        }
    }
}

#[cfg(feature = "hydrate")]
async fn get_list<T: serde::de::DeserializeOwned>(http: &ApiClient, path: &str) -> Result<Vec<T>, ApiError> {
    http.get_json::<ListPayload<T>>(path).await.map(ListPayload::into_vec)
}

/// Exchange credentials for a role and token via `POST /login`.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] on 401, other variants on transport or
/// decode failure.
pub async fn login(http: &ApiClient, identifier: &str, password: &str) -> Result<LoginResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = LoginRequest { identifier: identifier.to_owned(), password: password.to_owned() };
        http.send_json(gloo_net::http::Method::POST, LOGIN_PATH, &body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (http, identifier, password);
        Err(ApiError::Unavailable)
    }
}

/// Fetch every bike with its last known location.
///
/// # Errors
///
/// Propagates the request's [`ApiError`].
pub async fn fetch_bikes(http: &ApiClient) -> Result<Vec<Bike>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        get_list(http, BIKES_PATH).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = http;
        Err(ApiError::Unavailable)
    }
}

/// Fetch every docking station.
///
/// # Errors
///
/// Propagates the request's [`ApiError`].
pub async fn fetch_stations(http: &ApiClient) -> Result<Vec<Station>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        get_list(http, STATIONS_PATH).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = http;
        Err(ApiError::Unavailable)
    }
}

/// Fetch the trip history.
///
/// # Errors
///
/// Propagates the request's [`ApiError`].
pub async fn fetch_trips(http: &ApiClient) -> Result<Vec<Trip>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        get_list(http, TRIPS_PATH).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = http;
        Err(ApiError::Unavailable)
    }
}

/// Fetch payment receipts.
///
/// # Errors
///
/// Propagates the request's [`ApiError`].
pub async fn fetch_receipts(http: &ApiClient) -> Result<Vec<Receipt>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        get_list(http, RECEIPTS_PATH).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = http;
        Err(ApiError::Unavailable)
    }
}

/// Fetch aggregate revenue figures for the dashboard.
///
/// # Errors
///
/// Propagates the request's [`ApiError`].
pub async fn fetch_revenue_summary(http: &ApiClient) -> Result<RevenueSummary, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        http.get_json(REVENUE_SUMMARY_PATH).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = http;
        Err(ApiError::Unavailable)
    }
}

/// Fetch a single user record from `/users/{user_id}`.
///
/// # Errors
///
/// Propagates the request's [`ApiError`].
pub async fn fetch_user(http: &ApiClient, user_id: &str) -> Result<User, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        http.get_json::<UserPayload>(&user_endpoint(user_id))
            .await?
            .into_user()
            .ok_or_else(|| ApiError::Decode("user record has no id".to_owned()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (http, user_id);
        Err(ApiError::Unavailable)
    }
}

/// Save profile edits with `PUT /users/{user_id}`.
///
/// Returns the stored record when the server echoes one back, `None` when it
/// only acknowledges the save.
///
/// # Errors
///
/// Propagates the request's [`ApiError`].
pub async fn update_user(http: &ApiClient, user_id: &str, update: &ProfileUpdate) -> Result<Option<User>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = http
            .send_for_text(gloo_net::http::Method::PUT, &user_endpoint(user_id), update)
            .await?;
        Ok(parse_user_reply(&body))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (http, user_id, update);
        Err(ApiError::Unavailable)
    }
}
