//! Shared HTTP client handle and the error taxonomy for REST calls.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `ApiClient` is created by the root component and cloned into every
//! consumer. Clones share the default `Authorization` header, so the auth
//! context can set or clear the bearer token once and every later request
//! picks it up.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::{Arc, PoisonError, RwLock};

/// Same-origin prefix the server proxies to the fleet API.
pub const API_PREFIX: &str = "/api";

/// Failure of a single REST call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered 401.
    #[error("unauthorized")]
    Unauthorized,

    /// The server answered with another non-2xx status.
    #[error("request failed: {0}")]
    Status(u16),

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// HTTP is only performed in the browser.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Classify a non-2xx status.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        if status == 401 { Self::Unauthorized } else { Self::Status(status) }
    }

    /// Message suitable for a toast.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Could not reach the server. Check your connection.".to_owned(),
            Self::Unauthorized => "Your session has expired. Please sign in again.".to_owned(),
            Self::Status(403) => "You do not have access to this resource.".to_owned(),
            Self::Status(404) => "The requested record was not found.".to_owned(),
            Self::Status(status) if *status >= 500 => format!("The server had a problem ({status})."),
            Self::Status(status) => format!("Request failed ({status})."),
            Self::Decode(_) => "The server sent an unexpected response.".to_owned(),
            Self::Unavailable => "This action is only available in the browser.".to_owned(),
        }
    }
}

/// Cheap-to-clone HTTP client with a shared default authorization header.
#[derive(Clone, Debug)]
pub struct ApiClient {
    prefix: String,
    authorization: Arc<RwLock<Option<String>>>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(API_PREFIX)
    }
}

impl ApiClient {
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self { prefix: prefix.trim_end_matches('/').to_owned(), authorization: Arc::new(RwLock::new(None)) }
    }

    /// Absolute path for an API endpoint such as `/bikes`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.prefix, path.trim_start_matches('/'))
    }

    /// Set the default header to `Bearer <token>`.
    pub fn set_bearer(&self, token: &str) {
        let mut slot = self.authorization.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(format!("Bearer {token}"));
    }

    /// Remove the default authorization header.
    pub fn clear_authorization(&self) {
        let mut slot = self.authorization.write().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    /// Current default authorization header value, if any.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.authorization.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[cfg(feature = "hydrate")]
impl ApiClient {
    fn decorate(&self, builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match self.authorization() {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }

    /// `GET` an endpoint and decode its JSON body.
    pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.decorate(gloo_net::http::Request::get(&self.url(path)));
        let response = request.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        decode(response).await
    }

    /// Send a JSON body with `method` and decode the JSON reply.
    pub(crate) async fn send_json<B, T>(&self, method: gloo_net::http::Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        decode(self.send(method, path, body).await?).await
    }

    /// Send a JSON body with `method` and return the raw text of a 2xx reply,
    /// which may be empty.
    pub(crate) async fn send_for_text<B: serde::Serialize>(
        &self,
        method: gloo_net::http::Method,
        path: &str,
        body: &B,
    ) -> Result<String, ApiError> {
        let response = self.send(method, path, body).await?;
        if !response.ok() {
            return Err(ApiError::from_status(response.status()));
        }
        response.text().await.map_err(|e| ApiError::Transport(e.to_string()))
    }

    async fn send<B: serde::Serialize>(
        &self,
        method: gloo_net::http::Method,
        path: &str,
        body: &B,
    ) -> Result<gloo_net::http::Response, ApiError> {
        let builder = gloo_net::http::RequestBuilder::new(&self.url(path)).method(method);
        let request = self
            .decorate(builder)
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        request.send().await.map_err(|e| ApiError::Transport(e.to_string()))
    }
}

#[cfg(feature = "hydrate")]
async fn decode<T: serde::de::DeserializeOwned>(response: gloo_net::http::Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(ApiError::from_status(response.status()));
    }
    response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}
