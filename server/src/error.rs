//! Proxy failures and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// The outbound HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// The upstream API could not be reached or timed out.
    #[error("upstream request failed: {0}")]
    Upstream(String),

    /// The upstream responded but its body could not be read.
    #[error("upstream body read failed: {0}")]
    UpstreamBody(String),

    /// The upstream response could not be turned into a local response.
    #[error("response build failed: {0}")]
    Response(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ProxyError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Upstream(_) | Self::UpstreamBody(_) => StatusCode::BAD_GATEWAY,
            Self::ClientBuild(_) | Self::Response(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = status.canonical_reason().unwrap_or("proxy error");
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
