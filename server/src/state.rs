//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds one pooled outbound HTTP client and the upstream base URL; cloning
//! it is cheap and every request reuses the same connection pool.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ServerConfig;
use crate::error::ProxyError;

#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub upstream: Arc<str>,
}

impl AppState {
    /// Build the outbound client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::ClientBuild`] if the TLS backend cannot be initialized.
    pub fn new(config: &ServerConfig) -> Result<Self, ProxyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ProxyError::ClientBuild(e.to_string()))?;
        Ok(Self { http, upstream: Arc::from(config.upstream_url.as_str()) })
    }
}
