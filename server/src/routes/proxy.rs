//! `/api/*` forwarding to the upstream fleet REST API.
//!
//! The browser only ever talks to this origin. Each request is re-issued
//! against `FLEET_API_URL` with its method, body, query string, and
//! end-to-end headers (including `Authorization`); the upstream status,
//! headers, and body come back unchanged.

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, Method, Uri, header};
use axum::response::Response;

use crate::error::ProxyError;
use crate::state::AppState;

/// Connection-scoped headers that must not be forwarded (RFC 9110 §7.6.1).
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Join the upstream base with the captured path and original query.
pub(crate) fn upstream_url(base: &str, rest: &str, query: Option<&str>) -> String {
    let mut url = format!("{}/{}", base.trim_end_matches('/'), rest.trim_start_matches('/'));
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

pub(crate) fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Header names a sender listed in `Connection`; those are hop-by-hop too.
fn connection_listed(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Copy every end-to-end header, skipping hop-by-hop ones and `also_drop`.
pub(crate) fn end_to_end_headers(headers: &HeaderMap, also_drop: &[HeaderName]) -> HeaderMap {
    let listed = connection_listed(headers);
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if is_hop_by_hop(name) || also_drop.contains(name) || listed.iter().any(|l| l == name.as_str()) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Mount point of the proxy on this origin.
pub(crate) const API_PREFIX: &str = "/api/";

/// The still-encoded path below [`API_PREFIX`]. Escapes such as `%2F` and
/// `%3F` stay escaped so they reach the upstream unchanged.
pub(crate) fn raw_rest(uri: &Uri) -> &str {
    uri.path().strip_prefix(API_PREFIX).unwrap_or_default()
}

/// `ANY /api/{*path}`: forward to `<FLEET_API_URL>/<path>?<query>`.
pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let url = upstream_url(&state.upstream, raw_rest(&uri), uri.query());
    tracing::debug!(%method, %url, "proxying request");

    let upstream = state
        .http
        .request(method, &url)
        .headers(end_to_end_headers(&headers, &[header::HOST, header::CONTENT_LENGTH]))
        .body(body)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, %url, "upstream request failed");
            ProxyError::Upstream(e.to_string())
        })?;

    let status = upstream.status();
    let response_headers = end_to_end_headers(upstream.headers(), &[header::CONTENT_LENGTH]);
    let bytes = upstream.bytes().await.map_err(|e| {
        tracing::warn!(error = %e, %url, "upstream body read failed");
        ProxyError::UpstreamBody(e.to_string())
    })?;

    if status.is_server_error() {
        tracing::warn!(%status, %url, "upstream returned server error");
    }

    let mut response = Response::builder()
        .status(status)
        .body(Body::from(bytes))
        .map_err(|e| ProxyError::Response(e.to_string()))?;
    *response.headers_mut() = response_headers;
    Ok(response)
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
