use axum::body::{Body, to_bytes};
use axum::extract::Path;
use axum::http::{HeaderMap, HeaderName, Request, Uri, header};
use axum::routing::{post, put};
use tokio::net::TcpListener;
use tower::ServiceExt;

use super::*;
use crate::config::{ProxyTimeouts, ServerConfig};

/// Stand-in for the fleet REST API on an ephemeral port.
async fn spawn_upstream() -> String {
    let app = Router::new()
        .route(
            "/bikes",
            get(|uri: Uri, headers: HeaderMap| async move {
                let auth = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                let body = format!(r#"{{"query":"{}","auth":"{auth}"}}"#, uri.query().unwrap_or(""));
                (
                    [(header::CONTENT_TYPE, "application/json"), (HeaderName::from_static("x-upstream"), "stub")],
                    body,
                )
            }),
        )
        .route(
            "/users/{id}",
            put(|Path(id): Path<String>, body: String| async move { (StatusCode::CREATED, format!("{id}:{body}")) }),
        )
        .route("/login", post(|| async { StatusCode::UNAUTHORIZED }))
        .fallback(|uri: Uri| async move { format!("{}|{}", uri.path(), uri.query().unwrap_or("")) });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn state_for(upstream_url: String) -> AppState {
    AppState::new(&ServerConfig {
        port: 0,
        upstream_url,
        timeouts: ProxyTimeouts { request_secs: 5, connect_secs: 1 },
    })
    .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn healthz_is_ok() {
    let app = api_routes(state_for("http://127.0.0.1:9".into()));
    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn proxy_forwards_query_and_authorization() {
    let app = api_routes(state_for(spawn_upstream().await));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/bikes?status=available")
                .header(header::AUTHORIZATION, "Bearer t1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-upstream").unwrap(), "stub");
    assert_eq!(body_text(response).await, r#"{"query":"status=available","auth":"Bearer t1"}"#);
}

#[tokio::test]
async fn proxy_forwards_method_and_body() {
    let app = api_routes(state_for(spawn_upstream().await));
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/users/u-7")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"Ada"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_text(response).await, r#"u-7:{"name":"Ada"}"#);
}

#[tokio::test]
async fn proxy_passes_upstream_errors_through() {
    let app = api_routes(state_for(spawn_upstream().await));
    let response = app
        .oneshot(Request::builder().method("POST").uri("/api/login").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn proxy_returns_bad_gateway_when_upstream_is_down() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = api_routes(state_for(format!("http://{addr}")));
    let response = app
        .oneshot(Request::builder().uri("/api/stations").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn proxy_keeps_encoded_path_segments() {
    let app = api_routes(state_for(spawn_upstream().await));

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/echo/a%2Fb?page=2").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_text(response).await, "/echo/a%2Fb|page=2");

    let response = app
        .oneshot(Request::builder().uri("/api/echo/a%3Fx%3D1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_text(response).await, "/echo/a%3Fx%3D1|");
}
