#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use nofly_api::config::ServerConfig;
use nofly_api::router::build_app_router;
use nofly_api::state::AppState;

/// Number of reference zones loaded by a seeded store.
pub const SEED_COUNT: usize = 4;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        seed_zones: true,
    }
}

/// Build the full application router over a freshly seeded store.
///
/// The router is cheap to clone and every clone shares the same store, so a
/// test can send several requests with `app.clone()`.
pub fn build_test_app() -> Router {
    let config = test_config();
    build_app_router(AppState::new(config.clone()), &config)
}

/// Same as [`build_test_app`] but starting with an empty store.
pub fn build_empty_app() -> Router {
    let config = ServerConfig {
        seed_zones: false,
        ..test_config()
    };
    build_app_router(AppState::new(config.clone()), &config)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PATCH, uri, body).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
