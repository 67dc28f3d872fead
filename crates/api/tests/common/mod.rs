#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use institute_api::config::ServerConfig;
use institute_api::router::build_app_router;
use institute_api::state::AppState;
use institute_db::memory::InMemoryTestimonialStore;
use institute_db::store::TestimonialStore;

/// Token sent by the "admin" helpers. Any value is accepted.
pub const TEST_TOKEN: &str = "test-anon-key";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        database_url: "postgres://unused".to_string(),
    }
}

/// Build the full application router over `store`.
///
/// Goes through [`build_app_router`] so tests exercise the production
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery).
pub fn build_app_with_store(store: Arc<dyn TestimonialStore>) -> Router {
    build_app_with(store, &test_config())
}

/// Same as [`build_app_with_store`] with a custom configuration.
pub fn build_app_with(store: Arc<dyn TestimonialStore>, config: &ServerConfig) -> Router {
    build_app_router(AppState { store }, config)
}

/// Build the router over a fresh in-memory store, returning both so tests
/// can inspect rows the public endpoints hide.
pub fn build_test_app() -> (Router, Arc<InMemoryTestimonialStore>) {
    let store = Arc::new(InMemoryTestimonialStore::new());
    let app = build_app_with_store(store.clone());
    (app, store)
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

fn json_request(method: Method, uri: &str, body: Body, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(body).unwrap()
}

pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response {
    send(app, json_request(Method::POST, uri, Body::from(body.to_string()), token)).await
}

pub async fn post_raw(app: Router, uri: &str, body: &'static str, token: Option<&str>) -> Response {
    send(app, json_request(Method::POST, uri, Body::from(body), token)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response {
    send(app, json_request(Method::PUT, uri, Body::from(body.to_string()), token)).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response {
    send(app, json_request(Method::DELETE, uri, Body::empty(), token)).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// A complete create payload in the dashboard's camelCase shape.
pub fn new_testimonial(name: &str, order: i32, featured: bool) -> serde_json::Value {
    serde_json::json!({
        "studentName": name,
        "examName": "SSC CGL",
        "successStory": "Cleared tier 2 on the first attempt.",
        "rankingOrScore": "AIR 42",
        "imageUrl": "",
        "isFeatured": featured,
        "displayOrder": order
    })
}
