//! Integration test: API key guard and CORS through the full router.
//!
//! Each test builds the app from explicit settings and drives it in process
//! with `tower::ServiceExt::oneshot`, so no socket or process env is touched.

use std::sync::Arc;

use apigate_core::Settings;
use apigate_server::routes::create_router;
use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use tower::ServiceExt;

fn app(vars: &[(&str, &str)]) -> Router {
    match Settings::from_vars(vars.iter().copied()) {
        Ok(s) => create_router(Arc::new(s)),
        Err(e) => panic!("failed to build settings: {e}"),
    }
}

fn secret_app() -> Router {
    app(&[
        ("API_KEY", "secret123"),
        ("PROJECT_NAME", "Widget Service"),
        ("PROJECT_VERSION", "1.2.3"),
        ("BACKEND_CORS_ORIGINS", "https://a.example, http://localhost:3000"),
    ])
}

async fn send(app: Router, req: Request<Body>) -> Response<Body> {
    match app.oneshot(req).await {
        Ok(r) => r,
        Err(e) => panic!("handler error: {e}"),
    }
}

fn get(uri: &str, key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(key) = key {
        builder = builder.header("X-API-Key", key);
    }
    match builder.body(Body::empty()) {
        Ok(r) => r,
        Err(e) => panic!("failed to build request: {e}"),
    }
}

async fn json_body(resp: Response<Body>) -> serde_json::Value {
    let bytes = match axum::body::to_bytes(resp.into_body(), 4096).await {
        Ok(b) => b,
        Err(e) => panic!("failed to read body: {e}"),
    };
    match serde_json::from_slice(&bytes) {
        Ok(v) => v,
        Err(e) => panic!("invalid JSON: {e}"),
    }
}

#[tokio::test]
async fn matching_key_is_admitted() {
    let resp = send(secret_app(), get("/api/v1", Some("secret123"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["name"], "Widget Service");
    assert_eq!(body["version"], "1.2.3");
}

#[tokio::test]
async fn missing_key_is_forbidden_with_fixed_message() {
    let resp = send(secret_app(), get("/api/v1", None)).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = json_body(resp).await;
    assert_eq!(body["error"], "Could not validate API key");
}

#[tokio::test]
async fn wrong_key_is_forbidden_with_same_message() {
    let resp = send(secret_app(), get("/api/v1/whoami", Some("wrong"))).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = json_body(resp).await;
    assert_eq!(body, serde_json::json!({"error": "Could not validate API key"}));
}

#[tokio::test]
async fn header_name_is_case_insensitive_but_value_is_not() {
    let req = match Request::builder()
        .uri("/api/v1/whoami")
        .header("x-api-key", "secret123")
        .body(Body::empty())
    {
        Ok(r) => r,
        Err(e) => panic!("failed to build request: {e}"),
    };
    assert_eq!(send(secret_app(), req).await.status(), StatusCode::OK);

    let resp = send(secret_app(), get("/api/v1/whoami", Some("SECRET123"))).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn whoami_does_not_echo_the_key() {
    let resp = send(secret_app(), get("/api/v1/whoami", Some("secret123"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body, serde_json::json!({"authenticated": true}));
}

#[tokio::test]
async fn health_needs_no_key() {
    let resp = send(secret_app(), get("/health", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn repeated_requests_get_the_same_outcome() {
    let app = secret_app();
    for _ in 0..3 {
        let ok = send(app.clone(), get("/api/v1/whoami", Some("secret123"))).await;
        assert_eq!(ok.status(), StatusCode::OK);
        let denied = send(app.clone(), get("/api/v1/whoami", Some("wrong"))).await;
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);
    }
}

fn preflight(origin: &str) -> Request<Body> {
    match Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-api-key")
        .body(Body::empty())
    {
        Ok(r) => r,
        Err(e) => panic!("failed to build request: {e}"),
    }
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let resp = send(secret_app(), preflight("https://a.example")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&header::HeaderValue::from_static("https://a.example"))
    );

    let resp = send(secret_app(), preflight("http://localhost:3000")).await;
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&header::HeaderValue::from_static("http://localhost:3000"))
    );
}

#[tokio::test]
async fn cors_preflight_omits_header_for_unknown_origin() {
    let resp = send(secret_app(), preflight("https://evil.example")).await;
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn cors_with_no_origins_allows_none() {
    let resp = send(app(&[("API_KEY", "k")]), preflight("https://a.example")).await;
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
