#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use skillswap::router::init_router;
use skillswap::state::AppState;
use skillswap::store::MemoryFeedbackStore;
use skillswap_auth::create_token;
use skillswap_config::{CorsConfig, JwtConfig};

pub const TEST_SECRET: &str = "integration-test-secret-key-at-least-32-chars";
pub const LISTING: &str = "65a1b2c3d4e5f6a7b8c9d0e1";
pub const TEACHER: &str = "teacher-1";

pub fn jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET)
}

pub fn test_state() -> AppState {
    AppState::new(
        Arc::new(MemoryFeedbackStore::new()),
        jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    )
}

pub fn setup_test_app() -> Router {
    init_router(test_state())
}

pub fn token_for(user_id: &str) -> String {
    create_token(user_id, &jwt_config()).unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Sends `request` and returns the status with the parsed JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, body)
}
