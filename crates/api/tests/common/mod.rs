#![allow(dead_code)]

use std::sync::Arc;

use accessmap_api::auth::jwt::{generate_access_token, JwtConfig};
use accessmap_api::config::ServerConfig;
use accessmap_api::router::build_app_router;
use accessmap_api::state::AppState;
use accessmap_core::access_status::ExcludedFeatures;
use accessmap_core::roles::{ROLE_ADMIN, ROLE_USER};
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Trackable feature ids under the default exclusion list.
pub const TRACKABLE: [i64; 9] = [1, 2, 3, 4, 5, 6, 7, 10, 11];

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        excluded_features: ExcludedFeatures::default(),
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// on top of the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub fn token_for(user_id: i64, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).expect("token generation")
}

pub fn admin_token() -> String {
    token_for(1, ROLE_ADMIN)
}

pub fn user_token(user_id: i64) -> String {
    token_for(user_id, ROLE_USER)
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a location through the API as an admin and return its id.
pub async fn create_location(pool: &PgPool, body: serde_json::Value) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/locations",
        &admin_token(),
        body,
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

pub fn location_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "category": "cafe",
        "latitude": 54.32,
        "longitude": 10.13,
    })
}

/// Record a vote as `user_id` and return the response JSON.
pub async fn vote(
    pool: &PgPool,
    user_id: i64,
    location_id: i64,
    feature_id: i64,
    is_good: Option<bool>,
) -> Response<Body> {
    put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/locations/{location_id}/features/{feature_id}/confirmation"),
        &user_token(user_id),
        serde_json::json!({ "is_good": is_good }),
    )
    .await
}

/// Cast `up` positive and `down` negative votes on one feature from distinct users.
pub async fn cast_votes(pool: &PgPool, location_id: i64, feature_id: i64, up: i64, down: i64) {
    for i in 0..up {
        vote(pool, 1_000 + i, location_id, feature_id, Some(true)).await;
    }
    for i in 0..down {
        vote(pool, 2_000 + i, location_id, feature_id, Some(false)).await;
    }
}
