//! Shared helpers for API route tests.

#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::auth::claims::Role;
use crate::auth::jwt::TokenCodec;
use crate::auth::password;
use crate::auth::session::SessionManager;
use crate::storage::Database;

use super::{AppState, router};

pub const TEST_SECRET: &[u8] = b"test-secret";
pub const TEST_ACCESS_TTL: i64 = 3600;
pub const TEST_REFRESH_TTL: i64 = 86400;

pub async fn test_app() -> (Router, AppState) {
    let db = Database::open_in_memory().await.unwrap();
    let codec = TokenCodec::new(TEST_SECRET, TEST_ACCESS_TTL, TEST_REFRESH_TTL);
    let state = AppState {
        db,
        sessions: Arc::new(SessionManager::new(codec)),
    };
    (router(state.clone()), state)
}

/// Build a request, optionally with a `Cookie` header and a JSON body.
pub fn request(
    method: &str,
    uri: &str,
    cookies: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Issue a request against the router and return the response.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// Collect and parse a JSON response body.
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The raw `Set-Cookie` header values on a response.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// Extract the `name=value` pair for a cookie set on the response.
pub fn cookie_pair(response: &Response<Body>, name: &str) -> Option<String> {
    set_cookies(response)
        .into_iter()
        .filter_map(|raw| raw.split(';').next().map(str::to_string))
        .find(|pair| pair.starts_with(&format!("{name}=")))
}

/// Join the two token cookies from a response into a `Cookie` header value.
pub fn auth_cookies(response: &Response<Body>) -> String {
    let access = cookie_pair(response, "access_token").unwrap();
    let refresh = cookie_pair(response, "refresh_token").unwrap();
    format!("{access}; {refresh}")
}

/// Register a user through the API; returns a `Cookie` header value
/// carrying both tokens plus the new user's id.
pub async fn register_user(app: &Router, username: &str) -> (String, i64) {
    let response = send(
        app,
        request(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({"username": username, "password": "password123"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let cookies = auth_cookies(&response);
    let body = json_body(response).await;
    let id = body["user"]["id"].as_i64().unwrap();
    (cookies, id)
}

/// Mint a `Cookie` header value directly for an existing user.
pub fn mint_cookies(state: &AppState, user_id: i64, role: Role) -> String {
    let pair = state.sessions.issue_pair(user_id, role).unwrap();
    format!("access_token={}; refresh_token={}", pair.access, pair.refresh)
}

/// Create an admin directly in storage; returns its id and cookies.
pub async fn create_admin(state: &AppState) -> (i64, String) {
    let hash = password::hash_password("admin-password").unwrap();
    let admin = state
        .db
        .create_user("admin", &hash, Role::Admin)
        .await
        .unwrap();
    let cookies = mint_cookies(state, admin.id, Role::Admin);
    (admin.id, cookies)
}
