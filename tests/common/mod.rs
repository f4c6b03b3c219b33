#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use std::sync::Arc;

use shortlink::api::middleware::rate_limit::{RateGate, RateLimitScope};
use shortlink::application::services::TokenService;
use shortlink::application::services::credential_service::derive_user_id;
use shortlink::infrastructure::Storage;
use shortlink::infrastructure::cache::NullCache;
use shortlink::routes::app_router;
use shortlink::state::AppState;

pub const TEST_SECRET: &str = "integration-tests-signing-secret-0123456789";

pub fn token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(TEST_SECRET, Duration::hours(24)))
}

/// In-memory state with a rate gate loose enough to never interfere.
pub fn create_test_state() -> AppState {
    create_test_state_with_gate(RateGate::with_limits(1_000, 1_000, RateLimitScope::Global))
}

pub fn create_test_state_with_gate(gate: RateGate) -> AppState {
    AppState::new(
        Arc::new(Storage::in_memory()),
        token_service(),
        Arc::new(gate),
        Arc::new(NullCache::new()),
    )
}

pub fn create_test_server() -> TestServer {
    server_for(create_test_state())
}

pub fn server_for(state: AppState) -> TestServer {
    TestServer::new(app_router(state)).unwrap()
}

/// Registers a user and returns the issued token.
pub async fn register(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/register")
        .json(&json!({ "username": username, "password": password }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Shortens a URL as the given token holder and returns the code.
pub async fn shorten(server: &TestServer, token: &str, url: &str) -> String {
    let response = server
        .post("/shorten")
        .add_header("Authorization", bearer(token))
        .json(&json!({ "url": url }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()["short_url"]
        .as_str()
        .unwrap()
        .to_string()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// A correctly signed token that expired an hour ago.
pub fn expired_token(username: &str) -> String {
    token_service()
        .issue_at(
            &derive_user_id(username),
            username,
            Utc::now() - Duration::hours(25),
        )
        .unwrap()
}

pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap()
}
