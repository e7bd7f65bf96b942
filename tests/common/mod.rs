//! Test helpers for web API integration tests.
//!
//! Provides an in-process test server on an in-memory database plus helpers
//! for registering users and creating boards.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum_test::{TestRequest, TestServer};
use corkboard::web::handlers::AppState;
use corkboard::web::middleware::{JwtState, RateLimitState};
use corkboard::web::router::create_router;
use corkboard::Database;
use serde_json::{json, Value};

/// JWT secret used by every test server.
pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only";

/// Default password for test users.
pub const TEST_PASSWORD: &str = "password123";

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> (TestServer, Database) {
    create_test_server_with_login_limit(1000).await
}

/// Create a test server with a specific login rate limit.
pub async fn create_test_server_with_login_limit(login_rate_limit: u32) -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let app_state = Arc::new(AppState::new(db.clone(), TEST_JWT_SECRET, 900));
    let jwt_state = Arc::new(JwtState::new(TEST_JWT_SECRET));
    let rate_limit_state = Arc::new(RateLimitState::new(login_rate_limit));

    let router = create_router(app_state, jwt_state, rate_limit_state, &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db)
}

/// A registered test user.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub token: String,
}

/// Register a user and return its id and access token.
pub async fn register_user(server: &TestServer, name: &str, email: &str) -> TestUser {
    let response = server
        .post("/user")
        .json(&json!({
            "name": name,
            "email": email,
            "password": TEST_PASSWORD,
            "password_confirmation": TEST_PASSWORD
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let body: Value = response.json();
    TestUser {
        id: body["user"]["id"].as_i64().expect("user id"),
        name: name.to_string(),
        email: email.to_string(),
        token: body["access_token"]
            .as_str()
            .expect("access token")
            .to_string(),
    }
}

/// Attach a bearer token to a request.
pub fn authed(request: TestRequest, user: &TestUser) -> TestRequest {
    request.add_header(AUTHORIZATION, format!("Bearer {}", user.token))
}

/// Create a board owned by `user` and return its id.
pub async fn create_board(server: &TestServer, user: &TestUser, name: &str, secret: &str) -> i64 {
    let response = authed(server.post("/api/boards"), user)
        .json(&json!({ "name": name, "encrypted_password": secret }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let body: Value = response.json();
    body["board"]["id"].as_i64().expect("board id")
}

/// Create a post on a board and return its id.
pub async fn create_post(server: &TestServer, user: &TestUser, board_id: i64, content: &str) -> i64 {
    let response = authed(server.post(&format!("/api/boards/{board_id}/posts")), user)
        .json(&json!({ "content": content }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["id"].as_i64().expect("post id")
}

/// Share a board with another user by email.
pub async fn share_board(server: &TestServer, owner: &TestUser, board_id: i64, email: &str) {
    let response = authed(server.post(&format!("/api/boards/{board_id}/members")), owner)
        .json(&json!({ "email": email }))
        .await;
    assert!(response.status_code().is_success());
}

/// Count rows in a table.
pub async fn count_rows(db: &Database, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(db.pool())
        .await
        .expect("count rows")
}

/// Read a numeric response header.
pub fn header_i64(response: &axum_test::TestResponse, name: &str) -> i64 {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| panic!("missing or invalid header {name}"))
}
