//! Web API Post Tests
//!
//! Integration tests for board posts and their pagination.

mod common;

use axum::http::StatusCode;
use common::{
    authed, count_rows, create_board, create_post, create_test_server, header_i64, register_user,
    share_board,
};
use serde_json::{json, Value};

#[tokio::test]
async fn test_create_and_show_post() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let board_id = create_board(&server, &alice, "Team", "pw").await;

    let response = authed(server.post(&format!("/api/boards/{board_id}/posts")), &alice)
        .json(&json!({ "content": "  First post  " }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["content"], "First post");
    assert_eq!(body["board_id"], board_id);
    assert_eq!(body["user"]["id"], alice.id);
    assert_eq!(body["user"]["name"], "Alice");

    let post_id = body["id"].as_i64().unwrap();
    let response = authed(
        server.get(&format!("/api/boards/{board_id}/posts/{post_id}")),
        &alice,
    )
    .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], post_id);
}

#[tokio::test]
async fn test_create_post_blank_content() {
    let (server, db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let board_id = create_board(&server, &alice, "Team", "pw").await;

    let response = authed(server.post(&format!("/api/boards/{board_id}/posts")), &alice)
        .json(&json!({ "content": null }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"]["details"]["content"][0], "can't be blank");
    assert_eq!(count_rows(&db, "posts").await, 0);
}

#[tokio::test]
async fn test_first_page_of_posts() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let board_id = create_board(&server, &alice, "Team", "pw").await;

    for i in 1..=25 {
        create_post(&server, &alice, board_id, &format!("post {i}")).await;
    }

    let response = authed(server.get(&format!("/api/boards/{board_id}/posts")), &alice).await;
    response.assert_status_ok();
    assert_eq!(header_i64(&response, "total"), 25);
    assert_eq!(header_i64(&response, "per-page"), 20);
    assert_eq!(header_i64(&response, "page"), 1);

    let body: Value = response.json();
    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 20);
    // Newest first.
    assert_eq!(posts[0]["content"], "post 25");
    assert_eq!(posts[19]["content"], "post 6");
}

#[tokio::test]
async fn test_second_page_and_invalid_page() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let board_id = create_board(&server, &alice, "Team", "pw").await;

    for i in 1..=25 {
        create_post(&server, &alice, board_id, &format!("post {i}")).await;
    }

    let response = authed(server.get(&format!("/api/boards/{board_id}/posts")), &alice)
        .add_query_param("page", "2")
        .await;
    response.assert_status_ok();
    assert_eq!(header_i64(&response, "page"), 2);
    let body: Value = response.json();
    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 5);
    assert_eq!(posts[4]["content"], "post 1");

    let response = authed(server.get(&format!("/api/boards/{board_id}/posts")), &alice)
        .add_query_param("page", "bogus")
        .await;
    response.assert_status_ok();
    assert_eq!(header_i64(&response, "page"), 1);
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn test_post_from_other_board_not_found() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let board_a = create_board(&server, &alice, "A", "pw").await;
    let board_b = create_board(&server, &alice, "B", "pw").await;
    let post_id = create_post(&server, &alice, board_a, "in A").await;

    let response = authed(
        server.get(&format!("/api/boards/{board_b}/posts/{post_id}")),
        &alice,
    )
    .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_only_author_updates_post() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let bob = register_user(&server, "Bob", "bob@example.com").await;
    let board_id = create_board(&server, &alice, "Team", "pw").await;
    share_board(&server, &alice, board_id, &bob.email).await;
    let post_id = create_post(&server, &bob, board_id, "bob's post").await;
    let path = format!("/api/boards/{board_id}/posts/{post_id}");

    // Board admins are not post authors.
    authed(server.put(&path), &alice)
        .json(&json!({ "content": "edited by alice" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let response = authed(server.put(&path), &bob)
        .json(&json!({ "content": "edited" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["content"], "edited");

    authed(server.put(&path), &bob)
        .json(&json!({ "content": "" }))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_post() {
    let (server, db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let bob = register_user(&server, "Bob", "bob@example.com").await;
    let board_id = create_board(&server, &alice, "Team", "pw").await;
    share_board(&server, &alice, board_id, &bob.email).await;
    let post_id = create_post(&server, &alice, board_id, "alice's post").await;
    let path = format!("/api/boards/{board_id}/posts/{post_id}");

    authed(server.delete(&path), &bob)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    assert_eq!(count_rows(&db, "posts").await, 1);

    authed(server.delete(&path), &alice).await.assert_status_ok();
    assert_eq!(count_rows(&db, "posts").await, 0);

    authed(server.delete(&path), &alice)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_endpoints_require_authentication() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let board_id = create_board(&server, &alice, "Team", "pw").await;
    let post_id = create_post(&server, &alice, board_id, "hello").await;
    let body = json!({ "content": "anonymous" });

    // Existing and nonexistent resources look the same without a token.
    for (board, post) in [(board_id, post_id), (9999, 9999)] {
        let posts = format!("/api/boards/{board}/posts");
        let post_path = format!("{posts}/{post}");

        server.get(&posts).await.assert_status(StatusCode::UNAUTHORIZED);
        server
            .post(&posts)
            .json(&body)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .get(&post_path)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .put(&post_path)
            .json(&body)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .delete(&post_path)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    let response = authed(server.get(&format!("/api/boards/{board_id}/posts/{post_id}")), &alice).await;
    let body: Value = response.json();
    assert_eq!(body["content"], "hello");
}

#[tokio::test]
async fn test_non_numeric_post_id() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let board_id = create_board(&server, &alice, "Team", "pw").await;

    let response = authed(server.get(&format!("/api/boards/{board_id}/posts/abc")), &alice).await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let response = authed(server.delete(&format!("/api/boards/{board_id}/posts/abc")), &alice).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_page_query() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let board_id = create_board(&server, &alice, "Team", "pw").await;

    let response = authed(server.get(&format!("/api/boards/{board_id}/posts")), &alice)
        .add_query_param("page", "1")
        .add_query_param("page", "2")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}
