#![allow(clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, unreachable_pub)]
use message_board_server::adapters::memory::InMemoryGateway;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;

mod common;
use common::TestApp;

#[tokio::test]
async fn test_body_over_limit_rejected_before_handler() {
    let mut config = common::get_test_config();
    config.server.max_body_bytes = 1024;
    let store = Arc::new(InMemoryGateway::new());
    let app = TestApp::spawn_with_store(config, store.clone()).await;

    let image = format!("data:image/png;base64,{}", "A".repeat(4096));
    let resp = app.post_message(&json!({ "recipient": "alice", "content": "big", "image": image })).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Request body too large");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_body_under_limit_accepted() {
    let mut config = common::get_test_config();
    config.server.max_body_bytes = 8192;
    let app = TestApp::spawn_with_config(config).await;

    let image = format!("data:image/png;base64,{}", "A".repeat(4096));
    let resp = app.post_message(&json!({ "recipient": "alice", "content": "fits", "image": image })).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let messages = app.list("alice").await;
    assert_eq!(messages[0]["image"], image);
}

#[tokio::test]
async fn test_default_limit_allows_multi_megabyte_images() {
    let app = TestApp::spawn().await;

    let image = format!("data:image/jpeg;base64,{}", "B".repeat(5 * 1024 * 1024));
    let resp = app.post_message(&json!({ "recipient": "alice", "content": "photo", "image": image })).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
