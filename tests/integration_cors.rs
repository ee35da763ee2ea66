#![allow(clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, unreachable_pub)]
use reqwest::StatusCode;
use serde_json::{Value, json};

mod common;
use common::{ALLOWED_ORIGIN, TestApp};

#[tokio::test]
async fn test_request_without_origin_passes() {
    let app = TestApp::spawn().await;

    let resp = app.client.get(format!("{}/messages/alice", app.server_url)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_allowed_origin_gets_credentialed_cors_headers() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(format!("{}/messages", app.server_url))
        .header("Origin", ALLOWED_ORIGIN)
        .json(&json!({ "recipient": "alice", "content": "hi" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["access-control-allow-origin"], ALLOWED_ORIGIN);
    assert_eq!(resp.headers()["access-control-allow-credentials"], "true");
}

#[tokio::test]
async fn test_unlisted_origin_refused() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(format!("{}/messages", app.server_url))
        .header("Origin", "https://evil.example")
        .json(&json!({ "recipient": "alice", "content": "hi" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(resp.headers().get("access-control-allow-origin").is_none());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Origin not allowed");

    assert!(app.list("alice").await.is_empty());
}

#[tokio::test]
async fn test_preflight_from_allowed_origin() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .request(reqwest::Method::OPTIONS, format!("{}/messages", app.server_url))
        .header("Origin", ALLOWED_ORIGIN)
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();

    assert!(resp.status().is_success());
    assert_eq!(resp.headers()["access-control-allow-origin"], ALLOWED_ORIGIN);
    assert_eq!(resp.headers()["access-control-allow-credentials"], "true");
    let methods = resp.headers()["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("POST"));
}

#[tokio::test]
async fn test_multiple_configured_origins() {
    let mut config = common::get_test_config();
    config.cors.allowed_origins = vec![ALLOWED_ORIGIN.to_string(), "https://board.example".to_string()];
    let app = TestApp::spawn_with_config(config).await;

    let resp = app
        .client
        .get(format!("{}/health", app.server_url))
        .header("Origin", "https://board.example")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["access-control-allow-origin"], "https://board.example");
}
