#![allow(clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, unreachable_pub)]
use message_board_server::adapters::StorageGateway;
use message_board_server::adapters::memory::InMemoryGateway;
use std::sync::Arc;

mod common;
use common::TestApp;

#[tokio::test]
async fn test_health_reports_connected() {
    let app = TestApp::spawn().await;

    let body = app.health().await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_health_tracks_connection_state() {
    let store = Arc::new(InMemoryGateway::disconnected());
    let app = TestApp::spawn_with_store(common::get_test_config(), store.clone()).await;

    let body = app.health().await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "disconnected");

    store.connect();
    assert_eq!(app.health().await["database"], "connected");

    store.close().await.unwrap();
    let body = app.health().await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn test_health_does_not_touch_storage() {
    let store = Arc::new(InMemoryGateway::new());
    let app = TestApp::spawn_with_store(common::get_test_config(), store.clone()).await;

    for _ in 0..3 {
        app.health().await;
    }
    assert!(store.is_empty());
}
