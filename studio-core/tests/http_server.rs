//! The API over a real TCP listener.

use serde_json::{json, Value};
use studio_core::config::StudioConfig;
use studio_core::http::StudioServer;
use tokio::net::TcpListener;

async fn start(max_body_size: usize) -> (String, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = StudioConfig::default();
    config.storage.models_path = dir.path().join("models").display().to_string();
    config.server.max_body_size = max_body_size;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(StudioServer::new(config).serve_on(listener));

    (base_url, dir)
}

#[tokio::test]
async fn test_health_over_http() {
    let (base, _dir) = start(1024 * 1024).await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "application/json");
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_model_lifecycle_over_http() {
    let (base, dir) = start(1024 * 1024).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/models"))
        .json(&json!({ "name": "Widget", "schema": { "title": { "type": "String", "required": true } } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    assert!(dir.path().join("models/Widget.model.ts").exists());

    let body: Value =
        client.get(format!("{base}/api/models/Widget")).send().await.unwrap().json().await.unwrap();
    assert!(body["model"].as_str().unwrap().contains("title: string;"));

    let resp = client.delete(format!("{base}/api/models/Widget")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(!dir.path().join("models/Widget.model.ts").exists());
}

#[tokio::test]
async fn test_invalid_json_and_oversized_bodies() {
    let (base, _dir) = start(256).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/models"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Invalid JSON format");

    let resp = client
        .post(format!("{base}/api/schemas/validate"))
        .header("content-type", "application/json")
        .body(" ".repeat(1024))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 413);
}

#[tokio::test]
async fn test_cors_preflight() {
    let (base, _dir) = start(1024 * 1024).await;
    let client = reqwest::Client::new();

    let resp = client
        .request(reqwest::Method::OPTIONS, format!("{base}/api/models"))
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);
    assert_eq!(resp.headers()["access-control-allow-origin"], "http://localhost:5173");
    assert!(resp.headers()["access-control-allow-methods"].to_str().unwrap().contains("DELETE"));
}

#[tokio::test]
async fn test_unknown_route_over_http() {
    let (base, _dir) = start(1024 * 1024).await;
    let resp = reqwest::get(format!("{base}/nowhere")).await.unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "status": "fail", "message": "Route GET /nowhere not found" }));
}
