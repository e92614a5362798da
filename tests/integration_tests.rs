//! Integration tests for Masterblog
//!
//! End-to-end flows across the router, the store file and a restart.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use masterblog::seed::chess_posts;
use masterblog::{build_router, AppState, Config, PostStore};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

const KEY: &str = "integration-key";

fn app_for(path: &std::path::Path) -> Router {
    let config = Config::builder()
        .storage_file(path)
        .api_key(KEY)
        .rate_limit_per_minute(0)
        .build();
    let store = PostStore::open(&config.storage_file).unwrap();
    build_router(AppState::new(config, Arc::new(store)))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("X-API-Key", KEY);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_posts_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("posts_storage.json");

    {
        let app = app_for(&path);
        let (status, created) = call(
            &app,
            Method::POST,
            "/api/v1/posts",
            Some(json!({
                "title": "Opening Strategies",
                "content": "The Sicilian Defense...",
                "author": "Magnus Carlsen",
                "date": "2025-02-18"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 1);

        let (status, _) = call(
            &app,
            Method::PUT,
            "/api/v1/posts/1",
            Some(json!({ "date": "2025-02-19" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let app = app_for(&path);
    let (status, post) = call(&app, Method::GET, "/api/v1/posts/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(post["date"], "2025-02-19");
    assert_eq!(post["title"], "Opening Strategies");

    let (_, found) = call(&app, Method::GET, "/api/v1/posts/search?query=sicilian", None).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_seeded_store_pages_and_sorts() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("posts_storage.json");
    let today = chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    PostStore::open(&path)
        .unwrap()
        .replace_all(chess_posts(50, today))
        .unwrap();

    let app = app_for(&path);

    let (_, page) = call(&app, Method::GET, "/api/v1/posts?page=10", None).await;
    assert_eq!(page["total_posts"], 50);
    assert_eq!(page["total_pages"], 10);
    assert_eq!(page["posts"][4]["id"], 50);

    // Post i is dated i days ago, so ascending date order is newest id first
    let (_, page) = call(
        &app,
        Method::GET,
        "/api/v1/posts?sort=date&direction=asc&per_page=3",
        None,
    )
    .await;
    let ids: Vec<u64> = page["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![50, 49, 48]);

    let (_, found) = call(
        &app,
        Method::GET,
        "/api/v1/posts/search?author=kasparov&title=endgame",
        None,
    )
    .await;
    for post in found.as_array().unwrap() {
        assert_eq!(post["author"], "Garry Kasparov");
        assert!(post["title"].as_str().unwrap().contains("Endgame"));
    }
}

#[tokio::test]
async fn test_delete_is_persisted() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("posts_storage.json");
    let today = chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    PostStore::open(&path)
        .unwrap()
        .replace_all(chess_posts(3, today))
        .unwrap();

    {
        let app = app_for(&path);
        let (status, _) = call(&app, Method::DELETE, "/api/v1/posts/2", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let reopened = PostStore::open(&path).unwrap();
    let ids: Vec<u64> = reopened.list().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3]);
}
