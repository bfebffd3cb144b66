//! End-to-end tests for the card search and deck routes.

use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

const DRAGONS: &str = r#"{
    "Dragon": {"type": "Creature"},
    "Dragonling": 0,
    "Drake": 0,
    "Dragoon": 0,
    "Dream": 0,
    "Drag": 0
}"#;

#[tokio::test]
async fn test_search_follows_dataset_order() {
    let server = common::start_server(Some(DRAGONS)).await;

    assert_eq!(
        server.search("drag").await,
        vec!["Dragon", "Dragonling", "Dragoon", "Drag"]
    );
    assert_eq!(server.search("DR").await.len(), 5);
}

#[tokio::test]
async fn test_search_without_name_returns_empty_array() {
    let server = common::start_server(Some(DRAGONS)).await;

    let res = server.client.get(server.url("/cards")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Vec<String> = res.json().await.unwrap();
    assert!(body.is_empty());

    assert!(server.search("").await.is_empty());
}

#[tokio::test]
async fn test_missing_catalog_serves_empty_results() {
    let server = common::start_server(None).await;

    assert!(server.search("drag").await.is_empty());

    let health: Value = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["catalog_ready"], json!(true));
    assert_eq!(health["cards"], json!(0));
}

#[tokio::test]
async fn test_deck_before_any_save_is_not_found() {
    let server = common::start_server(Some(DRAGONS)).await;

    let res = server.client.get(server.url("/deck")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_then_load_round_trip() {
    let server = common::start_server(Some(DRAGONS)).await;
    let deck = json!({
        "name": "Dragons",
        "cards": [{"name": "Dragon", "count": 4}, {"name": "Drake", "count": 2}]
    });

    let res = server
        .client
        .post(server.url("/save"))
        .json(&deck)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.bytes().await.unwrap().is_empty());

    let res = server.client.get(server.url("/deck")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = res.bytes().await.unwrap();
    assert_eq!(bytes.as_ref(), serde_json::to_vec(&deck).unwrap().as_slice());
    assert_eq!(std::fs::read(server.deck_path()).unwrap(), bytes.as_ref());
}

#[tokio::test]
async fn test_save_treats_any_content_type_as_json() {
    let server = common::start_server(Some(DRAGONS)).await;

    let res = server
        .client
        .post(server.url("/save"))
        .header("content-type", "text/plain")
        .body(r#"{"a": 2, "b": 3}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let deck: Value = server
        .client
        .get(server.url("/deck"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(deck, json!({"a": 2, "b": 3}));
}

#[tokio::test]
async fn test_concurrent_saves_never_merge() {
    let server = common::start_server(Some(DRAGONS)).await;
    let d1 = json!({"owner": "first", "cards": vec!["Dragon"; 200]});
    let d2 = json!({"owner": "second", "cards": vec!["Drake"; 200]});

    let (r1, r2) = tokio::join!(
        server.client.post(server.url("/save")).json(&d1).send(),
        server.client.post(server.url("/save")).json(&d2).send(),
    );
    assert_eq!(r1.unwrap().status(), StatusCode::OK);
    assert_eq!(r2.unwrap().status(), StatusCode::OK);

    let persisted: Value = server
        .client
        .get(server.url("/deck"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(persisted == d1 || persisted == d2);
}

#[tokio::test]
async fn test_cors_origin_is_configurable() {
    let server = common::start_server_with(Some(DRAGONS), |config| {
        config.cors.allowed_origin = None;
    })
    .await;

    let res = server
        .client
        .get(server.url("/cards?name=dr"))
        .header("origin", "http://localhost:8080")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("access-control-allow-origin").is_none());
}
