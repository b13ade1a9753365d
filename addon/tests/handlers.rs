//! Addon actions end to end: host request -> addon server -> stub Twitch.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use url::Url;

use twitch_addon_lib::app::SharedState;
use twitch_addon_lib::config::AddonConfig;
use twitch_addon_lib::server::router::create_router;

type Calls = Arc<Mutex<Vec<(String, HashMap<String, String>)>>>;

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    format!("http://{addr}")
}

fn stream_page(count: usize) -> Value {
    let streams = (0..count)
        .map(|i| {
            json!({
                "_id": i,
                "game": "Minecraft",
                "channel": { "_id": i, "name": format!("chan{i}"), "display_name": format!("Chan{i}") }
            })
        })
        .collect::<Vec<_>>();
    json!({ "_total": 40, "streams": streams })
}

/// Stub Twitch: 25 search hits, 7 listed channels, 40 games, one channel
/// whose playback handshake is refused.
fn twitch_stub(calls: Calls) -> Router {
    fn record(calls: &Calls, path: &str, query: HashMap<String, String>) {
        calls.lock().unwrap().push((path.to_owned(), query));
    }

    Router::new()
        .route(
            "/kraken/search/streams",
            get(|State(calls): State<Calls>, Query(q): Query<HashMap<String, String>>| async move {
                record(&calls, "search", q);
                Json(stream_page(25))
            }),
        )
        .route(
            "/kraken/streams",
            get(|State(calls): State<Calls>, Query(q): Query<HashMap<String, String>>| async move {
                record(&calls, "streams", q);
                Json(stream_page(7))
            }),
        )
        .route(
            "/kraken/games/top",
            get(|State(calls): State<Calls>, Query(q): Query<HashMap<String, String>>| async move {
                record(&calls, "games", q);
                Json(json!({
                    "_total": 40,
                    "top": [{ "game": { "_id": 27471, "name": "Minecraft",
                        "box": { "large": "https://cdn/Minecraft-272x380.jpg" } } }]
                }))
            }),
        )
        .route(
            "/kraken/channels/{id}",
            get(|Path(id): Path<String>| async move {
                if id == "71092938" {
                    Json(json!({
                        "_id": 71092938,
                        "name": "xqcow",
                        "display_name": "xQcOW",
                        "url": "https://www.twitch.tv/xqcow",
                        "profile_banner": null
                    }))
                    .into_response()
                } else {
                    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found", "status": 404 })))
                        .into_response()
                }
            }),
        )
        .route(
            "/api/channels/{login}/access_token",
            get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" }))) }),
        )
        .with_state(calls)
}

async fn addon(calls: Calls) -> String {
    let twitch = Url::parse(&spawn(twitch_stub(calls)).await).unwrap();
    let config = AddonConfig {
        client_id: Some("test-client".into()),
        api_base: twitch.clone(),
        usher_base: twitch,
        ..AddonConfig::default()
    };
    spawn(create_router(SharedState::new(config))).await
}

async fn call(base: &str, action: &str, body: Value) -> (StatusCode, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{base}/twitch/{action}"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn search_directory_returns_full_page_with_next_cursor() {
    let calls = Calls::default();
    let base = addon(calls.clone()).await;

    let (status, body) = call(&base, "directory", json!({ "search": "minecraft" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 25);
    assert_eq!(body["nextCursor"], 25);
    assert_eq!(body["items"][0]["type"], "channel");
    assert_eq!(body["features"]["filter"][0]["id"], "language");

    let calls = calls.lock().unwrap();
    let (path, query) = &calls[0];
    assert_eq!(path, "search");
    assert_eq!(query["query"], "minecraft");
    assert_eq!(query["limit"], "25");
    assert_eq!(query["offset"], "0");
}

#[tokio::test]
async fn channel_directory_with_short_page_has_no_next_cursor() {
    let calls = Calls::default();
    let base = addon(calls.clone()).await;

    let (_, body) = call(
        &base,
        "directory",
        json!({ "id": "channels", "filter": { "game": "Minecraft" }, "cursor": 25 }),
    )
    .await;
    assert_eq!(body["items"].as_array().unwrap().len(), 7);
    assert!(body["nextCursor"].is_null());

    let calls = calls.lock().unwrap();
    let (path, query) = &calls[0];
    assert_eq!(path, "streams");
    assert_eq!(query["game"], "Minecraft");
    assert_eq!(query["offset"], "25");
}

#[tokio::test]
async fn root_directory_lists_games() {
    let calls = Calls::default();
    let base = addon(calls.clone()).await;

    let (_, body) = call(&base, "directory", json!({ "id": "", "cursor": null })).await;
    assert_eq!(body["items"][0]["type"], "directory");
    assert_eq!(body["items"][0]["id"], "channels");
    assert_eq!(body["items"][0]["args"]["filter"]["game"], "Minecraft");
    assert_eq!(body["nextCursor"], 25);

    let (_, body) = call(&base, "directory", json!({ "cursor": 25 })).await;
    assert!(body["nextCursor"].is_null());
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn item_with_refused_handshake_links_channel_page() {
    let base = addon(Calls::default()).await;

    let (status, body) = call(&base, "item", json!({ "ids": { "id": 71092938 } })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "channel");
    assert_eq!(body["ids"]["id"], "71092938");
    assert!(body["images"]["background"].is_null());

    let sources = body["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0]["type"], "externalUrl");
    assert_eq!(sources[0]["url"], "https://www.twitch.tv/xqcow");
}

#[tokio::test]
async fn item_upstream_error_is_forwarded() {
    let base = addon(Calls::default()).await;

    let (status, body) = call(&base, "item", json!({ "ids": { "id": "1" } })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!({ "error": "Not Found", "status": 404 }));
}

#[tokio::test]
async fn source_is_empty_and_manifest_is_served() {
    let base = addon(Calls::default()).await;

    let (status, body) = call(&base, "source", json!({ "ids": { "id": "71092938" } })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let manifest: Value = reqwest::get(format!("{base}/twitch"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(manifest["id"], "twitch");
    assert_eq!(manifest["dashboards"][1]["id"], "channels");
}
