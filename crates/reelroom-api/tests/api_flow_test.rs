//! End-to-end router tests over the in-memory backends.
//!
//! Exercises the full resolver surface through real HTTP requests against
//! the router: room/conversation lifecycle, upload URL batches, video
//! registration with ingestion handoff, download-URL decoration, chat
//! turns, and tenant isolation.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use reelroom_api::{app, AppState};
use reelroom_blob::{HmacUrlSigner, ObjectGateway};
use reelroom_core::ChatBackend;
use reelroom_db::Database;
use reelroom_inference::MockChatBackend;
use reelroom_ingest::{IngestQueue, MemoryIngestQueue, VIDEO_REGISTERED_SCHEMA};

fn test_app(chat: MockChatBackend, ingest: MemoryIngestQueue) -> Router {
    let signer = Arc::new(HmacUrlSigner::new(
        "http://blobs.local",
        "reelroom-test",
        b"test-secret".to_vec(),
    ));
    let state = AppState::new(
        Database::memory(),
        Arc::new(ObjectGateway::new(signer)),
        Arc::new(ingest) as Arc<dyn IngestQueue>,
        Arc::new(chat) as Arc<dyn ChatBackend>,
    );
    app(state)
}

fn default_app() -> Router {
    test_app(MockChatBackend::new(), MemoryIngestQueue::new())
}

fn request(method: &str, uri: &str, tenant: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(tenant) = tenant {
        builder = builder.header("Authorization", tenant);
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn requests_without_tenant_are_rejected() {
    let app = default_app();

    let (status, body) = send(&app, request("GET", "/rooms", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().unwrap().contains("Access denied"));

    let (status, _) = send(
        &app,
        request("POST", "/rooms", None, Some(serde_json::json!({"title": "x"}))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn room_and_conversation_lifecycle() {
    let app = default_app();

    let (status, room) = send(
        &app,
        request(
            "POST",
            "/rooms",
            Some("u1"),
            Some(serde_json::json!({"title": "Trip Videos"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(room["title"], "Trip Videos");
    let room_id = room["id"].as_str().unwrap().to_string();

    let (status, rooms) = send(&app, request("GET", "/rooms", Some("u1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rooms.as_array().unwrap().len(), 1);
    assert_eq!(rooms[0]["id"], room_id.as_str());

    let (status, conversation) = send(
        &app,
        request(
            "POST",
            &format!("/rooms/{room_id}/conversations"),
            Some("u1"),
            Some(serde_json::json!({"title": "Day one"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, listed) = send(
        &app,
        request(
            "GET",
            &format!("/rooms/{room_id}/conversations"),
            Some("u1"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed[0]["id"], conversation["id"]);
}

#[tokio::test]
async fn blank_titles_are_rejected() {
    let app = default_app();

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/rooms",
            Some("u1"),
            Some(serde_json::json!({"title": "   "})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_batch_preserves_order_and_namespaces_keys() {
    let app = default_app();

    let (status, slots) = send(
        &app,
        request(
            "POST",
            "/uploads",
            Some("u1"),
            Some(serde_json::json!([
                {"id": "a", "key": "trip/boat.mp4", "fileName": "boat.mp4", "fileType": "video/mp4"},
                {"id": "b", "fileName": "sunset.mp4", "fileType": "video/mp4"}
            ])),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let slots = slots.as_array().unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0]["id"], "a");
    assert_eq!(slots[0]["key"], "trip/boat.mp4");
    assert_eq!(slots[0]["fileName"], "boat.mp4");
    assert!(slots[0]["uploadUrl"].as_str().unwrap().contains("u1/trip"));
    // Missing key falls back to the file name.
    assert_eq!(slots[1]["id"], "b");
    assert_eq!(slots[1]["key"], "sunset.mp4");
    assert!(slots[1]["uploadUrl"]
        .as_str()
        .unwrap()
        .contains("u1/sunset.mp4"));
}

#[tokio::test]
async fn empty_upload_batch_is_rejected() {
    let app = default_app();
    let (status, _) = send(
        &app,
        request("POST", "/uploads", Some("u1"), Some(serde_json::json!([]))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn video_registration_queues_ingestion_and_lists_with_download_url() {
    let ingest = MemoryIngestQueue::new();
    let app = test_app(MockChatBackend::new(), ingest.clone());

    let (_, room) = send(
        &app,
        request(
            "POST",
            "/rooms",
            Some("u1"),
            Some(serde_json::json!({"title": "Trip"})),
        ),
    )
    .await;
    let room_id = room["id"].as_str().unwrap().to_string();

    let (status, video) = send(
        &app,
        request(
            "POST",
            &format!("/rooms/{room_id}/videos"),
            Some("u1"),
            Some(serde_json::json!({
                "id": "vid-1",
                "title": "Boat",
                "duration": 31.5,
                "previewImage": "boat.jpg",
                "key": "trip/boat.mp4",
                "mimeType": "video/mp4"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(video["id"], "vid-1");
    assert_eq!(video["status"], "TRANSCRIPTION_CREATING");

    let sent = ingest.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].schema, VIDEO_REGISTERED_SCHEMA);
    assert_eq!(sent[0].video.id, "vid-1");
    assert_eq!(sent[0].room_id, room_id);
    assert_eq!(sent[0].tenant_id, "u1");

    let (status, videos) = send(
        &app,
        request("GET", &format!("/rooms/{room_id}/videos"), Some("u1"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let videos = videos.as_array().unwrap();
    assert_eq!(videos.len(), 1);
    let url = videos[0]["downloadUrl"].as_str().unwrap();
    assert!(url.contains("u1/trip/boat.mp4"));
}

#[tokio::test]
async fn failed_ingestion_handoff_surfaces_but_keeps_the_row() {
    let app = test_app(MockChatBackend::new(), MemoryIngestQueue::failing());

    let (_, room) = send(
        &app,
        request(
            "POST",
            "/rooms",
            Some("u1"),
            Some(serde_json::json!({"title": "Trip"})),
        ),
    )
    .await;
    let room_id = room["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/rooms/{room_id}/videos"),
            Some("u1"),
            Some(serde_json::json!({
                "id": "vid-1",
                "title": "Boat",
                "duration": 10.0,
                "key": "boat.mp4",
                "mimeType": "video/mp4"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal error");

    // The row was written before the handoff failed; it stays visible in
    // TRANSCRIPTION_CREATING for an out-of-band retry.
    let (_, videos) = send(
        &app,
        request("GET", &format!("/rooms/{room_id}/videos"), Some("u1"), None),
    )
    .await;
    assert_eq!(videos.as_array().unwrap().len(), 1);
    assert_eq!(videos[0]["status"], "TRANSCRIPTION_CREATING");
}

#[tokio::test]
async fn status_overwrite_is_visible_in_listings() {
    let app = default_app();

    let (_, room) = send(
        &app,
        request(
            "POST",
            "/rooms",
            Some("u1"),
            Some(serde_json::json!({"title": "Trip"})),
        ),
    )
    .await;
    let room_id = room["id"].as_str().unwrap().to_string();

    send(
        &app,
        request(
            "POST",
            &format!("/rooms/{room_id}/videos"),
            Some("u1"),
            Some(serde_json::json!({
                "id": "vid-1",
                "title": "Boat",
                "duration": 10.0,
                "key": "boat.mp4",
                "mimeType": "video/mp4"
            })),
        ),
    )
    .await;

    let (status, _) = send(
        &app,
        request(
            "PUT",
            &format!("/rooms/{room_id}/videos/vid-1/status"),
            Some("u1"),
            Some(serde_json::json!({"status": "DONE"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, videos) = send(
        &app,
        request("GET", &format!("/rooms/{room_id}/videos"), Some("u1"), None),
    )
    .await;
    assert_eq!(videos[0]["status"], "DONE");

    let (status, _) = send(
        &app,
        request(
            "PUT",
            &format!("/rooms/{room_id}/videos/missing/status"),
            Some("u1"),
            Some(serde_json::json!({"status": "ERROR"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_overwrite_is_rejected_across_tenants() {
    let app = default_app();

    let (_, room) = send(
        &app,
        request(
            "POST",
            "/rooms",
            Some("u1"),
            Some(serde_json::json!({"title": "Trip"})),
        ),
    )
    .await;
    let room_id = room["id"].as_str().unwrap().to_string();

    send(
        &app,
        request(
            "POST",
            &format!("/rooms/{room_id}/videos"),
            Some("u1"),
            Some(serde_json::json!({
                "id": "vid-1",
                "title": "Boat",
                "duration": 10.0,
                "key": "boat.mp4",
                "mimeType": "video/mp4"
            })),
        ),
    )
    .await;

    // Another tenant knows the room and video IDs; the overwrite must
    // still look like a miss and leave the status untouched.
    let (status, _) = send(
        &app,
        request(
            "PUT",
            &format!("/rooms/{room_id}/videos/vid-1/status"),
            Some("u2"),
            Some(serde_json::json!({"status": "ERROR"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, videos) = send(
        &app,
        request("GET", &format!("/rooms/{room_id}/videos"), Some("u1"), None),
    )
    .await;
    assert_eq!(videos[0]["status"], "TRANSCRIPTION_CREATING");
}

#[tokio::test]
async fn ids_with_key_delimiter_are_rejected() {
    let app = default_app();

    let (_, room) = send(
        &app,
        request(
            "POST",
            "/rooms",
            Some("u1"),
            Some(serde_json::json!({"title": "Trip"})),
        ),
    )
    .await;
    let room_id = room["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/rooms/{room_id}/videos"),
            Some("u1"),
            Some(serde_json::json!({
                "id": "a#b",
                "title": "Boat",
                "duration": 10.0,
                "key": "boat.mp4",
                "mimeType": "video/mp4"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains('#'));

    let (_, videos) = send(
        &app,
        request("GET", &format!("/rooms/{room_id}/videos"), Some("u1"), None),
    )
    .await;
    assert!(videos.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn chat_turn_persists_both_sides_with_citations() {
    let chat = MockChatBackend::new()
        .with_answer("A boat arrives.")
        .with_citation("vid-1", 10, 25);
    let app = test_app(chat, MemoryIngestQueue::new());

    let (_, room) = send(
        &app,
        request(
            "POST",
            "/rooms",
            Some("u1"),
            Some(serde_json::json!({"title": "Trip"})),
        ),
    )
    .await;
    let room_id = room["id"].as_str().unwrap().to_string();

    let (_, conversation) = send(
        &app,
        request(
            "POST",
            &format!("/rooms/{room_id}/conversations"),
            Some("u1"),
            Some(serde_json::json!({"title": "Day one"})),
        ),
    )
    .await;
    let conversation_id = conversation["id"].as_str().unwrap().to_string();

    let messages_uri = format!("/rooms/{room_id}/conversations/{conversation_id}/messages");
    let (status, answer) = send(
        &app,
        request(
            "POST",
            &messages_uri,
            Some("u1"),
            Some(serde_json::json!({"message": "What happens in the video?"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(answer["content"], "A boat arrives.");
    assert_eq!(answer["isUserTurn"], false);
    assert_eq!(answer["citations"][0]["videoId"], "vid-1");
    assert_eq!(answer["citations"][0]["start"], 10);
    assert_eq!(answer["citations"][0]["end"], 25);

    let (status, messages) = send(&app, request("GET", &messages_uri, Some("u1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["isUserTurn"], true);
    assert_eq!(messages[0]["content"], "What happens in the video?");
    assert_eq!(messages[1]["isUserTurn"], false);
    assert_eq!(messages[1]["content"], "A boat arrives.");
}

#[tokio::test]
async fn failed_generation_returns_502_and_keeps_the_question() {
    let app = test_app(MockChatBackend::new().failing(), MemoryIngestQueue::new());

    let (_, room) = send(
        &app,
        request(
            "POST",
            "/rooms",
            Some("u1"),
            Some(serde_json::json!({"title": "Trip"})),
        ),
    )
    .await;
    let room_id = room["id"].as_str().unwrap().to_string();
    let (_, conversation) = send(
        &app,
        request(
            "POST",
            &format!("/rooms/{room_id}/conversations"),
            Some("u1"),
            Some(serde_json::json!({"title": "Day one"})),
        ),
    )
    .await;
    let conversation_id = conversation["id"].as_str().unwrap().to_string();
    let messages_uri = format!("/rooms/{room_id}/conversations/{conversation_id}/messages");

    let (status, body) = send(
        &app,
        request(
            "POST",
            &messages_uri,
            Some("u1"),
            Some(serde_json::json!({"message": "hello?"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "cannot generate response");

    let (_, messages) = send(&app, request("GET", &messages_uri, Some("u1"), None)).await;
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["isUserTurn"], true);
}

#[tokio::test]
async fn tenants_are_isolated_end_to_end() {
    let app = default_app();

    let (_, room) = send(
        &app,
        request(
            "POST",
            "/rooms",
            Some("u1"),
            Some(serde_json::json!({"title": "Private"})),
        ),
    )
    .await;
    let room_id = room["id"].as_str().unwrap().to_string();

    send(
        &app,
        request(
            "POST",
            &format!("/rooms/{room_id}/videos"),
            Some("u1"),
            Some(serde_json::json!({
                "id": "vid-1",
                "title": "Boat",
                "duration": 10.0,
                "key": "boat.mp4",
                "mimeType": "video/mp4"
            })),
        ),
    )
    .await;

    let (_, rooms) = send(&app, request("GET", "/rooms", Some("u2"), None)).await;
    assert!(rooms.as_array().unwrap().is_empty());

    // Even knowing the room ID, another tenant sees nothing in it.
    let (status, videos) = send(
        &app,
        request("GET", &format!("/rooms/{room_id}/videos"), Some("u2"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(videos.as_array().unwrap().is_empty());
}
