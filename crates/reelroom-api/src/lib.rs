//! # reelroom-api
//!
//! HTTP API server for reelroom: knowledge rooms, conversations, video
//! registration with ingestion handoff, batch upload URLs, and chat turns
//! against the inference collaborator.
//!
//! Route map:
//! - `GET  /rooms`                                      list tenant rooms
//! - `POST /rooms`                                      create a room
//! - `GET  /rooms/:room_id/conversations`               list conversations
//! - `POST /rooms/:room_id/conversations`               create a conversation
//! - `GET  /rooms/:room_id/videos`                      list videos + download URLs
//! - `POST /rooms/:room_id/videos`                      register a video
//! - `PUT  /rooms/:room_id/videos/:video_id/status`     overwrite processing status
//! - `POST /uploads`                                    issue signed upload URLs
//! - `GET  /rooms/:room_id/conversations/:conversation_id/messages`
//! - `POST /rooms/:room_id/conversations/:conversation_id/messages`

use axum::http::{header, Method};
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub mod error;
pub mod handlers;
pub mod services;
pub mod state;
pub mod tenant;

pub use error::ApiError;
pub use state::AppState;
pub use tenant::Tenant;

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically in logs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Build the application router around shared state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            "/rooms",
            get(handlers::rooms::list).post(handlers::rooms::create),
        )
        .route(
            "/rooms/:room_id/conversations",
            get(handlers::conversations::list).post(handlers::conversations::create),
        )
        .route(
            "/rooms/:room_id/videos",
            get(handlers::videos::list).post(handlers::videos::create),
        )
        .route(
            "/rooms/:room_id/videos/:video_id/status",
            put(handlers::videos::update_status),
        )
        .route("/uploads", post(handlers::uploads::create))
        .route(
            "/rooms/:room_id/conversations/:conversation_id/messages",
            get(handlers::messages::list).post(handlers::messages::send),
        )
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::any())
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]),
        )
        .with_state(state)
}
