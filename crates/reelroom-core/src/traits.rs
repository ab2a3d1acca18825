//! Core traits for reelroom abstractions.
//!
//! These traits define the seams between the storage layer, the external
//! collaborators, and the orchestration code, enabling pluggable backends
//! (Postgres vs. in-memory, HTTP vs. mock) and testability.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// STORAGE ACCESS LAYER
// =============================================================================

/// Repository for knowledge room rows.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Create a room with a server-generated ID. Unconditional single-row
    /// put, last write wins.
    async fn create(&self, title: &str, tenant_id: &str) -> Result<Room>;

    /// List every room belonging to a tenant via the secondary index.
    /// Never contains another tenant's rooms.
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Room>>;
}

/// Repository for conversation rows within a room.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    async fn create(&self, title: &str, room_id: &str, tenant_id: &str) -> Result<Conversation>;

    /// SK-prefix listing, tenant-filtered.
    async fn list_by_room(&self, room_id: &str, tenant_id: &str) -> Result<Vec<Conversation>>;
}

/// Request for registering a video. The ID is caller-supplied so the
/// downstream ingestion pipeline can deduplicate on it.
#[derive(Debug, Clone)]
pub struct CreateVideoRequest {
    pub id: String,
    pub title: String,
    pub duration: f64,
    pub preview_image: String,
    pub object_key: String,
    pub mime_type: String,
    pub room_id: String,
    pub tenant_id: String,
}

/// Repository for video metadata rows.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Register a video; status is initialized to `TRANSCRIPTION_CREATING`.
    async fn create(&self, req: CreateVideoRequest) -> Result<Video>;

    /// SK-prefix listing, tenant-filtered. `download_url` is left unset.
    async fn list_by_room(&self, room_id: &str, tenant_id: &str) -> Result<Vec<Video>>;

    /// Overwrite the status field, last writer wins. No validation that the
    /// transition is forward-only — the caller (the external processing
    /// pipeline) is trusted with the transition, but never across tenants:
    /// the write is scoped to `tenant_id` like every read, and a video
    /// belonging to another tenant reports `NotFound`.
    async fn update_status(
        &self,
        video_id: &str,
        room_id: &str,
        tenant_id: &str,
        new_status: VideoStatus,
    ) -> Result<()>;
}

/// Request for appending a chat message row.
#[derive(Debug, Clone)]
pub struct CreateChatMessageRequest {
    pub id: String,
    pub content: String,
    pub citations: Vec<RelatedDocument>,
    pub is_user_turn: bool,
    pub room_id: String,
    pub conversation_id: String,
    pub tenant_id: String,
}

/// Repository for append-only chat message rows.
#[async_trait]
pub trait ChatMessageRepository: Send + Sync {
    async fn create(&self, req: CreateChatMessageRequest) -> Result<ChatMessage>;

    /// Messages of one conversation in ascending `created_at` order.
    /// Order comes from the stored timestamp, never from ID comparison.
    async fn list_by_conversation(
        &self,
        room_id: &str,
        conversation_id: &str,
        tenant_id: &str,
    ) -> Result<Vec<ChatMessage>>;
}

// =============================================================================
// INFERENCE COLLABORATOR
// =============================================================================

/// Synchronous request/response boundary to the external inference
/// collaborator that turns a user utterance plus history into an answer
/// with cited video segments.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn answer(&self, request: ChatTurnRequest) -> Result<ChatTurnResponse>;
}
