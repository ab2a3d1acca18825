//! Core data models for reelroom.
//!
//! These types are shared across all reelroom crates and represent the
//! domain entities stored in the single sparse entity table, plus the wire
//! schemas exchanged with the external inference collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// VIDEO STATUS
// =============================================================================

/// Processing state of a registered video.
///
/// Forward-only order: `INIT → UPLOADING → TRANSCRIPTION_CREATING →
/// EMBEDDINGS_CREATING → DONE`, with terminal `ERROR` reachable from any
/// non-terminal state. Transitions up to `TRANSCRIPTION_CREATING` are driven
/// by this core; the external processing pipeline drives the rest through
/// `update_video_status`, which performs a blind overwrite — the storage
/// layer does not validate that a transition is forward-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoStatus {
    Init,
    Uploading,
    TranscriptionCreating,
    EmbeddingsCreating,
    Done,
    Error,
}

impl VideoStatus {
    /// String form stored in the entity table and exposed on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::Uploading => "UPLOADING",
            Self::TranscriptionCreating => "TRANSCRIPTION_CREATING",
            Self::EmbeddingsCreating => "EMBEDDINGS_CREATING",
            Self::Done => "DONE",
            Self::Error => "ERROR",
        }
    }

    /// Whether no further transition is expected from this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

impl std::fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VideoStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INIT" => Ok(Self::Init),
            "UPLOADING" => Ok(Self::Uploading),
            "TRANSCRIPTION_CREATING" => Ok(Self::TranscriptionCreating),
            "EMBEDDINGS_CREATING" => Ok(Self::EmbeddingsCreating),
            "DONE" => Ok(Self::Done),
            "ERROR" => Ok(Self::Error),
            other => Err(crate::Error::InvalidInput(format!(
                "unknown video status: {other}"
            ))),
        }
    }
}

// =============================================================================
// ENTITIES
// =============================================================================

/// A knowledge room: a named container grouping videos and conversations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub title: String,
    pub tenant_id: String,
    pub created_at: DateTime<Utc>,
}

/// A chat thread scoped to one room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub tenant_id: String,
    pub created_at: DateTime<Utc>,
}

/// Metadata row for an uploaded video. The binary lives in the blob store
/// under the tenant-namespaced `object_key`; this row carries metadata and
/// processing state only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    /// Duration in seconds.
    pub duration: f64,
    pub preview_image: String,
    /// Logical blob key, namespaced `{tenant}/{key}` at the gateway.
    pub object_key: String,
    pub mime_type: String,
    pub status: VideoStatus,
    pub tenant_id: String,
    pub created_at: DateTime<Utc>,
    /// Freshly issued download URL; populated by the listing layer, never
    /// stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

/// A reference from a chat answer to a specific video time range, used as
/// retrieval-augmented evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedDocument {
    pub video_id: String,
    /// Segment start, seconds from video start.
    pub start: i64,
    /// Segment end, seconds from video start.
    pub end: i64,
}

/// One message in a conversation: either a user utterance or a generated
/// answer. Rows are append-only, two per chat turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub is_user_turn: bool,
    pub citations: Vec<RelatedDocument>,
    pub tenant_id: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// INFERENCE COLLABORATOR WIRE SCHEMAS
// =============================================================================

/// Schema tag for the chat turn request payload.
pub const CHAT_TURN_SCHEMA: &str = "reelroom.chat-turn.v1";

/// One prior turn handed to the collaborator, most recent first.
///
/// Field names follow the collaborator's wire contract
/// (`content` / `isUserMessage` / `createdAt`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub content: String,
    #[serde(rename = "isUserMessage")]
    pub is_user_message: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Request sent synchronously to the inference collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurnRequest {
    /// Payload schema tag; lets the consumer reject drift explicitly
    /// instead of failing mid-parse.
    pub schema: String,
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    #[serde(rename = "roomId")]
    pub room_id: String,
    pub message: String,
    /// Prior turns, descending `created_at` (most recent first).
    pub history: Vec<HistoryEntry>,
}

/// One cited video segment in a collaborator response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitedSegment {
    pub video_id: String,
    pub start: i64,
    pub end: i64,
}

impl From<CitedSegment> for RelatedDocument {
    fn from(c: CitedSegment) -> Self {
        Self {
            video_id: c.video_id,
            start: c.start,
            end: c.end,
        }
    }
}

/// Response returned by the inference collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurnResponse {
    pub answer: String,
    #[serde(default)]
    pub citations: Vec<CitedSegment>,
}
