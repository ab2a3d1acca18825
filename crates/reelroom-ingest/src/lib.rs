//! # reelroom-ingest
//!
//! Ingestion trigger for reelroom: hands newly registered videos off to
//! the external transcription/embedding pipeline as durable queue
//! messages.
//!
//! The contract is at-least-once, not exactly-once: a message may be
//! delivered more than once and consumers must be idempotent on the video
//! ID embedded in the payload. The trigger is fire-and-continue — the only
//! failure mode visible to the caller is the enqueue itself failing, in
//! which case the already-created Video row simply stays in
//! `TRANSCRIPTION_CREATING` until retried out-of-band.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use reelroom_core::{Result, Video};

pub mod queue;

pub use queue::{MemoryIngestQueue, PgIngestQueue};

/// Schema tag for the video-registered event payload.
pub const VIDEO_REGISTERED_SCHEMA: &str = "reelroom.video-registered.v1";

/// Queue message describing a newly registered video, with enough room and
/// tenant context for the pipeline to process it without further lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRegistered {
    /// Payload schema tag so producer/consumer drift fails loudly.
    pub schema: String,
    pub video: Video,
    #[serde(rename = "roomId")]
    pub room_id: String,
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
}

impl VideoRegistered {
    pub fn new(video: Video, room_id: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            schema: VIDEO_REGISTERED_SCHEMA.to_string(),
            video,
            room_id: room_id.into(),
            tenant_id: tenant_id.into(),
        }
    }
}

/// Durable, at-least-once ingestion event queue.
#[async_trait]
pub trait IngestQueue: Send + Sync {
    /// Enqueue the event and return the durable message ID.
    async fn notify_video_registered(&self, event: VideoRegistered) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelroom_core::VideoStatus;

    fn sample_video() -> Video {
        Video {
            id: "v1".to_string(),
            title: "clip".to_string(),
            duration: 30.0,
            preview_image: "clip.jpg".to_string(),
            object_key: "clip.mp4".to_string(),
            mime_type: "video/mp4".to_string(),
            status: VideoStatus::TranscriptionCreating,
            tenant_id: "u1".to_string(),
            created_at: chrono::Utc::now(),
            download_url: None,
        }
    }

    #[test]
    fn test_event_carries_schema_tag_and_context() {
        let event = VideoRegistered::new(sample_video(), "r1", "u1");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["schema"], VIDEO_REGISTERED_SCHEMA);
        assert_eq!(value["roomId"], "r1");
        assert_eq!(value["tenantId"], "u1");
        assert_eq!(value["video"]["id"], "v1");
        assert_eq!(value["video"]["status"], "TRANSCRIPTION_CREATING");
    }

    #[test]
    fn test_event_round_trips() {
        let event = VideoRegistered::new(sample_video(), "r1", "u1");
        let json = serde_json::to_string(&event).unwrap();
        let back: VideoRegistered = serde_json::from_str(&json).unwrap();
        assert_eq!(back.video.id, "v1");
        assert_eq!(back.room_id, "r1");
    }
}
