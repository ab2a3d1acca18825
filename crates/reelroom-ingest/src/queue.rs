//! Ingestion queue implementations.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tokio::sync::Notify;
use tracing::{debug, info};

use reelroom_core::{new_id, Error, Result};

use crate::{IngestQueue, VideoRegistered, VIDEO_REGISTERED_SCHEMA};

/// PostgreSQL-backed durable ingestion queue.
///
/// Events land as pending rows in `ingest_event`; an external consumer
/// drains them at its own pace. The `Notify` handle wakes a co-located
/// consumer without polling, but delivery never depends on it — the row is
/// the message.
pub struct PgIngestQueue {
    pool: Pool<Postgres>,
    notify: Arc<Notify>,
}

impl PgIngestQueue {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            pool,
            notify: Arc::new(Notify::new()),
        }
    }

    /// Create a queue sharing an existing notify handle.
    pub fn with_notify(pool: Pool<Postgres>, notify: Arc<Notify>) -> Self {
        Self { pool, notify }
    }

    /// Wake handle for an event-driven consumer.
    pub fn event_notify(&self) -> Arc<Notify> {
        self.notify.clone()
    }
}

#[async_trait]
impl IngestQueue for PgIngestQueue {
    async fn notify_video_registered(&self, event: VideoRegistered) -> Result<String> {
        let message_id = new_id();
        let payload = serde_json::to_value(&event)?;

        sqlx::query(
            "INSERT INTO ingest_event (id, schema, payload) VALUES ($1, $2, $3)",
        )
        .bind(&message_id)
        .bind(VIDEO_REGISTERED_SCHEMA)
        .bind(&payload)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Queue(format!("enqueue failed: {e}")))?;

        self.notify.notify_waiters();

        info!(
            subsystem = "ingest",
            component = "queue",
            op = "notify_video_registered",
            message_id = %message_id,
            video_id = %event.video.id,
            room_id = %event.room_id,
            tenant_id = %event.tenant_id,
            "Ingestion event enqueued"
        );
        Ok(message_id)
    }
}

/// In-memory queue for tests and local development.
#[derive(Clone, Default)]
pub struct MemoryIngestQueue {
    events: Arc<Mutex<Vec<VideoRegistered>>>,
    fail_enqueue: bool,
}

impl MemoryIngestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every enqueue fail, for exercising the caller's failure path.
    pub fn failing() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            fail_enqueue: true,
        }
    }

    /// Events enqueued so far, in order.
    pub fn sent(&self) -> Vec<VideoRegistered> {
        self.events.lock().expect("ingest queue lock poisoned").clone()
    }
}

#[async_trait]
impl IngestQueue for MemoryIngestQueue {
    async fn notify_video_registered(&self, event: VideoRegistered) -> Result<String> {
        if self.fail_enqueue {
            return Err(Error::Queue("enqueue failed: queue unavailable".into()));
        }
        let message_id = new_id();
        debug!(
            subsystem = "ingest",
            component = "memory_queue",
            message_id = %message_id,
            video_id = %event.video.id,
            "Ingestion event recorded"
        );
        self.events
            .lock()
            .expect("ingest queue lock poisoned")
            .push(event);
        Ok(message_id)
    }
}
