//! Video repository implementation.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use sqlx::{Pool, Postgres, Row};
use tracing::warn;

use reelroom_core::{
    validate_id, CreateVideoRequest, Error, Result, Video, VideoRepository, VideoStatus,
};

use crate::keyspace::{self, TYPE_VIDEO, VIDEO_SK_PREFIX};

/// PostgreSQL implementation of VideoRepository.
///
/// A video row carries metadata and processing state only; the binary
/// lives in the blob store under the tenant-namespaced object key. The
/// status field is the one mutable attribute, updated out-of-band by the
/// processing pipeline with last-writer-wins semantics.
pub struct PgVideoRepository {
    pool: Pool<Postgres>,
}

impl PgVideoRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    async fn create(&self, req: CreateVideoRequest) -> Result<Video> {
        // Caller-supplied ID; a '#' would change the key's shape.
        validate_id(&req.id)?;
        let now = Utc::now();
        let status = VideoStatus::TranscriptionCreating;

        let attrs = json!({
            "duration": req.duration,
            "preview_image": req.preview_image,
            "object_key": req.object_key,
            "mime_type": req.mime_type,
            "status": status.as_str(),
        });

        sqlx::query(
            "INSERT INTO entity (pk, sk, entity_type, tenant_id, title, attrs, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (pk, sk) DO UPDATE
                 SET entity_type = EXCLUDED.entity_type,
                     tenant_id   = EXCLUDED.tenant_id,
                     title       = EXCLUDED.title,
                     attrs       = EXCLUDED.attrs,
                     created_at  = EXCLUDED.created_at",
        )
        .bind(keyspace::room_pk(&req.room_id))
        .bind(keyspace::video_sk(&req.id))
        .bind(TYPE_VIDEO)
        .bind(&req.tenant_id)
        .bind(&req.title)
        .bind(&attrs)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(Video {
            id: req.id,
            title: req.title,
            duration: req.duration,
            preview_image: req.preview_image,
            object_key: req.object_key,
            mime_type: req.mime_type,
            status,
            tenant_id: req.tenant_id,
            created_at: now,
            download_url: None,
        })
    }

    async fn list_by_room(&self, room_id: &str, tenant_id: &str) -> Result<Vec<Video>> {
        let rows = sqlx::query(
            "SELECT sk, title, tenant_id, attrs, created_at
             FROM entity
             WHERE pk = $1 AND sk LIKE $2 AND tenant_id = $3
             ORDER BY created_at ASC",
        )
        .bind(keyspace::room_pk(room_id))
        .bind(format!("{VIDEO_SK_PREFIX}%"))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let sk: String = r.get("sk");
                let attrs: serde_json::Value = r.get("attrs");
                let status_str = attrs["status"].as_str().unwrap_or_default();
                let status = VideoStatus::from_str(status_str).unwrap_or_else(|_| {
                    warn!(
                        subsystem = "db",
                        component = "videos",
                        video_sk = %sk,
                        status = %status_str,
                        "Unknown stored video status, surfacing as ERROR"
                    );
                    VideoStatus::Error
                });
                Video {
                    id: keyspace::trailing_id(&sk).to_string(),
                    title: r.get::<Option<String>, _>("title").unwrap_or_default(),
                    duration: attrs["duration"].as_f64().unwrap_or(0.0),
                    preview_image: attrs["preview_image"].as_str().unwrap_or_default().into(),
                    object_key: attrs["object_key"].as_str().unwrap_or_default().into(),
                    mime_type: attrs["mime_type"].as_str().unwrap_or_default().into(),
                    status,
                    tenant_id: r.get("tenant_id"),
                    created_at: r.get("created_at"),
                    download_url: None,
                }
            })
            .collect())
    }

    async fn update_status(
        &self,
        video_id: &str,
        room_id: &str,
        tenant_id: &str,
        new_status: VideoStatus,
    ) -> Result<()> {
        // Blind overwrite: no check that the transition is forward-only.
        // The tenant condition is not optional though — without it any
        // tenant holding the IDs could flip another tenant's video.
        let result = sqlx::query(
            "UPDATE entity
             SET attrs = jsonb_set(attrs, '{status}', to_jsonb($1::text))
             WHERE pk = $2 AND sk = $3 AND tenant_id = $4",
        )
        .bind(new_status.as_str())
        .bind(keyspace::room_pk(room_id))
        .bind(keyspace::video_sk(video_id))
        .bind(tenant_id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!(
                "video {video_id} in room {room_id}"
            )));
        }
        Ok(())
    }
}
