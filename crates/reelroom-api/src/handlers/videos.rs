//! Video handlers: registration, listing with fresh download URLs, and the
//! status-overwrite endpoint driven by the external processing pipeline.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Deserialize;
use tracing::info;

use reelroom_core::{CreateVideoRequest, Video, VideoStatus};
use reelroom_ingest::VideoRegistered;

use crate::error::ApiError;
use crate::state::AppState;
use crate::tenant::Tenant;

/// URL-signing fan-out width when decorating a listing.
const SIGN_CONCURRENCY: usize = 8;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoBody {
    /// Caller-supplied ID, used verbatim so the ingestion pipeline can
    /// deduplicate on it.
    pub id: String,
    pub title: String,
    pub duration: f64,
    #[serde(default)]
    pub preview_image: String,
    pub key: String,
    pub mime_type: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: VideoStatus,
}

pub async fn create(
    State(state): State<AppState>,
    tenant: Tenant,
    Path(room_id): Path<String>,
    Json(body): Json<CreateVideoBody>,
) -> Result<(StatusCode, Json<Video>), ApiError> {
    if body.id.trim().is_empty() {
        return Err(ApiError::BadRequest("id must not be empty".to_string()));
    }
    if body.key.trim().is_empty() {
        return Err(ApiError::BadRequest("key must not be empty".to_string()));
    }

    let video = state
        .db
        .videos
        .create(CreateVideoRequest {
            id: body.id,
            title: body.title,
            duration: body.duration,
            preview_image: body.preview_image,
            object_key: body.key,
            mime_type: body.mime_type,
            room_id: room_id.clone(),
            tenant_id: tenant.id().to_string(),
        })
        .await?;

    // The row is durable before the pipeline is notified. If the enqueue
    // fails the video stays in TRANSCRIPTION_CREATING and the caller sees
    // the error; re-registering with the same ID retries the handoff.
    let message_id = state
        .ingest
        .notify_video_registered(VideoRegistered::new(
            video.clone(),
            room_id.clone(),
            tenant.id(),
        ))
        .await?;

    info!(
        subsystem = "api",
        op = "create_video",
        room_id = %room_id,
        video_id = %video.id,
        message_id = %message_id,
        "Video registered and queued for ingestion"
    );
    Ok((StatusCode::CREATED, Json(video)))
}

pub async fn list(
    State(state): State<AppState>,
    tenant: Tenant,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<Video>>, ApiError> {
    let videos = state.db.videos.list_by_room(&room_id, tenant.id()).await?;

    // Decorate each row with a fresh download URL, bounded fan-out,
    // input order preserved.
    let tenant_id = tenant.id().to_string();
    let videos: Vec<Video> = stream::iter(videos)
        .map(|mut video| {
            let gateway = state.gateway.clone();
            let tenant_id = tenant_id.clone();
            async move {
                let url = gateway
                    .issue_download_url(&tenant_id, &video.object_key)
                    .await?;
                video.download_url = Some(url);
                Ok::<Video, reelroom_core::Error>(video)
            }
        })
        .buffered(SIGN_CONCURRENCY)
        .try_collect()
        .await?;

    Ok(Json(videos))
}

pub async fn update_status(
    State(state): State<AppState>,
    tenant: Tenant,
    Path((room_id, video_id)): Path<(String, String)>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<StatusCode, ApiError> {
    // Scoped to the calling tenant like every other operation; another
    // tenant's video is reported as missing.
    state
        .db
        .videos
        .update_status(&video_id, &room_id, tenant.id(), body.status)
        .await?;
    info!(
        subsystem = "api",
        op = "update_video_status",
        room_id = %room_id,
        video_id = %video_id,
        status = %body.status,
        "Video status updated"
    );
    Ok(StatusCode::NO_CONTENT)
}
