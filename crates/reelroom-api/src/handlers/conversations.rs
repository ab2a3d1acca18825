//! Conversation handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use reelroom_core::Conversation;

use crate::error::ApiError;
use crate::state::AppState;
use crate::tenant::Tenant;

#[derive(Debug, Deserialize)]
pub struct CreateConversationBody {
    pub title: String,
}

pub async fn create(
    State(state): State<AppState>,
    tenant: Tenant,
    Path(room_id): Path<String>,
    Json(body): Json<CreateConversationBody>,
) -> Result<(StatusCode, Json<Conversation>), ApiError> {
    let title = body.title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".to_string()));
    }

    let conversation = state
        .db
        .conversations
        .create(title, &room_id, tenant.id())
        .await?;
    info!(
        subsystem = "api",
        op = "create_conversation",
        room_id = %room_id,
        conversation_id = %conversation.id,
        "Conversation created"
    );
    Ok((StatusCode::CREATED, Json(conversation)))
}

pub async fn list(
    State(state): State<AppState>,
    tenant: Tenant,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<Conversation>>, ApiError> {
    let conversations = state
        .db
        .conversations
        .list_by_room(&room_id, tenant.id())
        .await?;
    Ok(Json(conversations))
}
