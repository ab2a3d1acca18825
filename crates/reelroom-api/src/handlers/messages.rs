//! Chat message handlers: listing a conversation and running a full chat
//! turn through the orchestrator.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use reelroom_core::{ids, ChatMessage};

use crate::error::ApiError;
use crate::services::ChatTurnOrchestrator;
use crate::state::AppState;
use crate::tenant::Tenant;

#[derive(Debug, Deserialize)]
pub struct SendMessageBody {
    /// Caller-supplied ID for the user turn; generated when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub message: String,
}

pub async fn send(
    State(state): State<AppState>,
    tenant: Tenant,
    Path((room_id, conversation_id)): Path<(String, String)>,
    Json(body): Json<SendMessageBody>,
) -> Result<(StatusCode, Json<ChatMessage>), ApiError> {
    if body.message.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "message must not be empty".to_string(),
        ));
    }

    let user_message_id = body
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(ids::new_id);

    let orchestrator = ChatTurnOrchestrator::new(state.db.clone(), state.chat.clone());
    let answer = orchestrator
        .run(
            tenant.id(),
            &room_id,
            &conversation_id,
            &user_message_id,
            &body.message,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(answer)))
}

pub async fn list(
    State(state): State<AppState>,
    tenant: Tenant,
    Path((room_id, conversation_id)): Path<(String, String)>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let messages = state
        .db
        .messages
        .list_by_conversation(&room_id, &conversation_id, tenant.id())
        .await?;
    Ok(Json(messages))
}
