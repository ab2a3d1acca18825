//! Knowledge room handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use reelroom_core::Room;

use crate::error::ApiError;
use crate::state::AppState;
use crate::tenant::Tenant;

#[derive(Debug, Deserialize)]
pub struct CreateRoomBody {
    pub title: String,
}

pub async fn create(
    State(state): State<AppState>,
    tenant: Tenant,
    Json(body): Json<CreateRoomBody>,
) -> Result<(StatusCode, Json<Room>), ApiError> {
    let title = body.title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".to_string()));
    }

    let room = state.db.rooms.create(title, tenant.id()).await?;
    info!(
        subsystem = "api",
        op = "create_room",
        room_id = %room.id,
        "Room created"
    );
    Ok((StatusCode::CREATED, Json(room)))
}

pub async fn list(
    State(state): State<AppState>,
    tenant: Tenant,
) -> Result<Json<Vec<Room>>, ApiError> {
    let rooms = state.db.rooms.list_by_tenant(tenant.id()).await?;
    Ok(Json(rooms))
}
