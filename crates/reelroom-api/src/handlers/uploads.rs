//! Batch upload-URL issuance.
//!
//! Accepts a batch of file descriptors and returns one signed PUT URL per
//! entry, in the same order. Signing fans out with bounded concurrency;
//! any single signing failure fails the whole batch, so the caller never
//! receives a partially usable set.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::tenant::Tenant;

const SIGN_CONCURRENCY: usize = 8;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSlotRequest {
    pub id: String,
    /// Explicit object key; falls back to `file_name` when absent.
    #[serde(default)]
    pub key: Option<String>,
    pub file_name: String,
    pub file_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSlot {
    pub id: String,
    /// The logical key the object will live under (pre-namespacing).
    pub key: String,
    pub file_name: String,
    pub file_type: String,
    pub upload_url: String,
}

pub async fn create(
    State(state): State<AppState>,
    tenant: Tenant,
    Json(body): Json<Vec<UploadSlotRequest>>,
) -> Result<Json<Vec<UploadSlot>>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest(
            "upload batch must not be empty".to_string(),
        ));
    }

    let tenant_id = tenant.id().to_string();
    let count = body.len();

    let slots: Vec<UploadSlot> = stream::iter(body)
        .map(|slot| {
            let gateway = state.gateway.clone();
            let tenant_id = tenant_id.clone();
            async move {
                let key = slot
                    .key
                    .filter(|k| !k.trim().is_empty())
                    .unwrap_or_else(|| slot.file_name.clone());
                let metadata = BTreeMap::from([
                    ("created_by".to_string(), tenant_id.clone()),
                    ("updated_by".to_string(), tenant_id.clone()),
                ]);
                let upload_url = gateway
                    .issue_upload_url(&tenant_id, &key, &slot.file_type, &metadata)
                    .await?;
                Ok::<UploadSlot, reelroom_core::Error>(UploadSlot {
                    id: slot.id,
                    key,
                    file_name: slot.file_name,
                    file_type: slot.file_type,
                    upload_url,
                })
            }
        })
        .buffered(SIGN_CONCURRENCY)
        .try_collect()
        .await?;

    info!(
        subsystem = "api",
        op = "create_upload_urls",
        count,
        "Issued upload URLs"
    );
    Ok(Json(slots))
}
