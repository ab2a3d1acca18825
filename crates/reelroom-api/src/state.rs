//! Shared application state handed to every handler.

use std::sync::Arc;

use reelroom_blob::ObjectGateway;
use reelroom_core::ChatBackend;
use reelroom_db::Database;
use reelroom_ingest::IngestQueue;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub gateway: Arc<ObjectGateway>,
    pub ingest: Arc<dyn IngestQueue>,
    pub chat: Arc<dyn ChatBackend>,
}

impl AppState {
    pub fn new(
        db: Database,
        gateway: Arc<ObjectGateway>,
        ingest: Arc<dyn IngestQueue>,
        chat: Arc<dyn ChatBackend>,
    ) -> Self {
        Self {
            db,
            gateway,
            ingest,
            chat,
        }
    }
}
