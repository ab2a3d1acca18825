//! # reelroom-db
//!
//! Storage access layer for reelroom.
//!
//! This crate provides:
//! - The single-table key-space model (`keyspace`)
//! - Connection pool management
//! - PostgreSQL repository implementations for all four entity kinds
//! - An in-memory store implementing the same traits for tests/local dev
//!
//! All entities live in one sparse table keyed by (PK, SK) with a
//! secondary index on (tenant_id, entity_type) for tenant-wide listing.
//! Writes are unconditional upserts (last write wins); every read combines
//! a key condition with a tenant equality filter.
//!
//! ## Example
//!
//! ```rust,ignore
//! use reelroom_db::{create_pool, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool("postgres://localhost/reelroom").await?;
//!     let db = Database::postgres(pool);
//!
//!     let room = db.rooms.create("Trip Videos", "tenant-1").await?;
//!     println!("Created room: {}", room.id);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

pub mod conversations;
pub mod keyspace;
pub mod memory;
pub mod messages;
pub mod pool;
pub mod rooms;
pub mod videos;

// Re-export core types
pub use reelroom_core::*;

pub use conversations::PgConversationRepository;
pub use memory::MemoryStore;
pub use messages::PgChatMessageRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use rooms::PgRoomRepository;
pub use videos::PgVideoRepository;

/// Combined database context with all repositories.
///
/// Holds trait objects so the Postgres and in-memory backends are
/// interchangeable behind one handle.
#[derive(Clone)]
pub struct Database {
    /// Room repository (metadata rows + tenant-wide listing).
    pub rooms: Arc<dyn RoomRepository>,
    /// Conversation repository.
    pub conversations: Arc<dyn ConversationRepository>,
    /// Video repository, including the status-overwrite primitive.
    pub videos: Arc<dyn VideoRepository>,
    /// Chat message repository (append-only turns).
    pub messages: Arc<dyn ChatMessageRepository>,
}

impl Database {
    /// Create a Database backed by PostgreSQL.
    pub fn postgres(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            rooms: Arc::new(PgRoomRepository::new(pool.clone())),
            conversations: Arc::new(PgConversationRepository::new(pool.clone())),
            videos: Arc::new(PgVideoRepository::new(pool.clone())),
            messages: Arc::new(PgChatMessageRepository::new(pool)),
        }
    }

    /// Create a Database backed by a shared in-memory store.
    pub fn memory() -> Self {
        let store = MemoryStore::new();
        Self {
            rooms: Arc::new(store.clone()),
            conversations: Arc::new(store.clone()),
            videos: Arc::new(store.clone()),
            messages: Arc::new(store),
        }
    }
}

/// Run pending schema migrations.
#[cfg(feature = "migrations")]
pub async fn run_migrations(pool: &sqlx::Pool<sqlx::Postgres>) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| Error::Config(format!("migration failed: {e}")))
}
