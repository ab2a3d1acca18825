//! Room repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};

use reelroom_core::{new_id, Error, Result, Room, RoomRepository};

use crate::keyspace::{self, METADATA_SK, TYPE_ROOM};

/// PostgreSQL implementation of RoomRepository.
///
/// A room is one metadata row: PK `ROOM#{id}`, SK `METADATA`. Creation is
/// an unconditional put (upsert on the primary key), last write wins.
pub struct PgRoomRepository {
    pool: Pool<Postgres>,
}

impl PgRoomRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    async fn create(&self, title: &str, tenant_id: &str) -> Result<Room> {
        let id = new_id();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO entity (pk, sk, entity_type, tenant_id, title, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (pk, sk) DO UPDATE
                 SET entity_type = EXCLUDED.entity_type,
                     tenant_id   = EXCLUDED.tenant_id,
                     title       = EXCLUDED.title,
                     created_at  = EXCLUDED.created_at",
        )
        .bind(keyspace::room_pk(&id))
        .bind(METADATA_SK)
        .bind(TYPE_ROOM)
        .bind(tenant_id)
        .bind(title)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(Room {
            id,
            title: title.to_string(),
            tenant_id: tenant_id.to_string(),
            created_at: now,
        })
    }

    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Room>> {
        // Tenant-wide listing goes through the (tenant_id, entity_type)
        // secondary index, never through key guessing.
        let rows = sqlx::query(
            "SELECT pk, title, tenant_id, created_at
             FROM entity
             WHERE tenant_id = $1 AND entity_type = $2
             ORDER BY created_at DESC",
        )
        .bind(tenant_id)
        .bind(TYPE_ROOM)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let pk: String = r.get("pk");
                Room {
                    id: keyspace::trailing_id(&pk).to_string(),
                    title: r.get::<Option<String>, _>("title").unwrap_or_default(),
                    tenant_id: r.get("tenant_id"),
                    created_at: r.get("created_at"),
                }
            })
            .collect())
    }
}
