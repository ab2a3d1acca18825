//! Conversation repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};

use reelroom_core::{new_id, Conversation, ConversationRepository, Error, Result};

use crate::keyspace::{self, CONVERSATION_SK_PREFIX, TYPE_CONVERSATION};

/// PostgreSQL implementation of ConversationRepository.
///
/// Conversations live under their room's partition: PK `ROOM#{roomId}`,
/// SK `CONVERSATION#{id}`, listed by SK prefix scan with a tenant filter.
pub struct PgConversationRepository {
    pool: Pool<Postgres>,
}

impl PgConversationRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PgConversationRepository {
    async fn create(&self, title: &str, room_id: &str, tenant_id: &str) -> Result<Conversation> {
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
        .bind(keyspace::room_pk(room_id))
        .bind(keyspace::conversation_sk(&id))
        .bind(TYPE_CONVERSATION)
        .bind(tenant_id)
        .bind(title)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(Conversation {
            id,
            title: title.to_string(),
            tenant_id: tenant_id.to_string(),
            created_at: now,
        })
    }

    async fn list_by_room(&self, room_id: &str, tenant_id: &str) -> Result<Vec<Conversation>> {
        let rows = sqlx::query(
            "SELECT sk, title, tenant_id, created_at
             FROM entity
             WHERE pk = $1 AND sk LIKE $2 AND tenant_id = $3
             ORDER BY created_at ASC",
        )
        .bind(keyspace::room_pk(room_id))
        .bind(format!("{CONVERSATION_SK_PREFIX}%"))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let sk: String = r.get("sk");
                Conversation {
                    id: keyspace::trailing_id(&sk).to_string(),
                    title: r.get::<Option<String>, _>("title").unwrap_or_default(),
                    tenant_id: r.get("tenant_id"),
                    created_at: r.get("created_at"),
                }
            })
            .collect())
    }
}
