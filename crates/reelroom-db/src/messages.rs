//! Chat message repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use sqlx::{Pool, Postgres, Row};

use reelroom_core::{
    validate_id, ChatMessage, ChatMessageRepository, CreateChatMessageRequest, Error,
    RelatedDocument, Result,
};

use crate::keyspace::{self, MESSAGE_SK_PREFIX, TYPE_CHAT_MESSAGE};

/// PostgreSQL implementation of ChatMessageRepository.
///
/// Message rows are append-only, two per chat turn (user utterance and
/// generated answer), partitioned under the composite
/// `ROOM#{roomId}#CONVERSATION#{convId}` key. Order within a conversation
/// is defined by `created_at`, not by insertion order or ID value.
pub struct PgChatMessageRepository {
    pool: Pool<Postgres>,
}

impl PgChatMessageRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatMessageRepository for PgChatMessageRepository {
    async fn create(&self, req: CreateChatMessageRequest) -> Result<ChatMessage> {
        // Caller-supplied ID; a '#' would change the key's shape.
        validate_id(&req.id)?;
        let now = Utc::now();

        let attrs = json!({
            "content": req.content,
            "is_user_turn": req.is_user_turn,
            "citations": req.citations,
        });

        sqlx::query(
            "INSERT INTO entity (pk, sk, entity_type, tenant_id, attrs, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (pk, sk) DO UPDATE
                 SET entity_type = EXCLUDED.entity_type,
                     tenant_id   = EXCLUDED.tenant_id,
                     attrs       = EXCLUDED.attrs,
                     created_at  = EXCLUDED.created_at",
        )
        .bind(keyspace::conversation_pk(&req.room_id, &req.conversation_id))
        .bind(keyspace::message_sk(&req.id))
        .bind(TYPE_CHAT_MESSAGE)
        .bind(&req.tenant_id)
        .bind(&attrs)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(ChatMessage {
            id: req.id,
            content: req.content,
            is_user_turn: req.is_user_turn,
            citations: req.citations,
            tenant_id: req.tenant_id,
            created_at: now,
        })
    }

    async fn list_by_conversation(
        &self,
        room_id: &str,
        conversation_id: &str,
        tenant_id: &str,
    ) -> Result<Vec<ChatMessage>> {
        // Ascending created_at keeps the conversation flow; sk breaks the
        // tie for turns persisted within the same timestamp tick.
        let rows = sqlx::query(
            "SELECT sk, tenant_id, attrs, created_at
             FROM entity
             WHERE pk = $1 AND sk LIKE $2 AND tenant_id = $3
             ORDER BY created_at ASC, sk ASC",
        )
        .bind(keyspace::conversation_pk(room_id, conversation_id))
        .bind(format!("{MESSAGE_SK_PREFIX}%"))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let sk: String = r.get("sk");
                let attrs: serde_json::Value = r.get("attrs");
                let citations: Vec<RelatedDocument> =
                    serde_json::from_value(attrs["citations"].clone()).unwrap_or_default();
                ChatMessage {
                    id: keyspace::trailing_id(&sk).to_string(),
                    content: attrs["content"].as_str().unwrap_or_default().into(),
                    is_user_turn: attrs["is_user_turn"].as_bool().unwrap_or(false),
                    citations,
                    tenant_id: r.get("tenant_id"),
                    created_at: r.get("created_at"),
                }
            })
            .collect())
    }
}
