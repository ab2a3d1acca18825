//! Chat turn orchestration.
//!
//! A turn is: load history, persist the user's message, ask the inference
//! collaborator, persist the answer with its citations. The user's message
//! is persisted before the collaborator is called, so a failed turn still
//! leaves exactly one new row — the user's own message — and the caller
//! gets the single generation error rather than internal detail.

use std::sync::Arc;

use tracing::{info, warn};

use reelroom_core::{
    ids, ChatBackend, ChatMessage, ChatTurnRequest, CreateChatMessageRequest, Error,
    HistoryEntry, RelatedDocument, Result, CHAT_TURN_SCHEMA,
};
use reelroom_db::Database;

pub struct ChatTurnOrchestrator {
    db: Database,
    chat: Arc<dyn ChatBackend>,
}

impl ChatTurnOrchestrator {
    pub fn new(db: Database, chat: Arc<dyn ChatBackend>) -> Self {
        Self { db, chat }
    }

    /// Execute one full chat turn and return the persisted answer row.
    ///
    /// `user_message_id` is caller-supplied and used verbatim, so a
    /// double-submitted turn overwrites its own user row instead of
    /// duplicating it. The answer row always gets a fresh ID.
    pub async fn run(
        &self,
        tenant_id: &str,
        room_id: &str,
        conversation_id: &str,
        user_message_id: &str,
        message: &str,
    ) -> Result<ChatMessage> {
        // History is handed to the collaborator most recent first. A
        // history read failure aborts the turn before anything is written.
        let history = self
            .db
            .messages
            .list_by_conversation(room_id, conversation_id, tenant_id)
            .await
            .map_err(|e| {
                warn!(
                    subsystem = "chat",
                    op = "load_history",
                    conversation_id,
                    error = %e,
                    "History load failed, aborting turn"
                );
                Error::Generation
            })?;

        let mut framed: Vec<HistoryEntry> = history
            .iter()
            .map(|m| HistoryEntry {
                content: m.content.clone(),
                is_user_message: m.is_user_turn,
                created_at: m.created_at,
            })
            .collect();
        framed.reverse();

        // The user's message is durable even if generation fails.
        let user_row = self
            .db
            .messages
            .create(CreateChatMessageRequest {
                id: user_message_id.to_string(),
                content: message.to_string(),
                citations: Vec::new(),
                is_user_turn: true,
                room_id: room_id.to_string(),
                conversation_id: conversation_id.to_string(),
                tenant_id: tenant_id.to_string(),
            })
            .await?;

        let response = self
            .chat
            .answer(ChatTurnRequest {
                schema: CHAT_TURN_SCHEMA.to_string(),
                tenant_id: tenant_id.to_string(),
                room_id: room_id.to_string(),
                message: message.to_string(),
                history: framed,
            })
            .await
            .map_err(|e| {
                warn!(
                    subsystem = "chat",
                    op = "generate",
                    conversation_id,
                    error = %e,
                    "Generation failed after user message was persisted"
                );
                Error::Generation
            })?;

        let answer_row = self
            .db
            .messages
            .create(CreateChatMessageRequest {
                id: ids::new_id(),
                content: response.answer,
                citations: response
                    .citations
                    .into_iter()
                    .map(RelatedDocument::from)
                    .collect(),
                is_user_turn: false,
                room_id: room_id.to_string(),
                conversation_id: conversation_id.to_string(),
                tenant_id: tenant_id.to_string(),
            })
            .await
            .map_err(|e| {
                warn!(
                    subsystem = "chat",
                    op = "persist_answer",
                    conversation_id,
                    error = %e,
                    "Answer persist failed"
                );
                Error::Generation
            })?;

        info!(
            subsystem = "chat",
            op = "turn",
            conversation_id,
            user_message_id = %user_row.id,
            answer_id = %answer_row.id,
            citations = answer_row.citations.len(),
            "Chat turn completed"
        );

        Ok(answer_row)
    }
}
