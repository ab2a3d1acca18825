//! In-memory implementation of the storage access layer.
//!
//! Backs the same repository traits as the Postgres implementation with a
//! process-local map keyed by (PK, SK), so orchestration code and API
//! handlers can be exercised without a database. Also usable as a
//! throwaway local-dev backend. Tenant filtering and key semantics match
//! the Postgres layer exactly.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use reelroom_core::{
    new_id, validate_id, ChatMessage, ChatMessageRepository, Conversation,
    ConversationRepository, CreateChatMessageRequest, CreateVideoRequest, Error, Result, Room,
    RoomRepository, Video, VideoRepository, VideoStatus,
};

use crate::keyspace::{self, METADATA_SK};

#[derive(Clone)]
enum StoredRow {
    Room(Room),
    Conversation(Conversation),
    Video(Video),
    Message(ChatMessage),
}

/// Shared in-memory entity table.
#[derive(Clone, Default)]
pub struct MemoryStore {
    rows: Arc<RwLock<BTreeMap<(String, String), StoredRow>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn put(&self, pk: String, sk: String, row: StoredRow) {
        // Unconditional put, last write wins — same as the table upsert.
        self.rows
            .write()
            .expect("memory store lock poisoned")
            .insert((pk, sk), row);
    }
}

#[async_trait]
impl RoomRepository for MemoryStore {
    async fn create(&self, title: &str, tenant_id: &str) -> Result<Room> {
        let room = Room {
            id: new_id(),
            title: title.to_string(),
            tenant_id: tenant_id.to_string(),
            created_at: Utc::now(),
        };
        self.put(
            keyspace::room_pk(&room.id),
            METADATA_SK.to_string(),
            StoredRow::Room(room.clone()),
        );
        Ok(room)
    }

    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Room>> {
        let rows = self.rows.read().expect("memory store lock poisoned");
        let mut rooms: Vec<Room> = rows
            .values()
            .filter_map(|row| match row {
                StoredRow::Room(r) if r.tenant_id == tenant_id => Some(r.clone()),
                _ => None,
            })
            .collect();
        rooms.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rooms)
    }
}

#[async_trait]
impl ConversationRepository for MemoryStore {
    async fn create(&self, title: &str, room_id: &str, tenant_id: &str) -> Result<Conversation> {
        let conversation = Conversation {
            id: new_id(),
            title: title.to_string(),
            tenant_id: tenant_id.to_string(),
            created_at: Utc::now(),
        };
        self.put(
            keyspace::room_pk(room_id),
            keyspace::conversation_sk(&conversation.id),
            StoredRow::Conversation(conversation.clone()),
        );
        Ok(conversation)
    }

    async fn list_by_room(&self, room_id: &str, tenant_id: &str) -> Result<Vec<Conversation>> {
        let pk = keyspace::room_pk(room_id);
        let rows = self.rows.read().expect("memory store lock poisoned");
        let mut conversations: Vec<Conversation> = rows
            .iter()
            .filter(|((row_pk, _), _)| *row_pk == pk)
            .filter_map(|(_, row)| match row {
                StoredRow::Conversation(c) if c.tenant_id == tenant_id => Some(c.clone()),
                _ => None,
            })
            .collect();
        conversations.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(conversations)
    }
}

#[async_trait]
impl VideoRepository for MemoryStore {
    async fn create(&self, req: CreateVideoRequest) -> Result<Video> {
        validate_id(&req.id)?;
        let video = Video {
            id: req.id,
            title: req.title,
            duration: req.duration,
            preview_image: req.preview_image,
            object_key: req.object_key,
            mime_type: req.mime_type,
            status: VideoStatus::TranscriptionCreating,
            tenant_id: req.tenant_id,
            created_at: Utc::now(),
            download_url: None,
        };
        self.put(
            keyspace::room_pk(&req.room_id),
            keyspace::video_sk(&video.id),
            StoredRow::Video(video.clone()),
        );
        Ok(video)
    }

    async fn list_by_room(&self, room_id: &str, tenant_id: &str) -> Result<Vec<Video>> {
        let pk = keyspace::room_pk(room_id);
        let rows = self.rows.read().expect("memory store lock poisoned");
        let mut videos: Vec<Video> = rows
            .iter()
            .filter(|((row_pk, _), _)| *row_pk == pk)
            .filter_map(|(_, row)| match row {
                StoredRow::Video(v) if v.tenant_id == tenant_id => Some(v.clone()),
                _ => None,
            })
            .collect();
        videos.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(videos)
    }

    async fn update_status(
        &self,
        video_id: &str,
        room_id: &str,
        tenant_id: &str,
        new_status: VideoStatus,
    ) -> Result<()> {
        let key = (keyspace::room_pk(room_id), keyspace::video_sk(video_id));
        let mut rows = self.rows.write().expect("memory store lock poisoned");
        match rows.get_mut(&key) {
            Some(StoredRow::Video(video)) if video.tenant_id == tenant_id => {
                // Blind overwrite, matching the Postgres layer; a video
                // belonging to another tenant is indistinguishable from a
                // missing one.
                video.status = new_status;
                Ok(())
            }
            _ => Err(Error::NotFound(format!(
                "video {video_id} in room {room_id}"
            ))),
        }
    }
}

#[async_trait]
impl ChatMessageRepository for MemoryStore {
    async fn create(&self, req: CreateChatMessageRequest) -> Result<ChatMessage> {
        validate_id(&req.id)?;
        let message = ChatMessage {
            id: req.id,
            content: req.content,
            is_user_turn: req.is_user_turn,
            citations: req.citations,
            tenant_id: req.tenant_id,
            created_at: Utc::now(),
        };
        self.put(
            keyspace::conversation_pk(&req.room_id, &req.conversation_id),
            keyspace::message_sk(&message.id),
            StoredRow::Message(message.clone()),
        );
        Ok(message)
    }

    async fn list_by_conversation(
        &self,
        room_id: &str,
        conversation_id: &str,
        tenant_id: &str,
    ) -> Result<Vec<ChatMessage>> {
        let pk = keyspace::conversation_pk(room_id, conversation_id);
        let rows = self.rows.read().expect("memory store lock poisoned");
        let mut messages: Vec<(String, ChatMessage)> = rows
            .iter()
            .filter(|((row_pk, _), _)| *row_pk == pk)
            .filter_map(|((_, sk), row)| match row {
                StoredRow::Message(m) if m.tenant_id == tenant_id => {
                    Some((sk.clone(), m.clone()))
                }
                _ => None,
            })
            .collect();
        messages.sort_by(|(sk_a, a), (sk_b, b)| {
            a.created_at.cmp(&b.created_at).then_with(|| sk_a.cmp(sk_b))
        });
        Ok(messages.into_iter().map(|(_, m)| m).collect())
    }
}
