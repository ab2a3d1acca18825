//! Key-space model for the single sparse entity table.
//!
//! Four entity kinds share one table keyed by (PK, SK); this module is the
//! only place key strings are built or taken apart. IDs never contain the
//! `#` delimiter (see `reelroom_core::ids`), so extracting the trailing
//! segment of a key is unambiguous.

/// Sort key of a room's metadata row.
pub const METADATA_SK: &str = "METADATA";

/// SK prefix under which a room's conversations sort.
pub const CONVERSATION_SK_PREFIX: &str = "CONVERSATION#";

/// SK prefix under which a room's videos sort.
pub const VIDEO_SK_PREFIX: &str = "VIDEO#";

/// SK prefix under which a conversation's messages sort.
pub const MESSAGE_SK_PREFIX: &str = "MESSAGE#";

/// Entity-kind discriminators stored in the `entity_type` column.
pub const TYPE_ROOM: &str = "KnowledgeRoom";
pub const TYPE_CONVERSATION: &str = "Conversation";
pub const TYPE_VIDEO: &str = "Video";
pub const TYPE_CHAT_MESSAGE: &str = "ChatMessage";

/// Partition key of a room and everything directly inside it.
pub fn room_pk(room_id: &str) -> String {
    format!("ROOM#{room_id}")
}

/// Partition key of a conversation's message rows.
pub fn conversation_pk(room_id: &str, conversation_id: &str) -> String {
    format!("ROOM#{room_id}#CONVERSATION#{conversation_id}")
}

pub fn conversation_sk(conversation_id: &str) -> String {
    format!("{CONVERSATION_SK_PREFIX}{conversation_id}")
}

pub fn video_sk(video_id: &str) -> String {
    format!("{VIDEO_SK_PREFIX}{video_id}")
}

pub fn message_sk(message_id: &str) -> String {
    format!("{MESSAGE_SK_PREFIX}{message_id}")
}

/// Extract the entity ID from a key, i.e. the segment after the last `#`.
///
/// Works for both PKs (`ROOM#{id}`) and SKs (`VIDEO#{id}`); returns the
/// input unchanged when it carries no delimiter.
pub fn trailing_id(key: &str) -> &str {
    key.rsplit('#').next().unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_pk_shape() {
        assert_eq!(room_pk("abc123"), "ROOM#abc123");
    }

    #[test]
    fn test_conversation_pk_embeds_both_ids() {
        assert_eq!(conversation_pk("r1", "c1"), "ROOM#r1#CONVERSATION#c1");
    }

    #[test]
    fn test_sort_keys_carry_their_prefix() {
        assert_eq!(conversation_sk("c1"), "CONVERSATION#c1");
        assert_eq!(video_sk("v1"), "VIDEO#v1");
        assert_eq!(message_sk("m1"), "MESSAGE#m1");
    }

    #[test]
    fn test_trailing_id_from_pk_and_sk() {
        assert_eq!(trailing_id(&room_pk("r1")), "r1");
        assert_eq!(trailing_id(&video_sk("v1")), "v1");
        // Message PKs contain several '#'; the last segment is the one.
        assert_eq!(trailing_id(&conversation_pk("r1", "c1")), "c1");
        assert_eq!(trailing_id("METADATA"), "METADATA");
    }

    #[test]
    fn test_prefixes_are_disjoint() {
        // SK prefix scans must never bleed across entity kinds.
        assert!(!VIDEO_SK_PREFIX.starts_with(CONVERSATION_SK_PREFIX));
        assert!(!CONVERSATION_SK_PREFIX.starts_with(VIDEO_SK_PREFIX));
        assert!(!METADATA_SK.starts_with(VIDEO_SK_PREFIX));
    }
}
