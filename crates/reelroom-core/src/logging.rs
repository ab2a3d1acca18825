//! Structured logging field name constants for reelroom.
//!
//! All crates use these constants for consistent structured logging fields
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration, high-volume data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "api", "db", "blob", "ingest", "inference"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "gateway", "chat_turn", "pool", "queue"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "create_video", "issue_download_url", "answer"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Tenant identifier scoping the operation.
pub const TENANT_ID: &str = "tenant_id";

/// Knowledge room identifier.
pub const ROOM_ID: &str = "room_id";

/// Conversation identifier.
pub const CONVERSATION_ID: &str = "conversation_id";

/// Video identifier.
pub const VIDEO_ID: &str = "video_id";

/// Chat message identifier.
pub const MESSAGE_ID: &str = "message_id";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of rows or items returned.
pub const RESULT_COUNT: &str = "result_count";

/// Number of prior turns handed to the inference collaborator.
pub const HISTORY_LEN: &str = "history_len";
