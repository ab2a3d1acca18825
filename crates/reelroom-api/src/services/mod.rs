//! Orchestration services sitting between the HTTP handlers and the
//! storage/collaborator seams.

pub mod chat_turn;

pub use chat_turn::ChatTurnOrchestrator;
