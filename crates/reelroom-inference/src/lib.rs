//! # reelroom-inference
//!
//! Inference collaborator boundary for reelroom.
//!
//! This crate provides:
//! - `HttpChatBackend`: the synchronous request/response HTTP channel to
//!   the external inference collaborator, with an explicit timeout
//! - `MockChatBackend` (feature `mock`): deterministic backend for tests
//!
//! The `ChatBackend` trait itself lives in `reelroom-core` so the
//! orchestrator depends only on the seam.

pub mod http;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use reelroom_core::*;

pub use http::{HttpChatBackend, DEFAULT_TIMEOUT_SECS};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockChatBackend;
