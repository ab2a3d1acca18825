//! # reelroom-core
//!
//! Core types, traits, and abstractions for reelroom.
//!
//! This crate provides:
//! - Domain models for the four entity kinds (rooms, conversations,
//!   videos, chat messages) and the inference collaborator wire schemas
//! - The shared `Error`/`Result` taxonomy
//! - Repository and collaborator traits implemented by the storage,
//!   inference, and ingestion crates
//! - Random entity ID generation
//! - Structured logging field name constants

pub mod error;
pub mod ids;
pub mod logging;
pub mod models;
pub mod traits;

pub use error::{Error, Result};
pub use ids::{new_id, validate_id};
pub use models::*;
pub use traits::*;
