//! # reelroom-blob
//!
//! Object access gateway for reelroom.
//!
//! This crate provides:
//! - The `UrlSigner` seam for time-boxed (1 hour) upload/download URLs
//! - An HMAC-SHA256 signer implementation
//! - `ObjectGateway`, which namespaces object keys per tenant
//!   (`{tenant}/{key}`) and serves download URLs through a bounded,
//!   concurrency-safe LRU cache
//!
//! Clients upload directly against the issued URL; binaries never pass
//! through this process.

pub mod gateway;
pub mod signer;

pub use gateway::{ObjectGateway, DEFAULT_CACHE_CAPACITY};
pub use signer::{HmacUrlSigner, UrlSigner, URL_TTL_SECS};
