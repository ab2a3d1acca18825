//! HTTP handlers, one module per resource.

pub mod conversations;
pub mod messages;
pub mod rooms;
pub mod uploads;
pub mod videos;
