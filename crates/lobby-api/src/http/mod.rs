//! HTTP/REST API layer for Lobby.
//!
//! Axum routes at the root path with envelope responses and permissive CORS.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
