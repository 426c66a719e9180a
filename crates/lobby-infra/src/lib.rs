//! Infrastructure layer for Lobby.
//!
//! Implements the repository traits defined in `lobby-core` on SQLite, and
//! loads `lobby.toml` configuration.

pub mod config;
pub mod sqlite;
