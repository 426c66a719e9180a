//! Shared domain types for Lobby.
//!
//! Participants, messages, configuration and the error types used across
//! the workspace, plus the markup sanitizer applied to user input.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror, regex.

pub mod config;
pub mod error;
pub mod message;
pub mod participant;
pub mod sanitize;
