//! Presence, sweep and message logic for Lobby.
//!
//! This crate defines the repository traits that the infrastructure layer
//! implements. It depends only on `lobby-types` -- never on `lobby-infra` or
//! any database crate.

pub mod repository;
pub mod service;
pub mod visibility;
