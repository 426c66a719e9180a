//! Use cases over the repository ports.
//!
//! Services hold their repositories by value and never touch a concrete
//! store; the infrastructure crate supplies SQLite implementations.

pub mod message;
pub mod presence;
pub mod sweep;
