//! Repository trait definitions (ports).
//!
//! These traits define the record store that the infrastructure layer
//! (lobby-infra) implements. The core crate never depends on any specific
//! storage technology.
//!
//! Every mutating method is a single conditional statement against the
//! store, so callers never need a read-then-write sequence to keep the
//! registry or message ownership consistent.

pub mod message;
pub mod participant;

#[cfg(test)]
pub(crate) mod memory;
