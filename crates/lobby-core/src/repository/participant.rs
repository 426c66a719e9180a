//! Participant repository trait definition.

use chrono::{DateTime, Utc};
use lobby_types::error::RepositoryError;
use lobby_types::participant::Participant;

/// Repository trait for the live participant registry.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait ParticipantRepository: Send + Sync {
    /// Insert a participant. Returns `Conflict` if the name is already taken;
    /// the uniqueness check and the insert are one atomic operation.
    fn insert(
        &self,
        participant: &Participant,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a participant by name.
    fn find(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<Participant>, RepositoryError>> + Send;

    /// List all live participants.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Participant>, RepositoryError>> + Send;

    /// Set `last_seen` for an existing participant. Returns `false` if no
    /// participant has that name.
    fn touch(
        &self,
        name: &str,
        last_seen: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Delete the participant only if its *stored* `last_seen` is at or
    /// before `cutoff`. Returns `true` if a row was removed.
    fn evict_if_stale(
        &self,
        name: &str,
        cutoff: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
