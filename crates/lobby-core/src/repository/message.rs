//! Message repository trait definition.

use lobby_types::error::RepositoryError;
use lobby_types::message::Message;
use uuid::Uuid;

/// Repository trait for chat message persistence.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait MessageRepository: Send + Sync {
    /// Append a message to the history.
    fn insert(
        &self,
        message: &Message,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a message by ID.
    fn find(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Message>, RepositoryError>> + Send;

    /// The full history, most recent first (insertion order, not clock text).
    fn list_recent(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Overwrite `to`, `text`, `kind` and `time` of the message with
    /// `message.id`, but only if it was authored by `message.from` and is not
    /// a status message. Returns `true` if a row changed.
    fn update_owned(
        &self,
        message: &Message,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Delete the message if it was authored by `from` and is not a status
    /// message. Returns `true` if a row was removed.
    fn delete_owned(
        &self,
        id: &Uuid,
        from: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
