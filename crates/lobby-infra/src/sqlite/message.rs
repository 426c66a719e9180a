//! SQLite message repository implementation.
//!
//! History order is the `seq` column assigned on insert. The `time` column is
//! the display clock and is never used for ordering.

use lobby_core::repository::message::MessageRepository;
use lobby_types::error::RepositoryError;
use lobby_types::message::{Message, MessageKind};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `MessageRepository`.
#[derive(Clone)]
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Internal row type
// ---------------------------------------------------------------------------

struct MessageRow {
    id: String,
    from_name: String,
    to_name: String,
    text: String,
    kind: String,
    time: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            from_name: row.try_get("from_name")?,
            to_name: row.try_get("to_name")?,
            text: row.try_get("text")?,
            kind: row.try_get("kind")?,
            time: row.try_get("time")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let kind = self
            .kind
            .parse::<MessageKind>()
            .map_err(RepositoryError::Query)?;

        Ok(Message {
            id: parse_uuid(&self.id)?,
            from: self.from_name,
            to: self.to_name,
            text: self.text,
            kind,
            time: self.time,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_uuid(s: &str) -> Result<Uuid, RepositoryError> {
    s.parse::<Uuid>()
        .map_err(|e| RepositoryError::Query(format!("invalid UUID: {e}")))
}

fn decode(row: &sqlx::sqlite::SqliteRow) -> Result<Message, RepositoryError> {
    MessageRow::from_row(row)
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .into_message()
}

const SELECT_COLUMNS: &str = "SELECT id, from_name, to_name, text, kind, time FROM messages";

// ---------------------------------------------------------------------------
// MessageRepository impl
// ---------------------------------------------------------------------------

impl MessageRepository for SqliteMessageRepository {
    async fn insert(&self, message: &Message) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO messages (id, from_name, to_name, text, kind, time)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(message.id.to_string())
        .bind(&message.from)
        .bind(&message.to)
        .bind(&message.text)
        .bind(message.kind.to_string())
        .bind(&message.time)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn find(&self, id: &Uuid) -> Result<Option<Message>, RepositoryError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(decode).transpose()
    }

    async fn list_recent(&self) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY seq DESC"))
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(decode).collect()
    }

    async fn update_owned(&self, message: &Message) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE messages SET to_name = ?, text = ?, kind = ?, time = ?
               WHERE id = ? AND from_name = ? AND kind != 'status'"#,
        )
        .bind(&message.to)
        .bind(&message.text)
        .bind(message.kind.to_string())
        .bind(&message.time)
        .bind(message.id.to_string())
        .bind(&message.from)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_owned(&self, id: &Uuid, from: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM messages WHERE id = ? AND from_name = ? AND kind != 'status'",
        )
        .bind(id.to_string())
        .bind(from)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
