//! SQLite participant repository implementation.
//!
//! `last_seen` is stored as unix milliseconds so eviction can compare it
//! numerically inside a single conditional DELETE.

use chrono::{DateTime, Utc};
use lobby_core::repository::participant::ParticipantRepository;
use lobby_types::error::RepositoryError;
use lobby_types::participant::Participant;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ParticipantRepository`.
#[derive(Clone)]
pub struct SqliteParticipantRepository {
    pool: DatabasePool,
}

impl SqliteParticipantRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Internal row type
// ---------------------------------------------------------------------------

struct ParticipantRow {
    name: String,
    last_seen_ms: i64,
}

impl ParticipantRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            name: row.try_get("name")?,
            last_seen_ms: row.try_get("last_seen_ms")?,
        })
    }

    fn into_participant(self) -> Result<Participant, RepositoryError> {
        let last_seen = DateTime::<Utc>::from_timestamp_millis(self.last_seen_ms).ok_or_else(
            || RepositoryError::Query(format!("invalid last_seen_ms: {}", self.last_seen_ms)),
        )?;
        Ok(Participant::new(self.name, last_seen))
    }
}

fn decode(row: &sqlx::sqlite::SqliteRow) -> Result<Participant, RepositoryError> {
    ParticipantRow::from_row(row)
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .into_participant()
}

// ---------------------------------------------------------------------------
// ParticipantRepository impl
// ---------------------------------------------------------------------------

impl ParticipantRepository for SqliteParticipantRepository {
    async fn insert(&self, participant: &Participant) -> Result<(), RepositoryError> {
        let result = sqlx::query("INSERT INTO participants (name, last_seen_ms) VALUES (?, ?)")
            .bind(&participant.name)
            .bind(participant.last_seen.timestamp_millis())
            .execute(&self.pool.writer)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                RepositoryError::Conflict(format!("participant '{}' already exists", participant.name)),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn find(&self, name: &str) -> Result<Option<Participant>, RepositoryError> {
        let row = sqlx::query("SELECT name, last_seen_ms FROM participants WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(decode).transpose()
    }

    async fn list(&self) -> Result<Vec<Participant>, RepositoryError> {
        let rows = sqlx::query("SELECT name, last_seen_ms FROM participants ORDER BY name")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(decode).collect()
    }

    async fn touch(&self, name: &str, last_seen: DateTime<Utc>) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE participants SET last_seen_ms = ? WHERE name = ?")
            .bind(last_seen.timestamp_millis())
            .bind(name)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn evict_if_stale(
        &self,
        name: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM participants WHERE name = ? AND last_seen_ms <= ?")
            .bind(name)
            .bind(cutoff.timestamp_millis())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
