//! Presence registry service.
//!
//! Registers participants, refreshes their `last_seen` stamp and runs the
//! eviction pass used by the sweep scheduler. Join and departure events are
//! appended to the message history as broadcast status messages.

use chrono::{DateTime, TimeDelta, Utc};
use lobby_types::error::{ChatError, RepositoryError};
use lobby_types::message::Message;
use lobby_types::participant::{Participant, validate_name};

use crate::repository::message::MessageRepository;
use crate::repository::participant::ParticipantRepository;

/// Outcome of one eviction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Participants in the snapshot.
    pub scanned: usize,
    /// Names removed during this pass, in snapshot order.
    pub evicted: Vec<String>,
}

/// Service managing the participant lifecycle: `Active` until evicted.
///
/// Stateless over its repositories; every decision is re-checked against the
/// store rather than a cached copy.
pub struct PresenceService<P: ParticipantRepository, M: MessageRepository> {
    participants: P,
    messages: M,
    stale_after: TimeDelta,
}

impl<P: ParticipantRepository, M: MessageRepository> PresenceService<P, M> {
    /// Create a new PresenceService.
    ///
    /// - `stale_after`: gap since the last refresh at which a participant
    ///   becomes eligible for eviction
    pub fn new(participants: P, messages: M, stale_after: std::time::Duration) -> Self {
        Self {
            participants,
            messages,
            stale_after: TimeDelta::from_std(stale_after).unwrap_or(TimeDelta::MAX),
        }
    }

    /// Register a new participant and announce the join.
    ///
    /// The participant insert is atomic (insert-if-absent). The join message
    /// is best-effort: if it cannot be written the registration still stands.
    pub async fn register(&self, raw_name: &str) -> Result<Participant, ChatError> {
        let name = validate_name(raw_name)?;
        let now = Utc::now();
        let participant = Participant::new(name, now);

        self.participants
            .insert(&participant)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => ChatError::Conflict(participant.name.clone()),
                other => ChatError::from(other),
            })?;

        tracing::info!(name = %participant.name, "participant registered");

        if let Err(e) = self
            .messages
            .insert(&Message::joined(&participant.name, now))
            .await
        {
            tracing::warn!(name = %participant.name, error = %e, "failed to record join message");
        }

        Ok(participant)
    }

    /// Mark a participant as present now.
    pub async fn refresh(&self, name: &str) -> Result<(), ChatError> {
        let touched = self.participants.touch(name, Utc::now()).await?;
        if !touched {
            return Err(ChatError::NotFound(format!("participant '{name}'")));
        }
        tracing::trace!(name, "presence refreshed");
        Ok(())
    }

    /// All live participants.
    pub async fn list_all(&self) -> Result<Vec<Participant>, ChatError> {
        Ok(self.participants.list().await?)
    }

    /// Look up a live participant by name.
    pub async fn find(&self, name: &str) -> Result<Option<Participant>, ChatError> {
        Ok(self.participants.find(name).await?)
    }

    /// Participants whose `last_seen` is at least the staleness threshold
    /// behind `now`.
    pub async fn list_stale(&self, now: DateTime<Utc>) -> Result<Vec<Participant>, ChatError> {
        let cutoff = self.cutoff(now);
        Ok(self
            .participants
            .list()
            .await?
            .into_iter()
            .filter(|p| p.last_seen <= cutoff)
            .collect())
    }

    fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.stale_after)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Run one eviction pass as of `now`.
    ///
    /// Candidates come from a snapshot, but each removal is a conditional
    /// delete against the stored `last_seen`, so a participant refreshed after
    /// the snapshot is kept. Exactly one departure message is appended per
    /// participant actually removed.
    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<SweepReport, ChatError> {
        let cutoff = self.cutoff(now);
        let snapshot = self.participants.list().await?;

        let mut report = SweepReport {
            scanned: snapshot.len(),
            evicted: Vec::new(),
        };

        for participant in snapshot.into_iter().filter(|p| p.last_seen <= cutoff) {
            let removed = self
                .participants
                .evict_if_stale(&participant.name, cutoff)
                .await?;
            if !removed {
                tracing::debug!(name = %participant.name, "refreshed since snapshot, kept");
                continue;
            }

            if let Err(e) = self
                .messages
                .insert(&Message::left(&participant.name, now))
                .await
            {
                tracing::error!(
                    name = %participant.name,
                    error = %e,
                    "participant evicted but departure message was not recorded"
                );
            }

            tracing::info!(name = %participant.name, "participant evicted");
            report.evicted.push(participant.name);
        }

        Ok(report)
    }
}
