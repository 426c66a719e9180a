//! In-memory repositories for service tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use lobby_types::error::RepositoryError;
use lobby_types::message::{Message, MessageKind};
use lobby_types::participant::Participant;
use uuid::Uuid;

use super::message::MessageRepository;
use super::participant::ParticipantRepository;

#[derive(Clone, Default)]
pub(crate) struct MemoryParticipants {
    rows: Arc<Mutex<Vec<Participant>>>,
    failing: Arc<AtomicBool>,
    list_calls: Arc<AtomicUsize>,
}

impl MemoryParticipants {
    /// Make every subsequent call fail with a query error.
    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Seed a participant with an arbitrary `last_seen`.
    pub(crate) fn seed(&self, name: &str, last_seen: DateTime<Utc>) {
        self.rows
            .lock()
            .unwrap()
            .push(Participant::new(name, last_seen));
    }

    pub(crate) fn names(&self) -> Vec<String> {
        self.rows.lock().unwrap().iter().map(|p| p.name.clone()).collect()
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RepositoryError::Query("store unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl ParticipantRepository for MemoryParticipants {
    async fn insert(&self, participant: &Participant) -> Result<(), RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|p| p.name == participant.name) {
            return Err(RepositoryError::Conflict(participant.name.clone()));
        }
        rows.push(participant.clone());
        Ok(())
    }

    async fn find(&self, name: &str) -> Result<Option<Participant>, RepositoryError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().iter().find(|p| p.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Participant>, RepositoryError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn touch(&self, name: &str, last_seen: DateTime<Utc>) -> Result<bool, RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|p| p.name == name) {
            Some(p) => {
                p.last_seen = last_seen;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn evict_if_stale(
        &self,
        name: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| !(p.name == name && p.last_seen <= cutoff));
        Ok(rows.len() < before)
    }
}

#[derive(Clone, Default)]
pub(crate) struct MemoryMessages {
    /// Oldest first; `list_recent` reverses.
    rows: Arc<Mutex<Vec<Message>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryMessages {
    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn all(&self) -> Vec<Message> {
        self.rows.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RepositoryError::Query("store unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl MessageRepository for MemoryMessages {
    async fn insert(&self, message: &Message) -> Result<(), RepositoryError> {
        self.check()?;
        self.rows.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn find(&self, id: &Uuid) -> Result<Option<Message>, RepositoryError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().iter().find(|m| m.id == *id).cloned())
    }

    async fn list_recent(&self) -> Result<Vec<Message>, RepositoryError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().iter().rev().cloned().collect())
    }

    async fn update_owned(&self, message: &Message) -> Result<bool, RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|m| {
            m.id == message.id && m.from == message.from && m.kind != MessageKind::Status
        }) else {
            return Ok(false);
        };
        row.to = message.to.clone();
        row.text = message.text.clone();
        row.kind = message.kind;
        row.time = message.time.clone();
        Ok(true)
    }

    async fn delete_owned(&self, id: &Uuid, from: &str) -> Result<bool, RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| !(m.id == *id && m.from == from && m.kind != MessageKind::Status));
        Ok(rows.len() < before)
    }
}
