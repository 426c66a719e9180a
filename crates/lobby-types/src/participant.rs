//! Participant types for the presence registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::sanitize::sanitize;

/// A named, currently-present chat session.
///
/// `last_seen` is refreshed by every status call; the sweep evicts
/// participants whose `last_seen` falls behind the staleness threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub name: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_seen: DateTime<Utc>,
}

impl Participant {
    pub fn new(name: impl Into<String>, last_seen: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            last_seen,
        }
    }
}

/// Request body for `POST /participants`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterParticipantRequest {
    #[serde(default)]
    pub name: String,
}

/// Sanitize a participant name (or identity header) and reject empty results.
pub fn validate_name(raw: &str) -> Result<String, ChatError> {
    let name = sanitize(raw);
    if name.is_empty() {
        return Err(ChatError::Validation("name cannot be empty".to_string()));
    }
    Ok(name)
}
