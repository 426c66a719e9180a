//! Chat message types and field validation.
//!
//! A message is either a broadcast (`to == "Todos"`), a private message
//! visible only to its sender and recipient, or a system-generated status
//! notification emitted when a participant joins or leaves.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ChatError;
use crate::sanitize::sanitize;

/// Recipient name addressing every participant.
pub const BROADCAST_RECIPIENT: &str = "Todos";

/// Kind of a chat message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (kind IN ('message', 'private_message', 'status'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Message,
    PrivateMessage,
    Status,
}

impl MessageKind {
    /// Whether participants may post or edit messages of this kind.
    ///
    /// `Status` messages are only created by registration and the sweep.
    pub fn is_user_postable(self) -> bool {
        !matches!(self, MessageKind::Status)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Message => write!(f, "message"),
            MessageKind::PrivateMessage => write!(f, "private_message"),
            MessageKind::Status => write!(f, "status"),
        }
    }
}

impl FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(MessageKind::Message),
            "private_message" => Ok(MessageKind::PrivateMessage),
            "status" => Ok(MessageKind::Status),
            other => Err(format!("invalid message type: '{other}'")),
        }
    }
}

/// A persisted chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// UUIDv7 message ID.
    pub id: Uuid,
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// Wall-clock stamp in `HH:MM:SS` (UTC).
    pub time: String,
}

impl Message {
    /// Build a broadcast status message on behalf of `name`.
    pub fn status(name: &str, text: String, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            from: name.to_string(),
            to: BROADCAST_RECIPIENT.to_string(),
            text,
            kind: MessageKind::Status,
            time: clock_time(at),
        }
    }

    /// The join notification appended when `name` registers.
    pub fn joined(name: &str, at: DateTime<Utc>) -> Self {
        Self::status(name, format!("{name} entra na sala..."), at)
    }

    /// The departure notification appended when the sweep evicts `name`.
    pub fn left(name: &str, at: DateTime<Utc>) -> Self {
        Self::status(name, format!("{name} sai da sala..."), at)
    }
}

/// Format a timestamp in the fixed textual clock format used by messages.
pub fn clock_time(at: DateTime<Utc>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Request body for posting or editing a message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageDraft {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, rename = "type", alias = "kind")]
    pub kind: String,
}

/// A draft whose fields have been sanitized and checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub to: String,
    pub text: String,
    pub kind: MessageKind,
}

impl MessageDraft {
    /// Sanitize `to` and `text`, then require both non-empty and a
    /// user-postable `kind`.
    pub fn validate(&self) -> Result<ValidDraft, ChatError> {
        let to = sanitize(&self.to);
        if to.is_empty() {
            return Err(ChatError::Validation("'to' cannot be empty".to_string()));
        }

        let text = sanitize(&self.text);
        if text.is_empty() {
            return Err(ChatError::Validation("'text' cannot be empty".to_string()));
        }

        let kind = self
            .kind
            .trim()
            .parse::<MessageKind>()
            .map_err(ChatError::Validation)?;
        if !kind.is_user_postable() {
            return Err(ChatError::Validation(format!(
                "message type '{kind}' cannot be posted"
            )));
        }

        Ok(ValidDraft { to, text, kind })
    }
}
