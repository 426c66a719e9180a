//! Message store adapter.
//!
//! Validates and sanitizes message fields, checks that the sender is a live
//! participant, applies the visibility rule on reads and restricts edits and
//! deletes to the original author.

use chrono::Utc;
use lobby_types::error::ChatError;
use lobby_types::message::{Message, MessageDraft, MessageKind, clock_time};
use uuid::Uuid;

use crate::repository::message::MessageRepository;
use crate::repository::participant::ParticipantRepository;
use crate::visibility::visible_history;

/// Service for posting, listing, editing and deleting messages.
pub struct MessageService<P: ParticipantRepository, M: MessageRepository> {
    participants: P,
    messages: M,
}

impl<P: ParticipantRepository, M: MessageRepository> MessageService<P, M> {
    pub fn new(participants: P, messages: M) -> Self {
        Self {
            participants,
            messages,
        }
    }

    /// Post a new message from `from`.
    ///
    /// The sender check and the insert are separate store calls; a sweep
    /// eviction landing in between still lets this one message through.
    pub async fn post(&self, from: &str, draft: &MessageDraft) -> Result<Message, ChatError> {
        let valid = draft.validate()?;
        self.ensure_live_sender(from).await?;

        let message = Message {
            id: Uuid::now_v7(),
            from: from.to_string(),
            to: valid.to,
            text: valid.text,
            kind: valid.kind,
            time: clock_time(Utc::now()),
        };
        self.messages.insert(&message).await?;

        tracing::debug!(id = %message.id, from, kind = %message.kind, "message posted");
        Ok(message)
    }

    /// Messages visible to `requester`, most recent first, at most `limit`.
    pub async fn list(
        &self,
        requester: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Message>, ChatError> {
        if limit == Some(0) {
            return Err(ChatError::Validation(
                "limit must be a positive integer".to_string(),
            ));
        }
        let history = self.messages.list_recent().await?;
        Ok(visible_history(history, requester, limit))
    }

    /// Replace the fields of a message authored by `from`.
    ///
    /// Ownership is checked before sender liveness, so a caller who is not
    /// the author gets `Forbidden` whether or not they are registered.
    pub async fn edit(
        &self,
        id: &Uuid,
        from: &str,
        draft: &MessageDraft,
    ) -> Result<Message, ChatError> {
        let valid = draft.validate()?;
        self.ensure_owned(id, from).await?;
        self.ensure_live_sender(from).await?;

        let message = Message {
            id: *id,
            from: from.to_string(),
            to: valid.to,
            text: valid.text,
            kind: valid.kind,
            time: clock_time(Utc::now()),
        };

        if !self.messages.update_owned(&message).await? {
            return Err(self.classify_rejection(id, from).await?);
        }

        tracing::debug!(%id, from, "message edited");
        Ok(message)
    }

    /// Delete a message authored by `from`.
    pub async fn delete(&self, id: &Uuid, from: &str) -> Result<(), ChatError> {
        if !self.messages.delete_owned(id, from).await? {
            return Err(self.classify_rejection(id, from).await?);
        }

        tracing::debug!(%id, from, "message deleted");
        Ok(())
    }

    async fn ensure_live_sender(&self, from: &str) -> Result<(), ChatError> {
        match self.participants.find(from).await? {
            Some(_) => Ok(()),
            None => Err(ChatError::UnknownSender(from.to_string())),
        }
    }

    async fn ensure_owned(&self, id: &Uuid, from: &str) -> Result<(), ChatError> {
        match self.messages.find(id).await? {
            None => Err(ChatError::NotFound(format!("message {id}"))),
            Some(m) if m.from != from || m.kind == MessageKind::Status => {
                Err(ChatError::Forbidden(from.to_string()))
            }
            Some(_) => Ok(()),
        }
    }

    /// Explain why a conditional update/delete touched nothing: either the
    /// message is gone, or it belongs to someone else (or is a status message).
    async fn classify_rejection(&self, id: &Uuid, from: &str) -> Result<ChatError, ChatError> {
        Ok(match self.messages.find(id).await? {
            None => ChatError::NotFound(format!("message {id}")),
            Some(_) => ChatError::Forbidden(from.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::repository::memory::{MemoryMessages, MemoryParticipants};

    fn draft(to: &str, text: &str, kind: &str) -> MessageDraft {
        MessageDraft {
            to: to.to_string(),
            text: text.to_string(),
            kind: kind.to_string(),
        }
    }

    fn service(
        live: &[&str],
    ) -> (MessageService<MemoryParticipants, MemoryMessages>, MemoryMessages) {
        let participants = MemoryParticipants::default();
        for name in live {
            participants.seed(name, Utc::now());
        }
        let messages = MemoryMessages::default();
        (MessageService::new(participants, messages.clone()), messages)
    }

    #[tokio::test]
    async fn test_post_sanitizes_and_stamps() {
        let (svc, messages) = service(&["Ana"]);

        let msg = svc
            .post("Ana", &draft("Todos", "<script>x()</script><b>hi</b>", "message"))
            .await
            .unwrap();
        assert_eq!(msg.text, "hi");
        assert_eq!(msg.from, "Ana");
        assert_eq!(msg.time.len(), 8);
        assert_eq!(messages.all(), vec![msg]);
    }

    #[tokio::test]
    async fn test_post_unknown_sender() {
        let (svc, messages) = service(&["Ana"]);
        let err = svc
            .post("Mallory", &draft("Todos", "hi", "message"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::UnknownSender(ref n) if n == "Mallory"));
        assert!(messages.all().is_empty());
    }

    #[tokio::test]
    async fn test_post_validation_precedes_sender_check() {
        let (svc, _) = service(&[]);
        let err = svc
            .post("Mallory", &draft("Todos", "hi", "status"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
    }

    #[tokio::test]
    async fn test_private_message_visibility_example() {
        let (svc, _) = service(&["Ana", "Bob", "Carol"]);
        svc.post("Ana", &draft("Todos", "hi", "message")).await.unwrap();
        svc.post("Bob", &draft("Ana", "psst", "private_message"))
            .await
            .unwrap();

        let carol = svc.list("Carol", None).await.unwrap();
        assert_eq!(carol.len(), 1);
        assert_eq!(carol[0].text, "hi");

        for requester in ["Ana", "Bob"] {
            let seen = svc.list(requester, None).await.unwrap();
            assert_eq!(seen.len(), 2);
            assert_eq!(seen[0].text, "psst", "most recent first");
            assert_eq!(seen[0].kind, MessageKind::PrivateMessage);
        }
    }

    #[tokio::test]
    async fn test_list_limit_counts_visible_only() {
        let (svc, _) = service(&["Ana", "Bob"]);
        for i in 0..3 {
            svc.post("Ana", &draft("Todos", &format!("m{i}"), "message"))
                .await
                .unwrap();
        }
        for i in 0..3 {
            svc.post("Bob", &draft("Ana", &format!("p{i}"), "private_message"))
                .await
                .unwrap();
        }

        let seen = svc.list("Carol", Some(2)).await.unwrap();
        let texts: Vec<&str> = seen.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["m2", "m1"]);
    }

    #[tokio::test]
    async fn test_list_zero_limit_rejected() {
        let (svc, _) = service(&[]);
        assert!(matches!(
            svc.list("Ana", Some(0)).await,
            Err(ChatError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_edit_by_author() {
        let (svc, messages) = service(&["Ana"]);
        let original = svc.post("Ana", &draft("Todos", "hi", "message")).await.unwrap();

        let edited = svc
            .edit(&original.id, "Ana", &draft("Bob", "<em>hello</em> Bob", "private_message"))
            .await
            .unwrap();
        assert_eq!(edited.id, original.id);
        assert_eq!(edited.text, "hello Bob");

        let stored = &messages.all()[0];
        assert_eq!(stored.to, "Bob");
        assert_eq!(stored.text, "hello Bob");
        assert_eq!(stored.kind, MessageKind::PrivateMessage);
    }

    #[tokio::test]
    async fn test_edit_by_other_is_forbidden() {
        let (svc, messages) = service(&["Ana", "Bob"]);
        let original = svc.post("Ana", &draft("Todos", "hi", "message")).await.unwrap();

        let err = svc
            .edit(&original.id, "Bob", &draft("Todos", "hijacked", "message"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Forbidden(_)));
        assert_eq!(messages.all()[0].text, "hi");
    }

    #[tokio::test]
    async fn test_edit_by_unregistered_other_is_forbidden() {
        let (svc, messages) = service(&["Ana"]);
        let original = svc.post("Ana", &draft("Todos", "hi", "message")).await.unwrap();

        let err = svc
            .edit(&original.id, "Mallory", &draft("Todos", "hijacked", "message"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Forbidden(ref n) if n == "Mallory"));
        assert_eq!(messages.all()[0].text, "hi");
    }

    #[tokio::test]
    async fn test_edit_by_evicted_author_is_unknown_sender() {
        let participants = MemoryParticipants::default();
        participants.seed("Ana", Utc::now());
        let messages = MemoryMessages::default();
        let svc = MessageService::new(participants.clone(), messages.clone());
        let original = svc.post("Ana", &draft("Todos", "hi", "message")).await.unwrap();

        participants.evict_if_stale("Ana", Utc::now()).await.unwrap();

        let err = svc
            .edit(&original.id, "Ana", &draft("Todos", "late", "message"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::UnknownSender(_)));
        assert_eq!(messages.all()[0].text, "hi");
    }

    #[tokio::test]
    async fn test_edit_missing_is_not_found() {
        let (svc, _) = service(&["Ana"]);
        let err = svc
            .edit(&Uuid::now_v7(), "Ana", &draft("Todos", "hi", "message"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_edit_revalidates_fields() {
        let (svc, _) = service(&["Ana"]);
        let original = svc.post("Ana", &draft("Todos", "hi", "message")).await.unwrap();
        let err = svc
            .edit(&original.id, "Ana", &draft("Todos", "  ", "message"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_ownership() {
        let (svc, messages) = service(&["Ana", "Bob"]);
        let original = svc.post("Ana", &draft("Todos", "hi", "message")).await.unwrap();

        let err = svc.delete(&original.id, "Bob").await.unwrap_err();
        assert!(matches!(err, ChatError::Forbidden(_)));
        assert_eq!(messages.all().len(), 1);

        svc.delete(&original.id, "Ana").await.unwrap();
        assert!(messages.all().is_empty());

        let err = svc.delete(&original.id, "Ana").await.unwrap_err();
        assert!(matches!(err, ChatError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_status_messages_are_not_user_mutable() {
        let (svc, messages) = service(&["Ana"]);
        let joined = Message::joined("Ana", Utc::now());
        messages.insert(&joined).await.unwrap();

        let err = svc.delete(&joined.id, "Ana").await.unwrap_err();
        assert!(matches!(err, ChatError::Forbidden(_)));

        let err = svc
            .edit(&joined.id, "Ana", &draft("Todos", "rewritten", "message"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Forbidden(_)));
        assert_eq!(messages.all()[0].text, "Ana entra na sala...");
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_store_error() {
        let (svc, messages) = service(&["Ana"]);
        messages.set_failing(true);
        assert!(matches!(
            svc.list("Ana", None).await,
            Err(ChatError::Store(_))
        ));
    }
}
