//! Message visibility rules.
//!
//! Private messages are visible only to their sender and recipient; every
//! other kind (broadcast messages, messages addressed to one participant but
//! not marked private, status notifications) is visible to everyone.

use lobby_types::message::{Message, MessageKind};

/// Whether `requester` may see `message`.
pub fn is_visible_to(message: &Message, requester: &str) -> bool {
    message.kind != MessageKind::PrivateMessage
        || message.from == requester
        || message.to == requester
}

/// Filter a most-recent-first history down to what `requester` may see,
/// then keep at most `limit` entries.
///
/// Filtering runs over the whole history before the limit is applied, so
/// the result is the `limit` most recent *visible* messages.
pub fn visible_history(
    history: impl IntoIterator<Item = Message>,
    requester: &str,
    limit: Option<usize>,
) -> Vec<Message> {
    let visible = history
        .into_iter()
        .filter(|m| is_visible_to(m, requester));
    match limit {
        Some(n) => visible.take(n).collect(),
        None => visible.collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn msg(from: &str, to: &str, kind: MessageKind, text: &str) -> Message {
        Message {
            id: Uuid::now_v7(),
            from: from.to_string(),
            to: to.to_string(),
            text: text.to_string(),
            kind,
            time: "12:00:00".to_string(),
        }
    }

    #[test]
    fn test_private_visible_only_to_sender_and_recipient() {
        let m = msg("Bob", "Ana", MessageKind::PrivateMessage, "psst");
        assert!(is_visible_to(&m, "Bob"));
        assert!(is_visible_to(&m, "Ana"));
        assert!(!is_visible_to(&m, "Carol"));
    }

    #[test]
    fn test_non_private_always_visible() {
        let direct = msg("Bob", "Ana", MessageKind::Message, "hey Ana");
        let status = msg("Bob", "Todos", MessageKind::Status, "Bob entra na sala...");
        for requester in ["Ana", "Bob", "Carol"] {
            assert!(is_visible_to(&direct, requester));
            assert!(is_visible_to(&status, requester));
        }
    }

    #[test]
    fn test_limit_applies_after_filtering() {
        // Most recent first: two private messages Carol can't see sit on top.
        let history = vec![
            msg("Bob", "Ana", MessageKind::PrivateMessage, "p2"),
            msg("Bob", "Ana", MessageKind::PrivateMessage, "p1"),
            msg("Ana", "Todos", MessageKind::Message, "m3"),
            msg("Ana", "Todos", MessageKind::Message, "m2"),
            msg("Ana", "Todos", MessageKind::Message, "m1"),
        ];

        let seen = visible_history(history.clone(), "Carol", Some(2));
        let texts: Vec<&str> = seen.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["m3", "m2"]);

        let seen = visible_history(history, "Ana", Some(3));
        let texts: Vec<&str> = seen.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["p2", "p1", "m3"]);
    }

    #[test]
    fn test_no_limit_returns_everything_visible() {
        let history = vec![
            msg("Ana", "Todos", MessageKind::Message, "a"),
            msg("Bob", "Ana", MessageKind::PrivateMessage, "b"),
        ];
        assert_eq!(visible_history(history.clone(), "Carol", None).len(), 1);
        assert_eq!(visible_history(history, "Bob", None).len(), 2);
    }

    #[test]
    fn test_limit_larger_than_history() {
        let history = vec![msg("Ana", "Todos", MessageKind::Message, "a")];
        assert_eq!(visible_history(history, "Ana", Some(50)).len(), 1);
    }
}
