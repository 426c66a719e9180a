use thiserror::Error;

/// Errors surfaced by presence and message operations.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("participant '{0}' already exists")]
    Conflict(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("'{0}' is not allowed to modify this message")]
    Forbidden(String),

    #[error("unknown sender '{0}'")]
    UnknownSender(String),

    #[error("storage error: {0}")]
    Store(String),
}

impl From<RepositoryError> for ChatError {
    fn from(e: RepositoryError) -> Self {
        ChatError::Store(e.to_string())
    }
}

/// Errors from repository operations (used by trait definitions in lobby-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        let err = ChatError::Conflict("Ana".to_string());
        assert_eq!(err.to_string(), "participant 'Ana' already exists");
    }

    #[test]
    fn test_repository_error_maps_to_store() {
        let err: ChatError = RepositoryError::Query("disk I/O error".to_string()).into();
        assert!(matches!(err, ChatError::Store(ref msg) if msg.contains("disk I/O error")));
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
