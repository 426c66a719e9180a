//! Application error type mapping to HTTP status codes and envelope format.

use axum::response::{IntoResponse, Response};

use lobby_types::error::ChatError;

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Domain errors from the services.
    Chat(ChatError),
    /// Malformed request input caught before reaching a service.
    Validation(String),
    /// Resource absent before reaching a service (e.g. unparseable id).
    NotFound(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl AppError {
    fn code_and_message(&self) -> (&'static str, String) {
        match self {
            AppError::Chat(ChatError::Validation(msg)) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Chat(e @ ChatError::UnknownSender(_)) => ("UNKNOWN_SENDER", e.to_string()),
            AppError::Chat(e @ ChatError::Conflict(_)) => ("CONFLICT", e.to_string()),
            AppError::Chat(e @ ChatError::NotFound(_)) => ("NOT_FOUND", e.to_string()),
            AppError::Chat(e @ ChatError::Forbidden(_)) => ("FORBIDDEN", e.to_string()),
            AppError::Chat(ChatError::Store(detail)) => {
                tracing::error!(error = %detail, "record store failure");
                ("INTERNAL_ERROR", "internal server error".to_string())
            }
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::NotFound(what) => ("NOT_FOUND", format!("{what} not found")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = self.code_and_message();
        ApiResponse::error(code, &message, String::new(), 0).into_response()
    }
}
