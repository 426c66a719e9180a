//! Caller identity extractor.
//!
//! The `user` header names the participant making the request. It is trusted
//! as given: no verification, only UTF-8 decoding and the same markup
//! stripping applied to registered names.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use lobby_types::participant::validate_name;

use crate::http::error::AppError;

/// Header carrying the caller's participant name.
pub const USER_HEADER: &str = "user";

/// The sanitized name from the `user` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(pub String);

impl<S: Send + Sync> FromRequestParts<S> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_HEADER)
            .ok_or_else(|| AppError::Validation(format!("missing '{USER_HEADER}' header")))?;

        let decoded = std::str::from_utf8(raw.as_bytes()).map_err(|_| {
            AppError::Validation(format!("'{USER_HEADER}' header is not valid UTF-8"))
        })?;

        let name = validate_name(decoded)
            .map_err(|_| AppError::Validation(format!("'{USER_HEADER}' header is empty")))?;

        Ok(Identity(name))
    }
}
