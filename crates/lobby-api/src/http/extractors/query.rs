//! Query parameter extractors for list endpoints.

use serde::Deserialize;

use crate::http::error::AppError;

/// Query parameters for the message list endpoint.
///
/// `limit` is kept as text so a malformed value can be reported as a
/// validation error rather than a generic query rejection.
#[derive(Debug, Deserialize, Default)]
pub struct MessageListQuery {
    pub limit: Option<String>,
}

impl MessageListQuery {
    /// Parse `limit` into a positive count, if present.
    pub fn limit(&self) -> Result<Option<usize>, AppError> {
        let Some(raw) = self.limit.as_deref() else {
            return Ok(None);
        };
        match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(AppError::Validation(format!(
                "limit must be a positive integer, got '{raw}'"
            ))),
        }
    }
}
