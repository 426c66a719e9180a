//! Message handlers: post, list, edit, delete.

use std::time::Instant;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use lobby_types::message::{Message, MessageDraft};

use crate::http::error::AppError;
use crate::http::extractors::identity::Identity;
use crate::http::extractors::query::MessageListQuery;
use crate::http::handlers::json_body;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// A path id that is not a UUID cannot name any stored message.
fn parse_message_id(raw: &str) -> Result<Uuid, AppError> {
    raw.parse::<Uuid>()
        .map_err(|_| AppError::NotFound(format!("message {raw}")))
}

/// POST /messages - Post a message as the `user` header's participant.
pub async fn post_message(
    State(state): State<AppState>,
    Identity(from): Identity,
    payload: Result<Json<MessageDraft>, JsonRejection>,
) -> Result<(StatusCode, ApiResponse<Message>), AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let draft = json_body(payload)?;
    let message = state.message_service.post(&from, &draft).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok((
        StatusCode::CREATED,
        ApiResponse::success(message, request_id, elapsed),
    ))
}

/// GET /messages?limit=N - Messages visible to the caller, most recent first.
pub async fn list_messages(
    State(state): State<AppState>,
    Identity(requester): Identity,
    Query(query): Query<MessageListQuery>,
) -> Result<ApiResponse<Vec<Message>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let limit = query.limit()?;
    let messages = state.message_service.list(&requester, limit).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(ApiResponse::success(messages, request_id, elapsed))
}

/// PUT /messages/{id} - Replace a message the caller authored.
pub async fn edit_message(
    State(state): State<AppState>,
    Identity(from): Identity,
    Path(id): Path<String>,
    payload: Result<Json<MessageDraft>, JsonRejection>,
) -> Result<ApiResponse<Message>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let id = parse_message_id(&id)?;
    let draft = json_body(payload)?;
    let message = state.message_service.edit(&id, &from, &draft).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(ApiResponse::success(message, request_id, elapsed))
}

/// DELETE /messages/{id} - Delete a message the caller authored.
pub async fn delete_message(
    State(state): State<AppState>,
    Identity(from): Identity,
    Path(id): Path<String>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let id = parse_message_id(&id)?;
    state.message_service.delete(&id, &from).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(ApiResponse::success(
        serde_json::json!({ "deleted": true, "id": id }),
        request_id,
        elapsed,
    ))
}
