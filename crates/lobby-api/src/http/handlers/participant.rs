//! Participant handlers: register, list, and presence refresh.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use lobby_types::participant::{Participant, RegisterParticipantRequest};

use crate::http::error::AppError;
use crate::http::extractors::identity::Identity;
use crate::http::handlers::json_body;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /participants - Join the room.
pub async fn register_participant(
    State(state): State<AppState>,
    payload: Result<Json<RegisterParticipantRequest>, JsonRejection>,
) -> Result<(StatusCode, ApiResponse<Participant>), AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let body = json_body(payload)?;
    let participant = state.presence_service.register(&body.name).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok((
        StatusCode::CREATED,
        ApiResponse::success(participant, request_id, elapsed),
    ))
}

/// GET /participants - List everyone currently in the room.
pub async fn list_participants(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Participant>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let participants = state.presence_service.list_all().await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(ApiResponse::success(participants, request_id, elapsed))
}

/// POST /status - Keep the caller's presence alive.
pub async fn refresh_status(
    State(state): State<AppState>,
    Identity(name): Identity,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    state.presence_service.refresh(&name).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(ApiResponse::success(
        serde_json::json!({ "name": name }),
        request_id,
        elapsed,
    ))
}
