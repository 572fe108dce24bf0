//! Axum route handlers for the Guidance API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::guidance::history::GuidanceEntry;
use crate::guidance::normalizer::{normalize_value, GuidanceRecord};
use crate::guidance::service::request_guidance;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GuidanceRequest {
    /// Omit to start a new session.
    pub session_id: Option<Uuid>,
    #[serde(default)]
    pub emotion: String,
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct GuidanceResponse {
    pub session_id: Uuid,
    pub entry: GuidanceEntry,
    pub history_len: usize,
}

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    /// Usually a string; any JSON value other than `null` is accepted.
    #[serde(default)]
    pub raw_text: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub record: GuidanceRecord,
    pub fallback: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/guidance
pub async fn handle_request_guidance(
    State(state): State<AppState>,
    Json(req): Json<GuidanceRequest>,
) -> Result<Json<GuidanceResponse>, AppError> {
    let entry = request_guidance(
        state.generator.as_ref(),
        &state.corpus,
        &req.emotion,
        &req.question,
    )
    .await?;

    let session_id = req.session_id.unwrap_or_else(Uuid::new_v4);
    let history_len = state.sessions.append(session_id, entry.clone()).await;

    Ok(Json(GuidanceResponse {
        session_id,
        entry,
        history_len,
    }))
}

/// GET /api/v1/guidance/:session_id/history
pub async fn handle_guidance_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<GuidanceEntry>>, AppError> {
    state
        .sessions
        .history(session_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))
}

/// POST /api/v1/guidance/normalize
///
/// Runs the normalizer alone, without calling the LLM.
pub async fn handle_normalize(
    Json(req): Json<NormalizeRequest>,
) -> Result<Json<NormalizeResponse>, AppError> {
    let raw_text = req
        .raw_text
        .ok_or_else(|| AppError::Validation("raw_text is required".to_string()))?;
    let normalized = normalize_value(&raw_text);
    let fallback = normalized.is_fallback();
    Ok(Json(NormalizeResponse {
        record: normalized.into_record(),
        fallback,
    }))
}
