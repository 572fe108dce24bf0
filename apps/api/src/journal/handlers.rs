//! Axum route handlers for the mood journal.

use axum::{extract::State, response::Html, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::journal::models::{MoodEntryRequest, MoodEntryRow};
use crate::journal::page::render_index;
use crate::journal::store::{insert_mood_entry, list_mood_entries};
use crate::journal::strategies::{CopingStrategy, COPING_STRATEGIES};
use crate::state::AppState;

/// GET /
///
/// Listing page: newest entries first, plus the coping strategies.
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let entries = list_mood_entries(&state.db).await?;
    Ok(Html(render_index(&entries, COPING_STRATEGIES)))
}

/// POST /api/mood
pub async fn handle_add_mood(
    State(state): State<AppState>,
    Json(req): Json<MoodEntryRequest>,
) -> Result<Json<Value>, AppError> {
    let entry = req.validate()?;
    insert_mood_entry(&state.db, &entry).await?;
    Ok(Json(json!({ "status": "success" })))
}

/// GET /api/mood
pub async fn handle_list_moods(
    State(state): State<AppState>,
) -> Result<Json<Vec<MoodEntryRow>>, AppError> {
    Ok(Json(list_mood_entries(&state.db).await?))
}

/// GET /api/strategies
pub async fn handle_list_strategies() -> Json<&'static [CopingStrategy]> {
    Json(COPING_STRATEGIES)
}
