pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::guidance::handlers as guidance;
use crate::journal::handlers as journal;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Mood journal
        .route("/", get(journal::handle_index))
        .route(
            "/api/mood",
            post(journal::handle_add_mood).get(journal::handle_list_moods),
        )
        .route("/api/strategies", get(journal::handle_list_strategies))
        // Guidance
        .route("/api/v1/guidance", post(guidance::handle_request_guidance))
        .route(
            "/api/v1/guidance/normalize",
            post(guidance::handle_normalize),
        )
        .route(
            "/api/v1/guidance/:session_id/history",
            get(guidance::handle_guidance_history),
        )
        .with_state(state)
}
