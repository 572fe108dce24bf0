use std::sync::Arc;

use sqlx::SqlitePool;

use crate::guidance::corpus::VerseCorpus;
use crate::guidance::history::SessionStore;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Generative-text backend. `LlmClient` in production, a stub in tests.
    pub generator: Arc<dyn TextGenerator>,
    pub corpus: Arc<VerseCorpus>,
    /// Guidance histories, one per session.
    pub sessions: Arc<SessionStore>,
}
