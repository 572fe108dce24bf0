//! Per-session guidance history. Append-only: entries are never edited or
//! removed, and replay order is insertion order.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::guidance::normalizer::GuidanceRecord;

/// One answered question, as shown in the display history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceEntry {
    pub emotion: String,
    pub question: String,
    pub record: GuidanceRecord,
    /// True when the reply could not be parsed and `record` is the fallback.
    pub fallback: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct GuidanceHistory {
    entries: Vec<GuidanceEntry>,
}

impl GuidanceHistory {
    pub fn push(&mut self, entry: GuidanceEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[GuidanceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Histories keyed by session id. Lives in `AppState`.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, GuidanceHistory>>,
}

impl SessionStore {
    /// Appends to the session's history, creating it on first use.
    /// Returns the new history length.
    pub async fn append(&self, session_id: Uuid, entry: GuidanceEntry) -> usize {
        let mut sessions = self.sessions.write().await;
        let history = sessions.entry(session_id).or_default();
        history.push(entry);
        history.len()
    }

    pub async fn history(&self, session_id: Uuid) -> Option<Vec<GuidanceEntry>> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .map(|history| history.entries().to_vec())
    }
}
