use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;

/// Column width of `mood_entries.mood`.
pub const MAX_MOOD_CHARS: usize = 20;
pub const MAX_NOTE_CHARS: usize = 2000;

/// Allowed mood values. Input is matched case-insensitively after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Calm,
    Neutral,
    Sad,
    Anxious,
    Angry,
    Stressed,
    Tired,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Calm,
        Mood::Neutral,
        Mood::Sad,
        Mood::Anxious,
        Mood::Angry,
        Mood::Stressed,
        Mood::Tired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Calm => "calm",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Angry => "angry",
            Mood::Stressed => "stressed",
            Mood::Tired => "tired",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| {
                let allowed: Vec<_> = Mood::ALL.iter().map(Mood::as_str).collect();
                AppError::Validation(format!(
                    "unknown mood '{}'; expected one of: {}",
                    s.trim(),
                    allowed.join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MoodEntryRow {
    pub id: i64,
    pub mood: String,
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /api/mood`. Fields are optional here so a missing mood is
/// reported as a validation error instead of a JSON rejection.
#[derive(Debug, Default, Deserialize)]
pub struct MoodEntryRequest {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMoodEntry {
    pub mood: Mood,
    /// `None` for a missing or blank note.
    pub note: Option<String>,
}

impl MoodEntryRequest {
    pub fn validate(self) -> Result<ValidatedMoodEntry, AppError> {
        let mood = self
            .mood
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| AppError::Validation("mood is required".to_string()))?;
        if mood.chars().count() > MAX_MOOD_CHARS {
            return Err(AppError::Validation(format!(
                "mood must be at most {MAX_MOOD_CHARS} characters"
            )));
        }
        let mood = mood.parse::<Mood>()?;

        let note = self
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        if note
            .as_ref()
            .is_some_and(|n| n.chars().count() > MAX_NOTE_CHARS)
        {
            return Err(AppError::Validation(format!(
                "note must be at most {MAX_NOTE_CHARS} characters"
            )));
        }

        Ok(ValidatedMoodEntry { mood, note })
    }
}
