use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::journal::models::{MoodEntryRow, ValidatedMoodEntry};

/// Inserts a mood entry stamped with the current time. Entries are never
/// updated or deleted.
pub async fn insert_mood_entry(
    pool: &SqlitePool,
    entry: &ValidatedMoodEntry,
) -> Result<MoodEntryRow, sqlx::Error> {
    let row = sqlx::query_as::<_, MoodEntryRow>(
        r#"
        INSERT INTO mood_entries (mood, note, timestamp)
        VALUES ($1, $2, $3)
        RETURNING id, mood, note, timestamp
        "#,
    )
    .bind(entry.mood.as_str())
    .bind(entry.note.as_deref())
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    info!("Inserted mood entry {} ({})", row.id, row.mood);
    Ok(row)
}

/// All entries, most recent first. Ties on timestamp fall back to insert order.
pub async fn list_mood_entries(pool: &SqlitePool) -> Result<Vec<MoodEntryRow>, sqlx::Error> {
    sqlx::query_as::<_, MoodEntryRow>(
        "SELECT id, mood, note, timestamp FROM mood_entries ORDER BY timestamp DESC, id DESC",
    )
    .fetch_all(pool)
    .await
}
