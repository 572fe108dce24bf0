//! Response normalizer — turns free-form generative text into a `GuidanceRecord`.
//!
//! Strategies run in order and the first one that yields a record wins:
//! whole-text JSON → embedded `{...}` JSON → line-oriented heuristic.
//! If none yields a record the outcome is `Normalized::Fallback`, which still
//! converts into a displayable record carrying the untouched input.
//!
//! Pure and synchronous: no I/O, no shared state.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::llm_client::strip_json_fences;

/// `verse_reference` of a record produced from unparseable input.
pub const FALLBACK_VERSE_REFERENCE: &str = "Unable to parse verse";

const RECORD_FIELDS: [&str; 5] = [
    "verse_reference",
    "sanskrit",
    "translation",
    "explanation",
    "application",
];

/// Five-field guidance passage. Every field is always present; missing ones
/// are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceRecord {
    #[serde(deserialize_with = "null_as_empty")]
    pub verse_reference: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub sanskrit: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub translation: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub explanation: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub application: String,
}

/// Reads a JSON `null` field as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl GuidanceRecord {
    pub fn fallback(raw_text: String) -> Self {
        Self {
            verse_reference: FALLBACK_VERSE_REFERENCE.to_string(),
            translation: raw_text,
            ..Self::default()
        }
    }
}

/// Outcome of normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Structured(GuidanceRecord),
    /// No strategy accepted the input; holds the original text.
    Fallback(String),
}

impl Normalized {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Normalized::Fallback(_))
    }

    pub fn into_record(self) -> GuidanceRecord {
        match self {
            Normalized::Structured(record) => record,
            Normalized::Fallback(raw) => GuidanceRecord::fallback(raw),
        }
    }
}

/// A single parsing attempt. Returns `None` to pass the input on.
pub type Strategy = fn(&str) -> Option<GuidanceRecord>;

/// Default strategy order.
pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("whole_json", parse_whole_json),
    ("embedded_json", parse_embedded_json),
    ("line_heuristic", parse_lines),
];

/// Normalizes raw text with the default strategies. Never fails.
#[cfg(test)]
pub fn normalize(raw_text: &str) -> GuidanceRecord {
    normalize_with(raw_text, STRATEGIES).into_record()
}

/// Runs `strategies` in order, first match wins.
pub fn normalize_with(raw_text: &str, strategies: &[(&str, Strategy)]) -> Normalized {
    for (name, strategy) in strategies {
        if let Some(record) = strategy(raw_text) {
            debug!("Guidance normalized via {name} strategy");
            return Normalized::Structured(record);
        }
    }

    warn!(
        "No strategy could normalize guidance text ({} bytes); using fallback record",
        raw_text.len()
    );
    Normalized::Fallback(raw_text.to_string())
}

/// Normalizes a loosely-typed JSON payload. Strings go through the text
/// strategies, objects are read as a record, anything else falls back with
/// its JSON text as the preserved input.
pub fn normalize_value(value: &Value) -> Normalized {
    match value {
        Value::String(text) => normalize_with(text, STRATEGIES),
        Value::Object(_) => match record_from_value(value.clone()) {
            Some(record) => Normalized::Structured(record),
            None => Normalized::Fallback(value.to_string()),
        },
        other => {
            warn!("Guidance payload is not text or an object; using fallback record");
            Normalized::Fallback(other.to_string())
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Strategies
// ────────────────────────────────────────────────────────────────────────────

fn parse_whole_json(raw_text: &str) -> Option<GuidanceRecord> {
    parse_record(strip_json_fences(raw_text))
}

/// Parses the span between the first `{` and the last `}`.
fn parse_embedded_json(raw_text: &str) -> Option<GuidanceRecord> {
    let start = raw_text.find('{')?;
    let end = raw_text.rfind('}')?;
    if start >= end {
        return None;
    }
    parse_record(&raw_text[start..=end])
}

#[derive(Debug, Clone, Copy)]
enum Section {
    Explanation,
    Application,
}

/// Reads the `Chapter/Sanskrit:/Translation:/Explanation:/Application:`
/// line template. Always yields a record, possibly with every field empty.
fn parse_lines(raw_text: &str) -> Option<GuidanceRecord> {
    let mut record = GuidanceRecord::default();
    let mut section: Option<Section> = None;

    for line in raw_text.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }

        if line.contains("Chapter") && line.contains("Verse") {
            record.verse_reference = line.to_string();
        } else if let Some(rest) = line.strip_prefix("Sanskrit:") {
            // Does not touch the section cursor.
            record.sanskrit = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("Translation:") {
            record.translation = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("Explanation:") {
            section = Some(Section::Explanation);
            record.explanation = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("Application:") {
            section = Some(Section::Application);
            record.application = rest.trim().to_string();
        } else if let Some(active) = section {
            let field = match active {
                Section::Explanation => &mut record.explanation,
                Section::Application => &mut record.application,
            };
            field.push(' ');
            field.push_str(line);
        }
    }

    Some(record)
}

fn parse_record(text: &str) -> Option<GuidanceRecord> {
    let value: Value = serde_json::from_str(text).ok()?;
    record_from_value(value)
}

/// Accepts a JSON object carrying at least one record field whose values are
/// all strings or `null`.
fn record_from_value(value: Value) -> Option<GuidanceRecord> {
    let has_record_field = value
        .as_object()
        .is_some_and(|obj| RECORD_FIELDS.iter().any(|field| obj.contains_key(*field)));
    if !has_record_field {
        return None;
    }
    serde_json::from_value(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEMPLATE_REPLY: &str = "Chapter 2, Verse 47
Sanskrit: karmanye vadhikaraste
Translation: You have a right to perform your duty
Explanation: This teaches detachment from results.
Further clarifies duty over outcome.
Application: Focus on effort, not reward.";

    fn record(verse: &str, translation: &str) -> GuidanceRecord {
        GuidanceRecord {
            verse_reference: verse.to_string(),
            translation: translation.to_string(),
            ..GuidanceRecord::default()
        }
    }

    #[test]
    fn test_whole_json_returns_exact_structure() {
        let expected = GuidanceRecord {
            verse_reference: "Chapter 6, Verse 5".to_string(),
            sanskrit: "uddhared atmanatmanam".to_string(),
            translation: "Lift yourself by your own self".to_string(),
            explanation: "You are your own friend.".to_string(),
            application: "Speak kindly to yourself today.".to_string(),
        };
        let raw = serde_json::to_string(&expected).unwrap();
        assert_eq!(
            normalize_with(&raw, STRATEGIES),
            Normalized::Structured(expected)
        );
    }

    #[test]
    fn test_whole_json_inside_code_fence() {
        let raw = "```json\n{\"verse_reference\": \"Chapter 2, Verse 14\"}\n```";
        assert_eq!(normalize(raw), record("Chapter 2, Verse 14", ""));
    }

    #[test]
    fn test_whole_json_wins_over_line_template() {
        // The translation value itself looks like a template line.
        let raw = r#"{"verse_reference":"Ch2 V47","translation":"Explanation: not a section"}"#;
        let normalized = normalize(raw);
        assert_eq!(normalized.translation, "Explanation: not a section");
        assert_eq!(normalized.explanation, "");
    }

    #[test]
    fn test_embedded_json_between_noise() {
        let raw = r#"noise {"verse_reference":"Ch2 V47","translation":"do your duty"} trailing"#;
        assert_eq!(normalize(raw), record("Ch2 V47", "do your duty"));
        assert!(parse_whole_json(raw).is_none());
    }

    #[test]
    fn test_line_template_fills_all_fields() {
        let normalized = normalize(TEMPLATE_REPLY);
        assert_eq!(normalized.verse_reference, "Chapter 2, Verse 47");
        assert_eq!(normalized.sanskrit, "karmanye vadhikaraste");
        assert_eq!(
            normalized.translation,
            "You have a right to perform your duty"
        );
        assert_eq!(
            normalized.explanation,
            "This teaches detachment from results. Further clarifies duty over outcome."
        );
        assert_eq!(normalized.application, "Focus on effort, not reward.");
    }

    #[test]
    fn test_empty_input_is_all_empty_not_fallback() {
        let normalized = normalize_with("", STRATEGIES);
        assert_eq!(normalized, Normalized::Structured(GuidanceRecord::default()));
    }

    #[test]
    fn test_stray_braces_fall_through_to_lines() {
        for raw in ["} Chapter 3, Verse 8 {", "{ Chapter 3, Verse 8", "Chapter 3, Verse 8 { not json }"] {
            let normalized = normalize_with(raw, STRATEGIES);
            assert!(!normalized.is_fallback());
            assert_eq!(normalized.into_record().verse_reference, raw);
        }
    }

    #[test]
    fn test_last_chapter_verse_line_wins() {
        let raw = "Chapter 2, Verse 47\nChapter 18, Verse 66";
        assert_eq!(normalize(raw).verse_reference, "Chapter 18, Verse 66");
    }

    #[test]
    fn test_blank_lines_do_not_reset_section() {
        let raw = "Explanation: First part.\n\n   \nSecond part.";
        assert_eq!(normalize(raw).explanation, "First part. Second part.");
    }

    #[test]
    fn test_lines_before_any_section_are_dropped() {
        let raw = "Here is your guidance:\nTranslation: Be steady.";
        let normalized = normalize(raw);
        assert_eq!(normalized.translation, "Be steady.");
        assert_eq!(normalized.explanation, "");
        assert_eq!(normalized.application, "");
    }

    #[test]
    fn test_sanskrit_inside_section_overwrites_without_resetting() {
        let raw = "Explanation: Start.\nSanskrit: yoga karmasu kaushalam\ncontinued.";
        let normalized = normalize(raw);
        assert_eq!(normalized.sanskrit, "yoga karmasu kaushalam");
        assert_eq!(normalized.explanation, "Start. continued.");
    }

    #[test]
    fn test_translation_inside_application_keeps_application_active() {
        let raw = "Application: Breathe.\nTranslation: Late translation\nThen act.";
        let normalized = normalize(raw);
        assert_eq!(normalized.translation, "Late translation");
        assert_eq!(normalized.application, "Breathe. Then act.");
    }

    #[test]
    fn test_empty_section_header_then_continuation_keeps_leading_space() {
        let normalized = normalize("Application:\nRest well.");
        assert_eq!(normalized.application, " Rest well.");
    }

    #[test]
    fn test_null_field_defaults_to_empty() {
        let raw = r#"{"verse_reference":"Chapter 2, Verse 47","sanskrit":null,"translation":"do your duty","explanation":"Act without clinging.","application":null}"#;
        let normalized = normalize(raw);
        assert_eq!(normalized.verse_reference, "Chapter 2, Verse 47");
        assert_eq!(normalized.sanskrit, "");
        assert_eq!(normalized.translation, "do your duty");
        assert_eq!(normalized.explanation, "Act without clinging.");
        assert_eq!(normalized.application, "");
    }

    #[test]
    fn test_embedded_json_with_null_field() {
        let raw = r#"Here you go: {"verse_reference":"Ch6 V5","translation":null} hope it helps"#;
        assert_eq!(normalize(raw), record("Ch6 V5", ""));
    }

    #[test]
    fn test_json_without_record_fields_is_not_structured() {
        assert!(parse_whole_json(r#"{"mood": "sad"}"#).is_none());
        assert!(parse_whole_json("[1, 2, 3]").is_none());
    }

    #[test]
    fn test_fallback_when_no_strategy_accepts() {
        let raw = "Plain prose with no template at all.";
        let structured_only = &STRATEGIES[..2];
        let normalized = normalize_with(raw, structured_only);
        assert_eq!(normalized, Normalized::Fallback(raw.to_string()));

        let fallback = normalized.into_record();
        assert_eq!(fallback.verse_reference, FALLBACK_VERSE_REFERENCE);
        assert_eq!(fallback.translation, raw);
        assert_eq!(fallback.sanskrit, "");
        assert_eq!(fallback.explanation, "");
        assert_eq!(fallback.application, "");
    }

    #[test]
    fn test_normalize_value_string_uses_text_strategies() {
        let value = json!(TEMPLATE_REPLY);
        let normalized = normalize_value(&value).into_record();
        assert_eq!(normalized.verse_reference, "Chapter 2, Verse 47");
    }

    #[test]
    fn test_normalize_value_object_reads_record() {
        let value = json!({"verse_reference": "Chapter 2, Verse 47", "application": "Act."});
        let normalized = normalize_value(&value);
        assert!(!normalized.is_fallback());
        assert_eq!(normalized.into_record().application, "Act.");
    }

    #[test]
    fn test_normalize_value_non_text_falls_back_with_input() {
        let value = json!([1, 2, 3]);
        let normalized = normalize_value(&value);
        assert!(normalized.is_fallback());
        let fallback = normalized.into_record();
        assert_eq!(fallback.verse_reference, FALLBACK_VERSE_REFERENCE);
        assert_eq!(fallback.translation, "[1,2,3]");
    }

    #[test]
    fn test_normalize_value_object_with_wrong_types_falls_back() {
        let value = json!({"verse_reference": 47});
        let normalized = normalize_value(&value);
        assert_eq!(
            normalized,
            Normalized::Fallback(r#"{"verse_reference":47}"#.to_string())
        );
    }
}
