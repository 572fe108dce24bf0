//! Guidance pipeline: emotion + question → prompt → generative text →
//! normalizer → history entry.
//!
//! The emotion label comes from an external classifier; this module only
//! checks that one was supplied.

use chrono::Utc;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::guidance::corpus::VerseCorpus;
use crate::guidance::history::GuidanceEntry;
use crate::guidance::normalizer::{normalize_with, STRATEGIES};
use crate::guidance::prompts::{build_guidance_prompt, GUIDANCE_SYSTEM};
use crate::llm_client::prompts::{CARE_INSTRUCTION, TEMPLATE_ONLY_INSTRUCTION};
use crate::llm_client::TextGenerator;

const MAX_EMOTION_CHARS: usize = 32;
const MAX_QUESTION_CHARS: usize = 1000;

/// Runs one guidance request. Generator failures surface as `AppError::Llm`;
/// unparseable replies never fail and come back as a fallback entry.
pub async fn request_guidance(
    generator: &dyn TextGenerator,
    corpus: &VerseCorpus,
    emotion: &str,
    question: &str,
) -> Result<GuidanceEntry, AppError> {
    let emotion = emotion.trim();
    if emotion.is_empty() {
        return Err(AppError::Validation("emotion is required".to_string()));
    }
    if emotion.chars().count() > MAX_EMOTION_CHARS {
        return Err(AppError::Validation(format!(
            "emotion must be at most {MAX_EMOTION_CHARS} characters"
        )));
    }
    if question.chars().count() > MAX_QUESTION_CHARS {
        return Err(AppError::Validation(format!(
            "question must be at most {MAX_QUESTION_CHARS} characters"
        )));
    }

    let prompt = build_guidance_prompt(emotion, question, corpus);
    let system = format!("{GUIDANCE_SYSTEM} {CARE_INSTRUCTION} {TEMPLATE_ONLY_INSTRUCTION}");

    info!("Requesting guidance for emotion '{emotion}'");
    let raw_text = generator
        .generate(&prompt, &system)
        .await
        .map_err(|e| AppError::Llm(format!("Guidance generation failed: {e}")))?;

    let normalized = normalize_with(&raw_text, STRATEGIES);
    let fallback = normalized.is_fallback();
    if fallback {
        warn!("Guidance reply for '{emotion}' could not be parsed");
    }

    Ok(GuidanceEntry {
        emotion: emotion.to_string(),
        question: question.trim().to_string(),
        record: normalized.into_record(),
        fallback,
        created_at: Utc::now(),
    })
}
