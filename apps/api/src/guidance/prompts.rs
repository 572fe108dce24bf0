use crate::guidance::corpus::VerseCorpus;

/// Maximum number of corpus verses quoted in one prompt.
pub const MAX_PROMPT_VERSES: usize = 40;

pub const GUIDANCE_SYSTEM: &str = "\
    You are a gentle guide who answers with a single verse of the Bhagavad Gita \
    and explains how it applies to the user's current feelings.";

pub const GUIDANCE_PROMPT_TEMPLATE: &str = "\
The user is currently feeling: {emotion}
Their question: {question}

Choose ONE verse that best speaks to this feeling and question. \
Prefer verses from the reference list below when one fits.

Reference verses:
{verses}

Reply in exactly this template:
Chapter <chapter number>, Verse <verse number>
Sanskrit: <verse in transliterated Sanskrit>
Translation: <English translation>
Explanation: <what the verse means, two to four sentences>
Application: <one or two practical steps for today>";

const DEFAULT_QUESTION: &str = "general guidance";

/// Fills the guidance template for one emotion/question pair.
pub fn build_guidance_prompt(emotion: &str, question: &str, corpus: &VerseCorpus) -> String {
    let question = match question.trim() {
        "" => DEFAULT_QUESTION,
        q => q,
    };

    let verses = if corpus.is_empty() {
        "(none available)".to_string()
    } else {
        corpus
            .excerpt(MAX_PROMPT_VERSES)
            .iter()
            .map(|v| format!("- Chapter {}, Verse {}: {}", v.chapter, v.verse, v.text))
            .collect::<Vec<_>>()
            .join("\n")
    };

    fill_template(
        GUIDANCE_PROMPT_TEMPLATE,
        &[
            ("{emotion}", emotion.trim()),
            ("{question}", question),
            ("{verses}", &verses),
        ],
    )
}

/// Substitutes placeholders in one pass over the template. Inserted values
/// are never rescanned, so user text containing `{verses}` stays literal.
fn fill_template(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut filled = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        filled.push_str(&rest[..start]);
        let tail = &rest[start..];
        match substitutions
            .iter()
            .find(|(placeholder, _)| tail.starts_with(placeholder))
        {
            Some((placeholder, value)) => {
                filled.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                filled.push('{');
                rest = &tail[1..];
            }
        }
    }

    filled.push_str(rest);
    filled
}
