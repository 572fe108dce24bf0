//! Verse corpus — chapter → verse number → translation, loaded from JSON.
//!
//! Only used to build prompts; the normalizer never reads it.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Failed to read corpus file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Corpus is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Chapter '{chapter}' has a non-numeric verse key '{key}'")]
    InvalidVerse { chapter: String, key: String },
}

/// One verse, borrowed from the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerseRef<'a> {
    pub chapter: &'a str,
    pub verse: u32,
    pub text: &'a str,
}

#[derive(Debug, Clone, Default)]
pub struct VerseCorpus {
    chapters: HashMap<String, BTreeMap<u32, String>>,
}

impl VerseCorpus {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Loads the corpus, or logs a warning and returns an empty one.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(corpus) => {
                info!(
                    "Verse corpus loaded from {}: {} chapters, {} verses",
                    path.display(),
                    corpus.chapter_count(),
                    corpus.verse_count()
                );
                corpus
            }
            Err(e) => {
                warn!("{e}; continuing with an empty verse corpus");
                Self::default()
            }
        }
    }

    pub fn from_json(text: &str) -> Result<Self, CorpusError> {
        let raw: HashMap<String, HashMap<String, String>> = serde_json::from_str(text)?;

        let mut chapters = HashMap::with_capacity(raw.len());
        for (chapter, verses) in raw {
            let mut parsed = BTreeMap::new();
            for (key, translation) in verses {
                let verse = key
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| CorpusError::InvalidVerse {
                        chapter: chapter.clone(),
                        key: key.clone(),
                    })?;
                parsed.insert(verse, translation);
            }
            chapters.insert(chapter, parsed);
        }

        Ok(Self { chapters })
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn verse_count(&self) -> usize {
        self.chapters.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.verse_count() == 0
    }

    /// Up to `limit` verses in chapter order, then verse order. Chapters sort
    /// by the number embedded in their id ("2" < "10", "chapter_2" < "chapter_10").
    pub fn excerpt(&self, limit: usize) -> Vec<VerseRef<'_>> {
        let mut chapters: Vec<_> = self.chapters.iter().collect();
        chapters.sort_by(|(a, _), (b, _)| chapter_order(a).cmp(&chapter_order(b)));

        chapters
            .into_iter()
            .flat_map(|(chapter, verses)| {
                verses.iter().map(move |(verse, text)| VerseRef {
                    chapter: chapter.as_str(),
                    verse: *verse,
                    text: text.as_str(),
                })
            })
            .take(limit)
            .collect()
    }
}

fn chapter_order(id: &str) -> (u32, &str) {
    let digits: String = id.chars().filter(char::is_ascii_digit).collect();
    (digits.parse().unwrap_or(u32::MAX), id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "10": {"20": "I am the Self seated in the hearts of all beings."},
        "2": {"48": "Perform your duty with evenness of mind.", "47": "You have a right to your actions alone."},
        "6": {"5": "Lift yourself by your own self."}
    }"#;

    #[test]
    fn test_from_json_counts_chapters_and_verses() {
        let corpus = VerseCorpus::from_json(SAMPLE).unwrap();
        assert_eq!(corpus.chapter_count(), 3);
        assert_eq!(corpus.verse_count(), 4);
        let last = corpus.excerpt(4)[3];
        assert_eq!(last.chapter, "10");
        assert_eq!(last.text, "I am the Self seated in the hearts of all beings.");
    }

    #[test]
    fn test_excerpt_orders_numerically_and_respects_limit() {
        let corpus = VerseCorpus::from_json(SAMPLE).unwrap();
        let excerpt = corpus.excerpt(3);
        let refs: Vec<_> = excerpt.iter().map(|v| (v.chapter, v.verse)).collect();
        assert_eq!(refs, vec![("2", 47), ("2", 48), ("6", 5)]);
        assert_eq!(corpus.excerpt(100).len(), 4);
    }

    #[test]
    fn test_non_numeric_verse_key_is_rejected() {
        let err = VerseCorpus::from_json(r#"{"2": {"forty": "text"}}"#).unwrap_err();
        assert!(matches!(err, CorpusError::InvalidVerse { .. }));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert!(matches!(
            VerseCorpus::from_json("not json"),
            Err(CorpusError::Json(_))
        ));
    }

    #[test]
    fn test_load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let corpus = VerseCorpus::load(file.path()).unwrap();
        assert_eq!(corpus.verse_count(), 4);
    }

    #[test]
    fn test_bundled_corpus_loads() {
        let corpus =
            VerseCorpus::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/verses.json")).unwrap();
        assert_eq!(corpus.excerpt(1)[0].verse, 14);
        assert!(corpus.verse_count() > 10);
    }

    #[test]
    fn test_load_or_empty_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = VerseCorpus::load_or_empty(dir.path().join("missing.json"));
        assert!(corpus.is_empty());
        assert!(corpus.excerpt(5).is_empty());
    }
}
