use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const EMBEDDED_ANIMALS: &str = include_str!("resources/animals.json");
pub const EMBEDDED_CAPITALS: &str = include_str!("resources/capitals.json");

/// Topic id every unknown topic falls back to.
pub const DEFAULT_TOPIC: &str = "animals";

#[derive(Debug, Error)]
pub enum WordSourceError {
    #[error("failed to read word list '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse word list '{name}': {source}")]
    Parse {
        name: String,
        source: serde_json::Error,
    },
    #[error("word list '{name}' has invalid answer key '{key}' (lowercase a-z only)")]
    InvalidKey { name: String, key: String },
    #[error("word list '{name}' contains no entries")]
    Empty { name: String },
}

/// One guessable word: the answer and the hint shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub answer: String,
    pub hint: String,
}

/// On-disk shape of a word list: a flat answer-key -> hint map.
#[derive(Deserialize)]
struct WordListFile(BTreeMap<String, String>);

/// A named, validated set of word entries for one topic.
///
/// Entries are unique by answer (the file format guarantees it) and every
/// answer is non-empty lowercase a-z. Sources are never empty once loaded.
#[derive(Debug, Clone)]
pub struct WordSource {
    name: String,
    entries: Vec<WordEntry>,
}

fn is_valid_answer(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_lowercase())
}

impl WordSource {
    pub fn from_json_str(name: &str, data: &str) -> Result<Self, WordSourceError> {
        let file: WordListFile =
            serde_json::from_str(data).map_err(|source| WordSourceError::Parse {
                name: name.to_string(),
                source,
            })?;

        let mut entries = Vec::with_capacity(file.0.len());
        for (answer, hint) in file.0 {
            if !is_valid_answer(&answer) {
                return Err(WordSourceError::InvalidKey {
                    name: name.to_string(),
                    key: answer,
                });
            }
            entries.push(WordEntry { answer, hint });
        }

        if entries.is_empty() {
            return Err(WordSourceError::Empty {
                name: name.to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            entries,
        })
    }

    pub fn from_file<P: AsRef<Path>>(name: &str, path: P) -> Result<Self, WordSourceError> {
        let data = fs::read_to_string(&path).map_err(|source| WordSourceError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::from_json_str(name, &data)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains_answer(&self, answer: &str) -> bool {
        self.entries.iter().any(|e| e.answer == answer)
    }
}

/// The set of word sources available to a game, one per topic.
///
/// Unknown topic ids resolve to the default source instead of erroring.
#[derive(Debug, Clone)]
pub struct Catalog {
    sources: Vec<WordSource>,
    default: usize,
}

impl Catalog {
    /// Build a catalog from one or more sources; the first is the default.
    ///
    /// # Panics
    /// Panics if `sources` is empty. Shipping a game with no word lists is a
    /// packaging error, not a runtime condition.
    #[must_use]
    pub fn new(sources: Vec<WordSource>) -> Self {
        assert!(!sources.is_empty(), "catalog requires at least one source");
        Self {
            sources,
            default: 0,
        }
    }

    /// The shipped word lists, with `animals` as the default topic.
    #[must_use]
    pub fn builtin() -> Self {
        let animals = WordSource::from_json_str("animals", EMBEDDED_ANIMALS)
            .expect("embedded animals list is valid");
        let capitals = WordSource::from_json_str("capitals", EMBEDDED_CAPITALS)
            .expect("embedded capitals list is valid");
        Self::new(vec![animals, capitals])
    }

    pub fn add(&mut self, source: WordSource) {
        self.sources.push(source);
    }

    /// Index of the source for `topic`, falling back to the default on
    /// unknown ids.
    #[must_use]
    pub fn resolve(&self, topic: &str) -> usize {
        self.sources
            .iter()
            .position(|s| s.name == topic)
            .unwrap_or(self.default)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> &WordSource {
        &self.sources[index]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_list() {
        let source =
            WordSource::from_json_str("test", r#"{"cat": "a feline", "dog": "a canine"}"#).unwrap();
        assert_eq!(source.len(), 2);
        assert!(source.contains_answer("cat"));
        assert!(source.contains_answer("dog"));
        assert!(!source.contains_answer("bird"));
    }

    #[test]
    fn test_hint_is_kept_with_answer() {
        let source = WordSource::from_json_str("test", r#"{"cat": "a feline"}"#).unwrap();
        let entry = &source.entries()[0];
        assert_eq!(entry.answer, "cat");
        assert_eq!(entry.hint, "a feline");
    }

    #[test]
    fn test_empty_list_rejected() {
        let result = WordSource::from_json_str("test", "{}");
        assert!(matches!(result, Err(WordSourceError::Empty { .. })));
    }

    #[test]
    fn test_uppercase_key_rejected() {
        let result = WordSource::from_json_str("test", r#"{"Cat": "a feline"}"#);
        assert!(matches!(result, Err(WordSourceError::InvalidKey { .. })));
    }

    #[test]
    fn test_key_with_space_rejected() {
        let result = WordSource::from_json_str("test", r#"{"big cat": "a feline"}"#);
        assert!(matches!(result, Err(WordSourceError::InvalidKey { .. })));
    }

    #[test]
    fn test_key_with_digit_rejected() {
        let result = WordSource::from_json_str("test", r#"{"cat3": "a feline"}"#);
        assert!(matches!(result, Err(WordSourceError::InvalidKey { .. })));
    }

    #[test]
    fn test_empty_key_rejected() {
        let result = WordSource::from_json_str("test", r#"{"": "a mystery"}"#);
        assert!(matches!(result, Err(WordSourceError::InvalidKey { .. })));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = WordSource::from_json_str("test", "not json");
        assert!(matches!(result, Err(WordSourceError::Parse { .. })));
    }

    #[test]
    fn test_builtin_lists_are_nonempty_and_valid() {
        // Packaging invariant: every shipped list loads and has entries.
        let catalog = Catalog::builtin();
        assert!(catalog.len() >= 2);
        for topic in ["animals", "capitals"] {
            let source = catalog.get(catalog.resolve(topic));
            assert_eq!(source.name(), topic);
            assert!(!source.is_empty());
            for entry in source.entries() {
                assert!(is_valid_answer(&entry.answer), "bad key: {}", entry.answer);
                assert!(!entry.hint.is_empty());
            }
        }
    }

    #[test]
    fn test_unknown_topic_resolves_to_default() {
        let catalog = Catalog::builtin();
        let index = catalog.resolve("unknown-id");
        assert_eq!(catalog.get(index).name(), DEFAULT_TOPIC);
    }

    #[test]
    fn test_added_source_resolvable() {
        let mut catalog = Catalog::builtin();
        let custom = WordSource::from_json_str("custom", r#"{"cat": "a feline"}"#).unwrap();
        catalog.add(custom);
        assert_eq!(catalog.get(catalog.resolve("custom")).name(), "custom");
    }
}
