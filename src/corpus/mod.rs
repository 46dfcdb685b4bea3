//! Corpus store
//!
//! Owns the normalized, deduplicated word list for one language. A corpus is
//! built once from raw text and never mutated afterwards; switching language
//! builds a new one.

mod embedded;
pub mod loader;

pub use embedded::{SAMPLE, SAMPLE_COUNT, SAMPLE_LANGUAGE};

use crate::core::Word;
use crate::errors::EngineError;
use rustc_hash::FxHashSet;

/// Normalized word list for one language
#[derive(Debug, Clone)]
pub struct Corpus {
    language: String,
    words: Vec<Word>,
    index: FxHashSet<String>,
}

impl Corpus {
    /// Build a corpus from newline-delimited raw text
    ///
    /// Each line is trimmed, stripped of any `/annotation` suffix and
    /// lowercased. Entries shorter than `min_length` or containing
    /// non-alphabetic characters are dropped, duplicates keep their first
    /// position.
    ///
    /// # Errors
    /// Returns [`EngineError::Load`] if no entry survives normalization.
    ///
    /// # Examples
    /// ```
    /// use lexicon_engine::corpus::Corpus;
    ///
    /// let corpus = Corpus::load("en", "Cat\ncat/S\ndog\nx\n", 2).unwrap();
    /// assert_eq!(corpus.len(), 2);
    /// assert!(corpus.contains("cat"));
    /// ```
    pub fn load(language: &str, raw_text: &str, min_length: usize) -> Result<Self, EngineError> {
        let mut corpus = Self::empty(language);
        let mut skipped = 0usize;

        for line in raw_text.lines() {
            match loader::normalize_entry(line, min_length) {
                Some(word) => corpus.push(word),
                None if line.trim().is_empty() => {}
                None => skipped += 1,
            }
        }

        if corpus.is_empty() {
            return Err(EngineError::load(
                language,
                "word list is empty after normalization",
            ));
        }

        tracing::debug!(
            language,
            words = corpus.len(),
            skipped,
            "normalized word list"
        );
        Ok(corpus)
    }

    /// Build a corpus from already-validated words, deduplicating
    pub fn from_words(language: &str, words: impl IntoIterator<Item = Word>) -> Self {
        let mut corpus = Self::empty(language);
        for word in words {
            corpus.push(word);
        }
        corpus
    }

    fn empty(language: &str) -> Self {
        Self {
            language: language.to_string(),
            words: Vec::new(),
            index: FxHashSet::default(),
        }
    }

    fn push(&mut self, word: Word) {
        if self.index.insert(word.text().to_string()) {
            self.words.push(word);
        }
    }

    /// Language tag this corpus was loaded for
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// All words in load order
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.words.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Exact membership test on normalized text
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.index.contains(text)
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_normalizes_entries() {
        let raw = "  Hello \r\nWORLD/ABC\nhello\n\nit's\nx\nzebra/\n";
        let corpus = Corpus::load("en", raw, 2).unwrap();

        let texts: Vec<&str> = corpus.iter().map(Word::text).collect();
        assert_eq!(texts, ["hello", "world", "zebra"]);
        assert_eq!(corpus.language(), "en");
    }

    #[test]
    fn load_respects_min_length() {
        let raw = "at\ncat\ncats";
        assert_eq!(Corpus::load("en", raw, 2).unwrap().len(), 3);
        assert_eq!(Corpus::load("en", raw, 3).unwrap().len(), 2);
        assert_eq!(Corpus::load("en", raw, 4).unwrap().len(), 1);
    }

    #[test]
    fn load_empty_is_error() {
        assert!(matches!(
            Corpus::load("en", "", 2),
            Err(EngineError::Load { .. })
        ));
        assert!(matches!(
            Corpus::load("en", "a\n1\n\n", 2),
            Err(EngineError::Load { .. })
        ));
    }

    #[test]
    fn load_preserves_first_seen_order() {
        let corpus = Corpus::load("en", "tac\nact\ncat\nact\ntac", 2).unwrap();
        let texts: Vec<&str> = corpus.iter().map(Word::text).collect();
        assert_eq!(texts, ["tac", "act", "cat"]);
    }

    #[test]
    fn from_words_dedups() {
        let words = ["cat", "dog", "cat"].map(|w| Word::new(w).unwrap());
        let corpus = Corpus::from_words("en", words);
        assert_eq!(corpus.len(), 2);
        assert!(corpus.contains("dog"));
        assert!(!corpus.contains("cow"));
    }

    #[test]
    fn sample_corpus_loads() {
        let corpus = Corpus::from_words(SAMPLE_LANGUAGE, loader::words_from_slice(SAMPLE, 2));
        assert!(corpus.len() > 300);
        assert!(corpus.contains("honey"));
        assert!(corpus.contains("crane"));
    }
}
