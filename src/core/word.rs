//! Corpus word representation
//!
//! A Word stores a normalized lowercase entry along with its letters, so the
//! predicates can index positions without re-decoding UTF-8 on every check.

use crate::config::DEFAULT_MIN_WORD_LENGTH;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;

/// A normalized corpus entry
///
/// Always lowercase, alphabetic only, and at least the configured minimum
/// length. Ordering and equality follow the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct Word {
    text: String,
    letters: Box<[char]>,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    TooShort { len: usize, min: usize },
    InvalidCharacter(char),
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { len, min } => {
                write!(f, "Word must be at least {min} letters, got {len}")
            }
            Self::InvalidCharacter(ch) => write!(f, "Word contains invalid character {ch:?}"),
        }
    }
}

impl std::error::Error for WordError {}

impl Word {
    /// Create a new Word using the default minimum length
    ///
    /// # Errors
    /// Returns `WordError` if the text is shorter than
    /// [`DEFAULT_MIN_WORD_LENGTH`] or contains non-alphabetic characters.
    ///
    /// # Examples
    /// ```
    /// use lexicon_engine::core::Word;
    ///
    /// let word = Word::new("Crane").unwrap();
    /// assert_eq!(word.text(), "crane");
    ///
    /// assert!(Word::new("a").is_err());
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, WordError> {
        Self::with_min_length(text, DEFAULT_MIN_WORD_LENGTH)
    }

    /// Create a new Word, rejecting entries shorter than `min_length` letters
    ///
    /// # Errors
    /// Returns `WordError` if the word is too short or contains a character
    /// that is not alphabetic (digits, punctuation, whitespace).
    pub fn with_min_length(text: impl Into<String>, min_length: usize) -> Result<Self, WordError> {
        let text: String = text.into().to_lowercase();

        if let Some(bad) = text.chars().find(|c| !c.is_alphabetic()) {
            return Err(WordError::InvalidCharacter(bad));
        }

        let letters: Box<[char]> = text.chars().collect();
        if letters.len() < min_length {
            return Err(WordError::TooShort {
                len: letters.len(),
                min: min_length,
            });
        }

        Ok(Self { text, letters })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word's letters
    #[inline]
    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Number of letters (not bytes)
    #[inline]
    #[must_use]
    pub fn letter_count(&self) -> usize {
        self.letters.len()
    }

    /// Get the letter at a specific position, if any
    #[inline]
    #[must_use]
    pub fn char_at(&self, position: usize) -> Option<char> {
        self.letters.get(position).copied()
    }

    /// Check if the word contains a specific letter
    #[inline]
    #[must_use]
    pub fn has_letter(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }

    /// Get the count of each letter in the word
    #[must_use]
    pub fn letter_counts(&self) -> FxHashMap<char, u32> {
        let mut counts = FxHashMap::default();
        for &ch in &self.letters {
            *counts.entry(ch).or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.text
    }
}
