//! Word scoring
//!
//! The general scorer sums Scrabble tile values. Keyset (Spelling Bee) results
//! can use a separate policy, chosen through `EngineConfig::keyset_scoring`.

use crate::core::Word;
use serde::{Deserialize, Serialize};

/// Scrabble tile values for `a` through `z`
pub const LETTER_VALUES: [u32; 26] = [
    1, 3, 3, 2, 1, 4, 2, 4, 1, 8, 5, 1, 3, 1, 1, 3, 10, 1, 1, 1, 1, 4, 4, 8, 4, 10,
];

/// Tile value of a letter; letters outside `a..=z` are worth 0
#[inline]
#[must_use]
pub fn letter_value(letter: char) -> u32 {
    if letter.is_ascii_lowercase() {
        LETTER_VALUES[(letter as u8 - b'a') as usize]
    } else {
        0
    }
}

/// Sum of tile values over every letter of the word
///
/// # Examples
/// ```
/// use lexicon_engine::core::Word;
/// use lexicon_engine::engine::score;
///
/// assert_eq!(score(&Word::new("quiz").unwrap()), 22);
/// ```
#[must_use]
pub fn score(word: &Word) -> u32 {
    word.letters().iter().map(|&letter| letter_value(letter)).sum()
}

/// Scoring policy for keyset results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeysetScoring {
    /// Minimum-length words score 1, longer words score their length
    Bee,
    /// Same tile-value sum as every other mode
    LetterValues,
}

impl KeysetScoring {
    /// Parse a policy name ("bee", or "letter-values"/"letters")
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bee" => Some(Self::Bee),
            "letter-values" | "letters" => Some(Self::LetterValues),
            _ => None,
        }
    }
}

/// Scorer selected for one compiled query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scorer {
    LetterValues,
    Keyset {
        policy: KeysetScoring,
        min_length: usize,
    },
}

impl Scorer {
    #[must_use]
    pub fn score(self, word: &Word) -> u32 {
        match self {
            Self::LetterValues
            | Self::Keyset {
                policy: KeysetScoring::LetterValues,
                ..
            } => score(word),
            Self::Keyset {
                policy: KeysetScoring::Bee,
                min_length,
            } => {
                let len = word.letter_count();
                if len <= min_length { 1 } else { len as u32 }
            }
        }
    }
}
