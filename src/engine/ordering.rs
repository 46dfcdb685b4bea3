//! Result ordering

use crate::core::Word;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A matched word and its score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredWord {
    pub word: Word,
    pub score: u32,
}

impl ScoredWord {
    #[must_use]
    pub const fn new(word: Word, score: u32) -> Self {
        Self { word, score }
    }
}

/// How results are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderBy {
    /// Longest first, alphabetical among equal lengths
    #[serde(alias = "length")]
    ByLength,
    /// Highest score first, alphabetical among equal scores
    #[default]
    #[serde(alias = "score")]
    ByScore,
    /// Ascending lexicographic order
    #[serde(alias = "alpha")]
    Alphabetical,
}

impl OrderBy {
    /// Parse an ordering name
    ///
    /// Supported names: "by-length"/"length", "by-score"/"score",
    /// "alphabetical"/"alpha".
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "by-length" | "length" => Some(Self::ByLength),
            "by-score" | "score" => Some(Self::ByScore),
            "alphabetical" | "alpha" => Some(Self::Alphabetical),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ByLength => "by-length",
            Self::ByScore => "by-score",
            Self::Alphabetical => "alphabetical",
        }
    }

    /// Compare two results under this ordering
    #[must_use]
    pub fn compare(self, a: &ScoredWord, b: &ScoredWord) -> Ordering {
        match self {
            Self::ByLength => b
                .word
                .letter_count()
                .cmp(&a.word.letter_count())
                .then_with(|| a.word.cmp(&b.word)),
            Self::ByScore => b.score.cmp(&a.score).then_with(|| a.word.cmp(&b.word)),
            Self::Alphabetical => a.word.cmp(&b.word),
        }
    }

    /// Sort results in place
    pub fn sort(self, results: &mut [ScoredWord]) {
        results.par_sort_unstable_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::score;

    fn scored(texts: &[&str]) -> Vec<ScoredWord> {
        texts
            .iter()
            .map(|t| {
                let word = Word::new(*t).unwrap();
                let s = score(&word);
                ScoredWord::new(word, s)
            })
            .collect()
    }

    fn texts(results: &[ScoredWord]) -> Vec<&str> {
        results.iter().map(|r| r.word.text()).collect()
    }

    #[test]
    fn by_length_desc_with_alphabetical_ties() {
        let mut results = scored(&["at", "cat", "act", "cats", "ta"]);
        OrderBy::ByLength.sort(&mut results);
        assert_eq!(texts(&results), ["cats", "act", "cat", "at", "ta"]);
    }

    #[test]
    fn by_score_desc() {
        // jazz 29, quiz 22, cat 5, act 5
        let mut results = scored(&["cat", "quiz", "act", "jazz"]);
        OrderBy::ByScore.sort(&mut results);
        assert_eq!(texts(&results), ["jazz", "quiz", "act", "cat"]);
    }

    #[test]
    fn alphabetical_ascending() {
        let mut results = scored(&["tac", "cat", "act"]);
        OrderBy::Alphabetical.sort(&mut results);
        assert_eq!(texts(&results), ["act", "cat", "tac"]);
    }

    #[test]
    fn from_name_and_serde_agree() {
        for order in [OrderBy::ByLength, OrderBy::ByScore, OrderBy::Alphabetical] {
            assert_eq!(OrderBy::from_name(order.name()), Some(order));
            let json = serde_json::to_string(&order).unwrap();
            assert_eq!(json, format!("\"{}\"", order.name()));
        }
        assert_eq!(OrderBy::from_name("length"), Some(OrderBy::ByLength));
        assert_eq!(OrderBy::from_name("random"), None);
        assert_eq!(
            serde_json::from_str::<OrderBy>("\"score\"").unwrap(),
            OrderBy::ByScore
        );
    }

    #[test]
    fn scored_word_serializes_flat() {
        let result = ScoredWord::new(Word::new("cat").unwrap(), 5);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({ "word": "cat", "score": 5 })
        );
    }
}
