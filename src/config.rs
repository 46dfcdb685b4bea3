//! Engine configuration
//!
//! Policy knobs that differ between deployments live here instead of being
//! baked into the predicates.

use crate::engine::KeysetScoring;

/// Shortest entry kept when normalizing a word list
pub const DEFAULT_MIN_WORD_LENGTH: usize = 2;

/// Target length for constraint solving when the query does not name one
pub const DEFAULT_CONSTRAINT_LENGTH: usize = 5;

/// Minimum word length for keyset solving when the query does not name one
pub const DEFAULT_KEYSET_MIN_LENGTH: usize = 4;

/// Tile symbol that stands for any letter in subset queries
pub const SUBSET_WILDCARD: char = '?';

/// Mask symbols that match any single letter
pub const MASK_WILDCARDS: [char; 2] = ['_', '.'];

/// Configuration shared by the corpus loader and the query engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Entries shorter than this are discarded at load time
    pub min_word_length: usize,
    /// Maximum wildcards per subset query (`None` = unbounded)
    pub wildcard_cap: Option<usize>,
    /// How keyset (Spelling Bee) results are scored
    pub keyset_scoring: KeysetScoring,
    /// Result cap applied when a request does not carry its own limit
    pub limit: Option<usize>,
    /// Default constraint-solve word length
    pub constraint_length: usize,
    /// Default keyset-solve minimum length
    pub keyset_min_length: usize,
}

impl EngineConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            wildcard_cap: None,
            keyset_scoring: KeysetScoring::Bee,
            limit: None,
            constraint_length: DEFAULT_CONSTRAINT_LENGTH,
            keyset_min_length: DEFAULT_KEYSET_MIN_LENGTH,
        }
    }

    #[must_use]
    pub const fn with_min_word_length(mut self, min_word_length: usize) -> Self {
        self.min_word_length = min_word_length;
        self
    }

    #[must_use]
    pub const fn with_wildcard_cap(mut self, wildcard_cap: Option<usize>) -> Self {
        self.wildcard_cap = wildcard_cap;
        self
    }

    #[must_use]
    pub const fn with_keyset_scoring(mut self, keyset_scoring: KeysetScoring) -> Self {
        self.keyset_scoring = keyset_scoring;
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.min_word_length, 2);
        assert_eq!(config.wildcard_cap, None);
        assert_eq!(config.keyset_scoring, KeysetScoring::Bee);
        assert_eq!(config.limit, None);
        assert_eq!(config.constraint_length, 5);
        assert_eq!(config.keyset_min_length, 4);
    }

    #[test]
    fn builder_overrides() {
        let config = EngineConfig::new()
            .with_min_word_length(3)
            .with_wildcard_cap(Some(2))
            .with_keyset_scoring(KeysetScoring::LetterValues)
            .with_limit(Some(100));

        assert_eq!(config.min_word_length, 3);
        assert_eq!(config.wildcard_cap, Some(2));
        assert_eq!(config.keyset_scoring, KeysetScoring::LetterValues);
        assert_eq!(config.limit, Some(100));
    }
}
