//! Feasibility predicates
//!
//! One compiled predicate per query mode. Compiling validates the raw query
//! once; `accepts` is then a pure O(word length) test run against every word
//! of the corpus.

use super::scoring::Scorer;
use crate::config::{EngineConfig, SUBSET_WILDCARD};
use crate::core::letters::{fold, letter_set, parse_letters};
use crate::core::{ConstraintQuery, KeysetQuery, Mask, PatternQuery, Query, SubsetQuery, Word};
use crate::errors::EngineError;
use rustc_hash::{FxHashMap, FxHashSet};

/// A per-word feasibility test
pub trait Predicate {
    /// Whether `word` satisfies the query
    fn accepts(&self, word: &Word) -> bool;
}

fn literal(text: Option<&str>, what: &str) -> Result<Option<String>, EngineError> {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    if let Some(bad) = text.chars().find(|c| !c.is_alphabetic()) {
        return Err(EngineError::invalid(format!(
            "{what} {text:?} contains {bad:?}, expected letters only"
        )));
    }
    Ok(Some(text.chars().map(fold).collect()))
}

/// Letter-bag cover check with optional wildcards
#[derive(Debug, Clone)]
pub struct SubsetPredicate {
    supply: FxHashMap<char, u32>,
    wildcards: usize,
    tiles: usize,
    prefix: Option<String>,
    suffix: Option<String>,
}

impl SubsetPredicate {
    /// # Errors
    /// Returns [`EngineError::InvalidQuery`] for non-letter tiles, an empty
    /// rack, or more wildcards than the configured cap allows.
    pub fn compile(query: &SubsetQuery, config: &EngineConfig) -> Result<Self, EngineError> {
        let mut supply: FxHashMap<char, u32> = FxHashMap::default();
        let mut wildcards = query.wildcards;
        let mut letters = 0usize;

        for ch in query.letters.chars().filter(|c| !c.is_whitespace()) {
            if ch == SUBSET_WILDCARD {
                wildcards += 1;
            } else if ch.is_alphabetic() {
                *supply.entry(fold(ch)).or_insert(0) += 1;
                letters += 1;
            } else {
                return Err(EngineError::invalid(format!(
                    "letters {:?} contain {ch:?}, expected letters or '{SUBSET_WILDCARD}'",
                    query.letters
                )));
            }
        }

        let tiles = letters + wildcards;
        if tiles == 0 {
            return Err(EngineError::invalid(
                "subset query needs at least one letter or wildcard",
            ));
        }
        if let Some(cap) = config.wildcard_cap
            && wildcards > cap
        {
            return Err(EngineError::invalid(format!(
                "{wildcards} wildcards requested, at most {cap} allowed"
            )));
        }

        Ok(Self {
            supply,
            wildcards,
            tiles,
            prefix: literal(query.prefix.as_deref(), "prefix")?,
            suffix: literal(query.suffix.as_deref(), "suffix")?,
        })
    }

    /// Total tiles on the rack (letters plus wildcards)
    #[must_use]
    pub const fn tiles(&self) -> usize {
        self.tiles
    }

    #[must_use]
    pub const fn wildcards(&self) -> usize {
        self.wildcards
    }
}

impl Predicate for SubsetPredicate {
    fn accepts(&self, word: &Word) -> bool {
        if word.letter_count() > self.tiles {
            return false;
        }
        if let Some(prefix) = &self.prefix
            && !word.text().starts_with(prefix.as_str())
        {
            return false;
        }
        if let Some(suffix) = &self.suffix
            && !word.text().ends_with(suffix.as_str())
        {
            return false;
        }

        // Only counts matter, so covering letter by letter in any order is exact.
        let mut spare = self.wildcards;
        for (letter, needed) in word.letter_counts() {
            let have = self.supply.get(&letter).copied().unwrap_or(0);
            if needed > have {
                let short = (needed - have) as usize;
                if short > spare {
                    return false;
                }
                spare -= short;
            }
        }
        true
    }
}

/// Exact-length positional match
#[derive(Debug, Clone)]
pub struct PatternPredicate {
    mask: Mask,
}

impl PatternPredicate {
    /// # Errors
    /// Returns [`EngineError::InvalidQuery`] for an empty mask or a symbol
    /// that is neither a letter nor a wildcard.
    pub fn compile(query: &PatternQuery) -> Result<Self, EngineError> {
        let mask = Mask::parse(query.mask.trim()).map_err(|bad| {
            EngineError::invalid(format!(
                "mask {:?} contains {bad:?}, expected letters, '_' or '.'",
                query.mask
            ))
        })?;
        if mask.is_empty() {
            return Err(EngineError::invalid("mask is empty"));
        }
        Ok(Self { mask })
    }

    #[must_use]
    pub const fn mask(&self) -> &Mask {
        &self.mask
    }
}

impl Predicate for PatternPredicate {
    fn accepts(&self, word: &Word) -> bool {
        self.mask.matches(word)
    }
}

/// Wordle-style fixed, required and excluded letters
///
/// Requirement and exclusion are independent constraints: a letter that is
/// both required and excluded can never be satisfied.
#[derive(Debug, Clone)]
pub struct ConstraintPredicate {
    length: usize,
    fixed: Mask,
    required: Vec<char>,
    excluded: FxHashSet<char>,
}

impl ConstraintPredicate {
    /// # Errors
    /// Returns [`EngineError::InvalidQuery`] when the fixed positions do not
    /// have exactly `length` slots, or when a letter list holds non-letters.
    pub fn compile(query: &ConstraintQuery, config: &EngineConfig) -> Result<Self, EngineError> {
        let length = query.length.unwrap_or(config.constraint_length);
        if length == 0 {
            return Err(EngineError::invalid("target length must be at least 1"));
        }

        let positions = query.fixed_positions.trim();
        let fixed = if positions.is_empty() {
            Mask::blank(length)
        } else {
            Mask::parse(positions).map_err(|bad| {
                EngineError::invalid(format!(
                    "fixed positions {positions:?} contain {bad:?}, expected letters, '_' or '.'"
                ))
            })?
        };
        if fixed.len() != length {
            return Err(EngineError::invalid(format!(
                "fixed positions {positions:?} have {} slots, expected {length}",
                fixed.len()
            )));
        }

        let mut required = parse_letters(&query.required_letters).map_err(|bad| {
            EngineError::invalid(format!("required letters contain {bad:?}"))
        })?;
        required.sort_unstable();
        required.dedup();

        let excluded = letter_set(&query.excluded_letters).map_err(|bad| {
            EngineError::invalid(format!("excluded letters contain {bad:?}"))
        })?;

        Ok(Self {
            length,
            fixed,
            required,
            excluded,
        })
    }

    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }
}

impl Predicate for ConstraintPredicate {
    fn accepts(&self, word: &Word) -> bool {
        word.letter_count() == self.length
            && !word.letters().iter().any(|c| self.excluded.contains(c))
            && self.required.iter().all(|&c| word.has_letter(c))
            && self.fixed.agrees_with(word)
    }
}

/// Spelling-Bee-style allowed alphabet with one mandatory letter
#[derive(Debug, Clone)]
pub struct KeysetPredicate {
    required: char,
    allowed: FxHashSet<char>,
    min_length: usize,
}

impl KeysetPredicate {
    /// # Errors
    /// Returns [`EngineError::InvalidQuery`] when the required letter or an
    /// allowed letter is not a letter, or the minimum length is zero.
    pub fn compile(query: &KeysetQuery, config: &EngineConfig) -> Result<Self, EngineError> {
        if !query.required_letter.is_alphabetic() {
            return Err(EngineError::invalid(format!(
                "required letter {:?} is not a letter",
                query.required_letter
            )));
        }
        let required = fold(query.required_letter);

        let mut allowed = letter_set(&query.allowed_letters).map_err(|bad| {
            EngineError::invalid(format!("allowed letters contain {bad:?}"))
        })?;
        allowed.insert(required);

        let min_length = query.min_length.unwrap_or(config.keyset_min_length);
        if min_length == 0 {
            return Err(EngineError::invalid("minimum length must be at least 1"));
        }

        Ok(Self {
            required,
            allowed,
            min_length,
        })
    }

    #[must_use]
    pub const fn min_length(&self) -> usize {
        self.min_length
    }
}

impl Predicate for KeysetPredicate {
    fn accepts(&self, word: &Word) -> bool {
        word.letter_count() >= self.min_length
            && word.has_letter(self.required)
            && word.letters().iter().all(|c| self.allowed.contains(c))
    }
}

/// A validated query, ready to scan
///
/// Wraps the per-mode predicates so a scan can dispatch statically.
#[derive(Debug, Clone)]
pub enum CompiledQuery {
    Subset(SubsetPredicate),
    Pattern(PatternPredicate),
    Constraint(ConstraintPredicate),
    Keyset(KeysetPredicate),
}

impl CompiledQuery {
    /// Validate and compile a raw query
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidQuery`] when the query is malformed.
    pub fn compile(query: &Query, config: &EngineConfig) -> Result<Self, EngineError> {
        Ok(match query {
            Query::Subset(q) => Self::Subset(SubsetPredicate::compile(q, config)?),
            Query::Pattern(q) => Self::Pattern(PatternPredicate::compile(q)?),
            Query::ConstraintSolve(q) => Self::Constraint(ConstraintPredicate::compile(q, config)?),
            Query::KeysetSolve(q) => Self::Keyset(KeysetPredicate::compile(q, config)?),
        })
    }

    /// Scorer for this query's results
    #[must_use]
    pub const fn scorer(&self, config: &EngineConfig) -> Scorer {
        match self {
            Self::Keyset(p) => Scorer::Keyset {
                policy: config.keyset_scoring,
                min_length: p.min_length,
            },
            _ => Scorer::LetterValues,
        }
    }
}

impl Predicate for CompiledQuery {
    fn accepts(&self, word: &Word) -> bool {
        match self {
            Self::Subset(p) => p.accepts(word),
            Self::Pattern(p) => p.accepts(word),
            Self::Constraint(p) => p.accepts(word),
            Self::Keyset(p) => p.accepts(word),
        }
    }
}
