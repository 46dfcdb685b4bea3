//! Query types, one variant per search mode
//!
//! These are the raw, caller-facing shapes (what arrives in a protocol payload
//! or from the command line). The engine validates and compiles them before a
//! scan; see `engine::predicates`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter-bag subset match (unscramble), with optional wildcards
///
/// `letters` may contain `?`, each adding one wildcard on top of `wildcards`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsetQuery {
    pub letters: String,
    #[serde(default)]
    pub wildcards: usize,
    #[serde(default, alias = "start")]
    pub prefix: Option<String>,
    #[serde(default, alias = "end")]
    pub suffix: Option<String>,
}

impl SubsetQuery {
    pub fn new(letters: impl Into<String>) -> Self {
        Self {
            letters: letters.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_wildcards(mut self, wildcards: usize) -> Self {
        self.wildcards = wildcards;
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }
}

/// Positional pattern match (`h_llo`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternQuery {
    #[serde(alias = "pattern")]
    pub mask: String,
}

impl PatternQuery {
    pub fn new(mask: impl Into<String>) -> Self {
        Self { mask: mask.into() }
    }
}

/// Wordle-style solve: fixed positions plus required and excluded letters
///
/// `length` falls back to the engine's configured default (5) when absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintQuery {
    #[serde(default)]
    pub length: Option<usize>,
    #[serde(alias = "green")]
    pub fixed_positions: String,
    #[serde(default, alias = "yellow")]
    pub required_letters: String,
    #[serde(default, alias = "gray")]
    pub excluded_letters: String,
}

impl ConstraintQuery {
    pub fn new(fixed_positions: impl Into<String>) -> Self {
        Self {
            fixed_positions: fixed_positions.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_required(mut self, letters: impl Into<String>) -> Self {
        self.required_letters = letters.into();
        self
    }

    #[must_use]
    pub fn with_excluded(mut self, letters: impl Into<String>) -> Self {
        self.excluded_letters = letters.into();
        self
    }

    #[must_use]
    pub const fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }
}

/// Spelling-Bee-style solve: one mandatory letter, restricted alphabet
///
/// The required letter is always part of the allowed alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeysetQuery {
    #[serde(alias = "center")]
    pub required_letter: char,
    #[serde(alias = "outer")]
    pub allowed_letters: String,
    #[serde(default)]
    pub min_length: Option<usize>,
}

impl KeysetQuery {
    pub fn new(required_letter: char, allowed_letters: impl Into<String>) -> Self {
        Self {
            required_letter,
            allowed_letters: allowed_letters.into(),
            min_length: None,
        }
    }

    #[must_use]
    pub const fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }
}

/// A search over the corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Subset(SubsetQuery),
    Pattern(PatternQuery),
    ConstraintSolve(ConstraintQuery),
    KeysetSolve(KeysetQuery),
}

impl Query {
    /// Protocol name of this query mode
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Subset(_) => "subset",
            Self::Pattern(_) => "pattern",
            Self::ConstraintSolve(_) => "constraint-solve",
            Self::KeysetSolve(_) => "keyset-solve",
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subset(q) => {
                write!(f, "subset {:?}", q.letters)?;
                if q.wildcards > 0 {
                    write!(f, " +{} wildcards", q.wildcards)?;
                }
                if let Some(prefix) = &q.prefix {
                    write!(f, " prefix {prefix:?}")?;
                }
                if let Some(suffix) = &q.suffix {
                    write!(f, " suffix {suffix:?}")?;
                }
                Ok(())
            }
            Self::Pattern(q) => write!(f, "pattern {:?}", q.mask),
            Self::ConstraintSolve(q) => write!(
                f,
                "constraint-solve {:?} required {:?} excluded {:?}",
                q.fixed_positions, q.required_letters, q.excluded_letters
            ),
            Self::KeysetSolve(q) => write!(
                f,
                "keyset-solve {:?} + {:?}",
                q.required_letter, q.allowed_letters
            ),
        }
    }
}

impl From<SubsetQuery> for Query {
    fn from(query: SubsetQuery) -> Self {
        Self::Subset(query)
    }
}

impl From<PatternQuery> for Query {
    fn from(query: PatternQuery) -> Self {
        Self::Pattern(query)
    }
}

impl From<ConstraintQuery> for Query {
    fn from(query: ConstraintQuery) -> Self {
        Self::ConstraintSolve(query)
    }
}

impl From<KeysetQuery> for Query {
    fn from(query: KeysetQuery) -> Self {
        Self::KeysetSolve(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn subset_payload_accepts_legacy_names() {
        let query: SubsetQuery =
            serde_json::from_value(json!({ "letters": "tac?", "start": "c", "end": "t" }))
                .unwrap();
        assert_eq!(query.letters, "tac?");
        assert_eq!(query.wildcards, 0);
        assert_eq!(query.prefix.as_deref(), Some("c"));
        assert_eq!(query.suffix.as_deref(), Some("t"));
    }

    #[test]
    fn constraint_payload_defaults() {
        let query: ConstraintQuery =
            serde_json::from_value(json!({ "fixedPositions": "_r_t_" })).unwrap();
        assert_eq!(query.length, None);
        assert!(query.required_letters.is_empty());
        assert!(query.excluded_letters.is_empty());
    }

    #[test]
    fn keyset_payload_reads_single_char() {
        let query: KeysetQuery = serde_json::from_value(
            json!({ "requiredLetter": "n", "allowedLetters": "hoeyp", "minLength": 5 }),
        )
        .unwrap();
        assert_eq!(query.required_letter, 'n');
        assert_eq!(query.min_length, Some(5));
    }

    #[test]
    fn query_kind_names() {
        assert_eq!(Query::from(SubsetQuery::new("abc")).kind(), "subset");
        assert_eq!(Query::from(PatternQuery::new("a_c")).kind(), "pattern");
        assert_eq!(
            Query::from(ConstraintQuery::new("_____")).kind(),
            "constraint-solve"
        );
        assert_eq!(
            Query::from(KeysetQuery::new('a', "bcd")).kind(),
            "keyset-solve"
        );
    }

    #[test]
    fn query_display() {
        let query = Query::from(SubsetQuery::new("tac").with_wildcards(1).with_prefix("c"));
        assert_eq!(query.to_string(), "subset \"tac\" +1 wildcards prefix \"c\"");
    }
}
