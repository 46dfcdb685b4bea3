//! Query engine
//!
//! Feasibility predicates, scoring and ordering, plus the runner that applies
//! them across a corpus.

mod anagram;
mod ordering;
pub mod predicates;
mod runner;
mod scoring;

pub use anagram::are_anagrams;
pub use ordering::{OrderBy, ScoredWord};
pub use predicates::{CompiledQuery, Predicate};
pub use runner::{QueryEngine, QueryOutput, QueryRequest};
pub use scoring::{KeysetScoring, LETTER_VALUES, Scorer, letter_value, score};
