//! Core domain types
//!
//! Words, positional masks, letter-list parsing and the raw query shapes.
//! Everything here is pure and independent of the corpus and the dispatcher.

pub mod letters;
mod mask;
mod query;
mod word;

pub use mask::Mask;
pub use query::{ConstraintQuery, KeysetQuery, PatternQuery, Query, SubsetQuery};
pub use word::{Word, WordError};
