//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_anagram_check, print_anagram_matches, print_benchmark_result, print_lookup_result,
};
