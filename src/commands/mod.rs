//! Command implementations

pub mod anagram;
pub mod benchmark;
pub mod lookup;
pub mod serve;

pub use anagram::{AnagramCheck, check_anagrams, find_anagrams};
pub use benchmark::{BenchmarkResult, ModeStats, generate_queries, run_benchmark};
pub use lookup::{LookupResult, run_lookup};
pub use serve::{ServeStats, run_serve};
