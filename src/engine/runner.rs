//! Query engine
//!
//! Runs one compiled predicate over the whole corpus, scores the survivors and
//! orders them. The scan is a single data-parallel pass; corpus order is kept
//! until the final sort.

use super::ordering::{OrderBy, ScoredWord};
use super::predicates::{CompiledQuery, Predicate};
use crate::config::EngineConfig;
use crate::core::Query;
use crate::corpus::Corpus;
use crate::errors::EngineError;
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// A query plus its presentation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub query: Query,
    pub order_by: OrderBy,
    /// Result cap; falls back to `EngineConfig::limit`
    pub limit: Option<usize>,
}

impl QueryRequest {
    pub fn new(query: impl Into<Query>) -> Self {
        Self {
            query: query.into(),
            order_by: OrderBy::default(),
            limit: None,
        }
    }

    #[must_use]
    pub const fn with_order(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

/// Ordered results of one scan
#[derive(Debug, Clone)]
pub struct QueryOutput {
    pub results: Vec<ScoredWord>,
    /// Match count before any limit was applied
    pub total: usize,
    pub elapsed: Duration,
}

impl QueryOutput {
    /// Matched words in result order
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.results.iter().map(|r| r.word.text())
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Whether the limit cut the result list short
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.results.len() < self.total
    }
}

/// Validates queries and scans a corpus with them
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEngine {
    config: EngineConfig,
}

impl QueryEngine {
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate and compile a query against this engine's configuration
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidQuery`] when the query is malformed.
    pub fn compile(&self, query: &Query) -> Result<CompiledQuery, EngineError> {
        CompiledQuery::compile(query, &self.config)
    }

    /// Compile and run a request against `corpus`
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidQuery`] when the query is malformed.
    ///
    /// # Examples
    /// ```
    /// use lexicon_engine::core::SubsetQuery;
    /// use lexicon_engine::corpus::Corpus;
    /// use lexicon_engine::engine::{OrderBy, QueryEngine, QueryRequest};
    ///
    /// let corpus = Corpus::load("en", "cat\nact\ntac\ncats", 2).unwrap();
    /// let engine = QueryEngine::default();
    ///
    /// let request = QueryRequest::new(SubsetQuery::new("tac")).with_order(OrderBy::Alphabetical);
    /// let output = engine.run(&corpus, &request).unwrap();
    ///
    /// assert_eq!(output.words().collect::<Vec<_>>(), ["act", "cat", "tac"]);
    /// ```
    pub fn run(&self, corpus: &Corpus, request: &QueryRequest) -> Result<QueryOutput, EngineError> {
        let compiled = self.compile(&request.query)?;
        Ok(self.execute(corpus, &compiled, request.order_by, request.limit))
    }

    /// Scan `corpus` with an already compiled query
    #[must_use]
    pub fn execute(
        &self,
        corpus: &Corpus,
        compiled: &CompiledQuery,
        order_by: OrderBy,
        limit: Option<usize>,
    ) -> QueryOutput {
        let start = Instant::now();
        let scorer = compiled.scorer(&self.config);

        let mut results: Vec<ScoredWord> = corpus
            .words()
            .par_iter()
            .filter(|word| compiled.accepts(word))
            .map(|word| ScoredWord::new(word.clone(), scorer.score(word)))
            .collect();

        order_by.sort(&mut results);

        let total = results.len();
        if let Some(limit) = limit.or(self.config.limit) {
            results.truncate(limit);
        }

        let elapsed = start.elapsed();
        tracing::debug!(
            language = corpus.language(),
            scanned = corpus.len(),
            matched = total,
            returned = results.len(),
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "scan finished"
        );

        QueryOutput {
            results,
            total,
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConstraintQuery, KeysetQuery, PatternQuery, SubsetQuery, Word};
    use crate::engine::KeysetScoring;
    use crate::engine::score;
    use rustc_hash::FxHashSet;

    fn corpus(words: &[&str]) -> Corpus {
        Corpus::from_words("en", words.iter().map(|w| Word::new(*w).unwrap()))
    }

    fn matched(engine: &QueryEngine, corpus: &Corpus, query: impl Into<Query>) -> FxHashSet<String> {
        engine
            .run(corpus, &QueryRequest::new(query))
            .unwrap()
            .words()
            .map(str::to_string)
            .collect()
    }

    fn set(words: &[&str]) -> FxHashSet<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn scenario_subset() {
        let corpus = corpus(&["cat", "act", "tac", "cats"]);
        let engine = QueryEngine::default();
        assert_eq!(
            matched(&engine, &corpus, SubsetQuery::new("tac")),
            set(&["cat", "act", "tac"])
        );
    }

    #[test]
    fn scenario_pattern() {
        let corpus = corpus(&["hello", "hells", "hxllo"]);
        let engine = QueryEngine::default();
        assert_eq!(
            matched(&engine, &corpus, PatternQuery::new("h_llo")),
            set(&["hello", "hxllo"])
        );
    }

    #[test]
    fn scenario_constraint_solve() {
        let corpus = corpus(&["crane", "crate", "grate"]);
        let engine = QueryEngine::default();
        let query = ConstraintQuery::new("_r_t_")
            .with_required("a")
            .with_excluded("c");
        assert_eq!(matched(&engine, &corpus, query), set(&["grate"]));
    }

    #[test]
    fn scenario_keyset_solve() {
        let corpus = corpus(&["honey", "bee", "phony"]);
        let engine = QueryEngine::default();
        let query = KeysetQuery::new('n', "h,o,n,e,y,p").with_min_length(4);
        assert_eq!(matched(&engine, &corpus, query), set(&["honey", "phony"]));
    }

    #[test]
    fn subset_results_are_covered_by_rack() {
        let corpus = corpus(&["cat", "act", "coat", "taco", "attic", "tic", "at", "to"]);
        let engine = QueryEngine::default();
        let output = engine
            .run(&corpus, &QueryRequest::new(SubsetQuery::new("taco?")))
            .unwrap();

        for result in &output.results {
            let mut rack: Vec<char> = "taco".chars().collect();
            let mut wildcards = 1;
            for letter in result.word.letters() {
                if let Some(i) = rack.iter().position(|c| c == letter) {
                    rack.swap_remove(i);
                } else {
                    assert!(wildcards > 0, "{} not covered", result.word);
                    wildcards -= 1;
                }
            }
            assert!(result.word.letter_count() <= 5);
        }
        assert!(output.words().any(|w| w == "taco"));
        assert!(output.words().any(|w| w == "tic"));
        assert!(!output.words().any(|w| w == "attic"));
    }

    #[test]
    fn constraint_solve_is_monotonic() {
        let corpus = corpus(&["crane", "crate", "grate", "irate", "slate", "trace", "react"]);
        let engine = QueryEngine::default();

        let base = matched(&engine, &corpus, ConstraintQuery::new("_____").with_required("a"));
        let more_required = matched(
            &engine,
            &corpus,
            ConstraintQuery::new("_____").with_required("a,t"),
        );
        let more_excluded = matched(
            &engine,
            &corpus,
            ConstraintQuery::new("_____")
                .with_required("a")
                .with_excluded("s"),
        );

        assert!(more_required.is_subset(&base));
        assert!(more_excluded.is_subset(&base));
        assert!(!more_excluded.contains("slate"));
        assert!(!more_required.contains("crane"));
    }

    #[test]
    fn keyset_results_use_only_allowed_letters() {
        let corpus = corpus(&["honey", "phony", "phone", "nope", "hone", "none", "open"]);
        let engine = QueryEngine::default();
        let output = engine
            .run(&corpus, &QueryRequest::new(KeysetQuery::new('n', "hoeyp")))
            .unwrap();

        let allowed: FxHashSet<char> = "hoeypn".chars().collect();
        for result in &output.results {
            assert!(result.word.has_letter('n'));
            assert!(result.word.letters().iter().all(|c| allowed.contains(c)));
        }
        assert_eq!(output.total, 7);
    }

    #[test]
    fn keyset_bee_scoring_is_configurable() {
        let corpus = corpus(&["hone", "honey"]);
        let query = QueryRequest::new(KeysetQuery::new('n', "hoey")).with_order(OrderBy::Alphabetical);

        let bee = QueryEngine::default().run(&corpus, &query).unwrap();
        let scores: Vec<u32> = bee.results.iter().map(|r| r.score).collect();
        assert_eq!(scores, [1, 5]);

        let letter_values = QueryEngine::new(
            EngineConfig::default().with_keyset_scoring(KeysetScoring::LetterValues),
        )
        .run(&corpus, &query)
        .unwrap();
        let scores: Vec<u32> = letter_values.results.iter().map(|r| r.score).collect();
        assert_eq!(scores, [7, 11]);
    }

    #[test]
    fn results_carry_letter_scores() {
        let corpus = corpus(&["jazz", "cat"]);
        let output = QueryEngine::default()
            .run(&corpus, &QueryRequest::new(PatternQuery::new("j___")))
            .unwrap();
        assert_eq!(output.results.len(), 1);
        assert_eq!(output.results[0].score, score(&Word::new("jazz").unwrap()));
    }

    #[test]
    fn ordering_laws_hold() {
        let corpus = corpus(&["tea", "eat", "ate", "at", "ta", "eta", "tae", "teat"]);
        let engine = QueryEngine::default();

        let by_length = engine
            .run(
                &corpus,
                &QueryRequest::new(SubsetQuery::new("eat")).with_order(OrderBy::ByLength),
            )
            .unwrap();
        let lengths: Vec<usize> = by_length.results.iter().map(|r| r.word.letter_count()).collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));

        let alphabetical = engine
            .run(
                &corpus,
                &QueryRequest::new(SubsetQuery::new("eat")).with_order(OrderBy::Alphabetical),
            )
            .unwrap();
        let words: Vec<&str> = alphabetical.words().collect();
        assert!(words.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn same_query_twice_is_identical() {
        let corpus = corpus(&["stone", "notes", "onset", "tones", "seton", "stones"]);
        let engine = QueryEngine::default();
        let request = QueryRequest::new(SubsetQuery::new("stone"));

        let first = engine.run(&corpus, &request).unwrap();
        let second = engine.run(&corpus, &request).unwrap();
        assert_eq!(first.results, second.results);
    }

    #[test]
    fn limit_truncates_after_ordering() {
        let corpus = corpus(&["aa", "aaa", "aaaa", "aaaaa"]);
        let engine = QueryEngine::default();
        let request = QueryRequest::new(PatternQuery::new("a")).with_limit(Some(1));
        let output = engine.run(&corpus, &request).unwrap();
        assert_eq!(output.total, 0);

        let request = QueryRequest::new(SubsetQuery::new("aaaaa"))
            .with_order(OrderBy::ByLength)
            .with_limit(Some(2));
        let output = engine.run(&corpus, &request).unwrap();
        assert_eq!(output.total, 4);
        assert!(output.is_truncated());
        assert_eq!(output.words().collect::<Vec<_>>(), ["aaaaa", "aaaa"]);
    }

    #[test]
    fn config_limit_applies_when_request_has_none() {
        let corpus = corpus(&["ab", "ba", "abba"]);
        let engine = QueryEngine::new(EngineConfig::default().with_limit(Some(1)));
        let output = engine
            .run(&corpus, &QueryRequest::new(SubsetQuery::new("abba")))
            .unwrap();
        assert_eq!(output.results.len(), 1);
        assert_eq!(output.total, 3);
    }

    #[test]
    fn zero_matches_is_not_an_error() {
        let corpus = corpus(&["cat"]);
        let output = QueryEngine::default()
            .run(&corpus, &QueryRequest::new(PatternQuery::new("zzz")))
            .unwrap();
        assert!(output.results.is_empty());
        assert_eq!(output.total, 0);
    }

    #[test]
    fn malformed_query_is_invalid() {
        let corpus = corpus(&["crane"]);
        let err = QueryEngine::default()
            .run(&corpus, &QueryRequest::new(ConstraintQuery::new("__")))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidQuery(_)));
    }
}
