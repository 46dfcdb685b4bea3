//! Benchmark command
//!
//! Builds random queries from words of the loaded corpus and times them
//! through the dispatcher.

use crate::core::{ConstraintQuery, KeysetQuery, PatternQuery, Query, SubsetQuery, Word};
use crate::dispatch::{CorpusSource, Dispatcher};
use crate::engine::QueryRequest;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Per-mode timings
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModeStats {
    pub queries: usize,
    pub matches: usize,
    pub elapsed: Duration,
}

impl ModeStats {
    #[must_use]
    pub fn average_ms(&self) -> f64 {
        if self.queries == 0 {
            0.0
        } else {
            self.elapsed.as_secs_f64() * 1000.0 / self.queries as f64
        }
    }
}

/// Result of a benchmark run
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub language: String,
    pub corpus_size: usize,
    pub total_queries: usize,
    pub total_matches: usize,
    pub by_mode: BTreeMap<&'static str, ModeStats>,
    /// Slowest single query and its scan time
    pub slowest: Option<(Query, Duration)>,
    pub duration: Duration,
    pub queries_per_second: f64,
}

fn shuffled_letters(word: &Word, rng: &mut StdRng) -> String {
    let mut letters = word.letters().to_vec();
    letters.shuffle(rng);
    letters.into_iter().collect()
}

fn blanked(word: &Word, keep: f64, rng: &mut StdRng) -> String {
    word.letters()
        .iter()
        .map(|&c| if rng.random_bool(keep) { c } else { '_' })
        .collect()
}

fn absent_letter(word: &Word, rng: &mut StdRng) -> Option<char> {
    let absent: Vec<char> = ('a'..='z').filter(|&c| !word.has_letter(c)).collect();
    absent.choose(rng).copied()
}

/// Derive one random query from `word`
///
/// Every query except an unlucky keyset pick matches at least `word` itself.
pub fn random_query(word: &Word, rng: &mut StdRng) -> Query {
    match rng.random_range(0..4) {
        0 => SubsetQuery::new(shuffled_letters(word, rng))
            .with_wildcards(rng.random_range(0..=1))
            .into(),
        1 => PatternQuery::new(blanked(word, 0.5, rng)).into(),
        2 => {
            let mut query = ConstraintQuery::new(blanked(word, 0.3, rng))
                .with_length(word.letter_count());
            if let Some(&required) = word.letters().choose(rng) {
                query = query.with_required(required.to_string());
            }
            if let Some(excluded) = absent_letter(word, rng) {
                query = query.with_excluded(excluded.to_string());
            }
            query.into()
        }
        _ => {
            let mut allowed: Vec<char> = word.letters().to_vec();
            allowed.sort_unstable();
            allowed.dedup();
            while allowed.len() < 7 {
                let Some(extra) = absent_letter(word, rng) else { break };
                if !allowed.contains(&extra) {
                    allowed.push(extra);
                }
            }
            let required = word.letters().choose(rng).copied().unwrap_or('a');
            KeysetQuery::new(required, allowed.into_iter().collect::<String>()).into()
        }
    }
}

/// Generate `count` queries from random corpus words, reproducibly for a seed
pub fn generate_queries(words: &[Word], count: usize, seed: u64) -> Vec<Query> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .filter_map(|_| words.choose(&mut rng).map(|word| random_query(word, &mut rng)))
        .collect()
}

/// Load `language` and time `count` random queries against it
///
/// # Errors
/// Fails if the word list cannot be loaded or a generated query is rejected.
pub async fn run_benchmark<S: CorpusSource>(
    dispatcher: &Dispatcher<S>,
    language: &str,
    count: usize,
    seed: u64,
    show_progress: bool,
) -> Result<BenchmarkResult> {
    let load = dispatcher
        .load(language)
        .await
        .with_context(|| format!("loading word list `{language}`"))?;
    let corpus = dispatcher
        .snapshot()
        .context("word list was replaced during the benchmark")?;
    let queries = generate_queries(corpus.words(), count, seed);

    let pb = if show_progress {
        ProgressBar::new(queries.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")?
            .progress_chars("█▓▒░"),
    );

    let mut by_mode: BTreeMap<&'static str, ModeStats> = BTreeMap::new();
    let mut slowest: Option<(Query, Duration)> = None;
    let mut total_matches = 0;
    let start = Instant::now();

    for query in queries {
        let kind = query.kind();
        pb.set_message(kind);

        let output = dispatcher
            .query(QueryRequest::new(query.clone()))
            .await
            .with_context(|| format!("running {query}"))?;

        let stats = by_mode.entry(kind).or_default();
        stats.queries += 1;
        stats.matches += output.total;
        stats.elapsed += output.elapsed;
        total_matches += output.total;

        if slowest.as_ref().is_none_or(|(_, worst)| output.elapsed > *worst) {
            slowest = Some((query, output.elapsed));
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let duration = start.elapsed();
    let total_queries: usize = by_mode.values().map(|s| s.queries).sum();
    tracing::info!(
        queries = total_queries,
        elapsed_ms = duration.as_millis() as u64,
        "benchmark finished"
    );

    Ok(BenchmarkResult {
        language: load.language,
        corpus_size: load.word_count,
        total_queries,
        total_matches,
        by_mode,
        slowest,
        duration,
        queries_per_second: if duration.is_zero() {
            0.0
        } else {
            total_queries as f64 / duration.as_secs_f64()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::corpus::{SAMPLE, SAMPLE_LANGUAGE};
    use crate::corpus::loader::words_from_slice;
    use crate::dispatch::StaticSource;
    use crate::engine::{Predicate, QueryEngine};

    #[test]
    fn generation_is_reproducible() {
        let words = words_from_slice(&SAMPLE[..50], 2);
        assert_eq!(generate_queries(&words, 20, 7), generate_queries(&words, 20, 7));
        assert_eq!(generate_queries(&words, 20, 7).len(), 20);
    }

    #[test]
    fn no_words_no_queries() {
        assert!(generate_queries(&[], 10, 1).is_empty());
    }

    #[test]
    fn generated_queries_are_valid_and_mostly_self_matching() {
        let words = words_from_slice(SAMPLE, 2);
        let engine = QueryEngine::default();
        let mut rng = StdRng::seed_from_u64(42);

        for word in words.iter().take(100) {
            let query = random_query(word, &mut rng);
            let compiled = engine.compile(&query).unwrap();
            if !matches!(query, Query::KeysetSolve(_)) {
                assert!(compiled.accepts(word), "{query} should accept {word}");
            }
        }
    }

    #[tokio::test]
    async fn benchmark_counts_every_query() {
        let dispatcher = Dispatcher::new(StaticSource::embedded(), EngineConfig::default());
        let result = run_benchmark(&dispatcher, SAMPLE_LANGUAGE, 25, 3, false)
            .await
            .unwrap();

        assert_eq!(result.total_queries, 25);
        assert_eq!(result.corpus_size, dispatcher.snapshot().unwrap().len());
        assert_eq!(result.by_mode.values().map(|s| s.queries).sum::<usize>(), 25);
        assert_eq!(
            result.by_mode.values().map(|s| s.matches).sum::<usize>(),
            result.total_matches
        );
        assert!(result.slowest.is_some());
    }
}
