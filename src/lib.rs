//! Lexicon Engine
//!
//! Word search over a normalized word list: letter-rack subsets (unscramble),
//! positional patterns, Wordle-style constraint solving and Spelling-Bee-style
//! keyset solving. Results are scored and ordered. A [`dispatch::Dispatcher`]
//! owns the word-list lifecycle and runs scans off the caller's task.
//!
//! # Quick Start
//!
//! ```rust
//! use lexicon_engine::core::ConstraintQuery;
//! use lexicon_engine::corpus::Corpus;
//! use lexicon_engine::engine::{QueryEngine, QueryRequest};
//!
//! let corpus = Corpus::load("en", "crane\ncrate\ngrate", 2).unwrap();
//! let engine = QueryEngine::default();
//!
//! let query = ConstraintQuery::new("_r_t_").with_required("a").with_excluded("c");
//! let output = engine.run(&corpus, &QueryRequest::new(query)).unwrap();
//! assert_eq!(output.words().collect::<Vec<_>>(), ["grate"]);
//! ```
//!
//! Through the dispatcher:
//!
//! ```rust
//! use lexicon_engine::config::EngineConfig;
//! use lexicon_engine::core::PatternQuery;
//! use lexicon_engine::dispatch::{Dispatcher, StaticSource};
//! use lexicon_engine::engine::QueryRequest;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let source = StaticSource::new().with_language("en", "hello\nhells\nhxllo");
//! let dispatcher = Dispatcher::new(source, EngineConfig::default());
//!
//! dispatcher.load("en").await.unwrap();
//! let output = dispatcher.query(QueryRequest::new(PatternQuery::new("h_llo"))).await.unwrap();
//! assert_eq!(output.total, 2);
//! # });
//! ```

// Core domain types
pub mod core;

// Word lists
pub mod corpus;

// Predicates, scoring and ordering
pub mod engine;

// Corpus lifecycle and request dispatch
pub mod dispatch;

// Engine settings
pub mod config;

// Error taxonomy
pub mod errors;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
