//! Corpus lifecycle and non-blocking query execution
//!
//! The dispatcher owns the active corpus behind a `watch` channel. Loads move
//! the state `Unloaded -> Loading -> Ready` (and `Ready -> Loading` on a
//! language switch); queries snapshot the ready corpus and scan it on the
//! blocking pool, so the calling task never runs a scan itself.
//!
//! Swapping the active corpus replaces an `Arc`. Scans already running keep
//! their own snapshot of the previous corpus until they finish.
//!
//! Each load runs on its own task. A caller that stops waiting does not
//! cancel it, so the state always leaves `Loading`.

use super::source::CorpusSource;
use crate::config::EngineConfig;
use crate::corpus::Corpus;
use crate::engine::{QueryEngine, QueryOutput, QueryRequest};
use crate::errors::EngineError;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

/// Lifecycle of the active corpus
#[derive(Debug, Clone)]
pub enum LoadState {
    Unloaded,
    Loading {
        language: String,
        generation: u64,
        /// Corpus restored if this load fails
        previous: Option<Arc<Corpus>>,
    },
    Ready {
        corpus: Arc<Corpus>,
    },
}

impl LoadState {
    /// Generation of the in-flight load of `language`, if any
    fn loading_generation(&self, language: &str) -> Option<u64> {
        match self {
            Self::Loading {
                language: current,
                generation,
                ..
            } if current == language => Some(*generation),
            _ => None,
        }
    }

    /// Serializable snapshot of this state
    #[must_use]
    pub fn readiness(&self) -> Readiness {
        match self {
            Self::Unloaded => Readiness::Unloaded,
            Self::Loading { language, .. } => Readiness::Loading {
                language: language.clone(),
            },
            Self::Ready { corpus } => Readiness::Ready {
                language: corpus.language().to_string(),
                words: corpus.len(),
            },
        }
    }
}

/// Readiness as reported to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum Readiness {
    Unloaded,
    Loading { language: String },
    Ready { language: String, words: usize },
}

/// Outcome of a successful load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSummary {
    pub language: String,
    pub word_count: usize,
    /// True when no fetch was needed (already loaded, or joined an in-flight load)
    pub cached: bool,
}

impl LoadSummary {
    fn new(corpus: &Corpus, cached: bool) -> Self {
        Self {
            language: corpus.language().to_string(),
            word_count: corpus.len(),
            cached,
        }
    }
}

enum Admission {
    Cached(LoadSummary),
    Join { generation: u64 },
    Start { generation: u64 },
}

struct Inner<S> {
    source: S,
    engine: QueryEngine,
    state: watch::Sender<LoadState>,
    generations: AtomicU64,
    /// Most recent failed load, shared with callers that joined it
    last_failure: Mutex<Option<(u64, EngineError)>>,
}

/// Owns the corpus lifecycle and runs scans off the caller's task
///
/// Cloning is cheap; clones share the same state.
pub struct Dispatcher<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for Dispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: CorpusSource> Dispatcher<S> {
    /// Create a dispatcher in the `Unloaded` state
    pub fn new(source: S, config: EngineConfig) -> Self {
        let (state, _) = watch::channel(LoadState::Unloaded);
        Self {
            inner: Arc::new(Inner {
                source,
                engine: QueryEngine::new(config),
                state,
                generations: AtomicU64::new(0),
                last_failure: Mutex::new(None),
            }),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &QueryEngine {
        &self.inner.engine
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.inner.source
    }

    /// Current readiness snapshot
    #[must_use]
    pub fn status(&self) -> Readiness {
        self.inner.state.borrow().readiness()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(*self.inner.state.borrow(), LoadState::Ready { .. })
    }

    /// The active corpus, if one is ready
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<Corpus>> {
        self.ready_corpus().ok()
    }

    /// Watch lifecycle transitions
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.inner.state.subscribe()
    }

    /// Make `language` the active corpus
    ///
    /// - Already ready: returns immediately (cache hit).
    /// - Already loading: waits for that load and shares its outcome.
    /// - Otherwise: starts a new load on its own task. Any older in-flight
    ///   load still completes but is not installed.
    ///
    /// Dropping the returned future does not cancel a started load. On
    /// failure the previously ready corpus, if any, stays active.
    ///
    /// # Errors
    /// Returns [`EngineError::Load`] if the source fails, the text normalizes
    /// to nothing, or a newer load superseded this one.
    pub async fn load(&self, language: &str) -> Result<LoadSummary, EngineError> {
        let mut admission = Admission::Join { generation: 0 };
        self.inner.state.send_if_modified(|state| {
            admission = self.admit(state, language);
            matches!(admission, Admission::Start { .. })
        });

        match admission {
            Admission::Cached(summary) => {
                tracing::debug!(language, "word list already loaded");
                Ok(summary)
            }
            Admission::Join { generation } => self.join_in_flight(language, generation).await,
            Admission::Start { generation } => {
                tracing::info!(language, generation, "loading word list");
                let dispatcher = self.clone();
                let tag = language.to_string();
                let task = tokio::spawn(async move {
                    let built = dispatcher.build_corpus(&tag).await;
                    dispatcher.finish_load(&tag, generation, built)
                });
                match task.await {
                    Ok(outcome) => outcome,
                    Err(e) => self.finish_load(
                        language,
                        generation,
                        Err(EngineError::load(language, format!("load task failed: {e}"))),
                    ),
                }
            }
        }
    }

    fn admit(&self, state: &mut LoadState, language: &str) -> Admission {
        if let LoadState::Ready { corpus } = state
            && corpus.language() == language
        {
            return Admission::Cached(LoadSummary::new(corpus, true));
        }
        if let Some(generation) = state.loading_generation(language) {
            return Admission::Join { generation };
        }

        let generation = self.inner.generations.fetch_add(1, Ordering::Relaxed) + 1;
        let previous = match state {
            LoadState::Ready { corpus } => Some(Arc::clone(corpus)),
            LoadState::Loading { previous, .. } => previous.take(),
            LoadState::Unloaded => None,
        };
        *state = LoadState::Loading {
            language: language.to_string(),
            generation,
            previous,
        };
        Admission::Start { generation }
    }

    async fn join_in_flight(
        &self,
        language: &str,
        generation: u64,
    ) -> Result<LoadSummary, EngineError> {
        tracing::debug!(language, generation, "joining in-flight load");
        let mut updates = self.inner.state.subscribe();
        let joined = {
            let state = updates
                .wait_for(|state| state.loading_generation(language) != Some(generation))
                .await
                .map_err(|_| EngineError::load(language, "dispatcher shut down"))?;
            match &*state {
                LoadState::Ready { corpus } if corpus.language() == language => {
                    Some(LoadSummary::new(corpus, true))
                }
                _ => None,
            }
        };
        if let Some(summary) = joined {
            return Ok(summary);
        }

        match self.last_failure().as_ref() {
            Some((failed, err)) if *failed == generation => Err(err.clone()),
            _ => Err(EngineError::load(language, "superseded by a newer load")),
        }
    }

    fn last_failure(&self) -> std::sync::MutexGuard<'_, Option<(u64, EngineError)>> {
        self.inner
            .last_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    async fn build_corpus(&self, language: &str) -> Result<Corpus, EngineError> {
        let text = self.inner.source.fetch(language).await?;
        let min_length = self.inner.engine.config().min_word_length;
        let tag = language.to_string();

        tokio::task::spawn_blocking(move || Corpus::load(&tag, &text, min_length))
            .await
            .map_err(|e| EngineError::load(language, format!("normalization task failed: {e}")))?
    }

    fn finish_load(
        &self,
        language: &str,
        generation: u64,
        built: Result<Corpus, EngineError>,
    ) -> Result<LoadSummary, EngineError> {
        let mut outcome = Err(EngineError::load(language, "superseded by a newer load"));

        self.inner.state.send_if_modified(|state| {
            let LoadState::Loading {
                generation: current,
                previous,
                ..
            } = state
            else {
                return false;
            };
            if *current != generation {
                return false;
            }

            match built {
                Ok(corpus) => {
                    let corpus = Arc::new(corpus);
                    outcome = Ok(LoadSummary::new(&corpus, false));
                    *state = LoadState::Ready { corpus };
                }
                Err(err) => {
                    *self.last_failure() = Some((generation, err.clone()));
                    *state = previous
                        .take()
                        .map_or(LoadState::Unloaded, |corpus| LoadState::Ready { corpus });
                    outcome = Err(err);
                }
            }
            true
        });

        match &outcome {
            Ok(summary) => {
                tracing::info!(language, words = summary.word_count, "word list ready");
            }
            Err(err) => tracing::warn!(language, error = %err, "word list load failed"),
        }
        outcome
    }

    /// Run a query against the active corpus without blocking the caller
    ///
    /// # Errors
    /// - [`EngineError::NotReady`] unless a corpus is ready
    /// - [`EngineError::InvalidQuery`] for a malformed query
    /// - [`EngineError::Internal`] if the scan task panicked
    pub async fn query(&self, request: QueryRequest) -> Result<QueryOutput, EngineError> {
        let corpus = self.ready_corpus()?;
        let compiled = self.inner.engine.compile(&request.query)?;
        let engine = self.inner.engine;

        tracing::debug!(
            kind = request.query.kind(),
            language = corpus.language(),
            "dispatching scan"
        );

        tokio::task::spawn_blocking(move || {
            engine.execute(&corpus, &compiled, request.order_by, request.limit)
        })
        .await
        .map_err(|e| EngineError::Internal(e.to_string()))
    }

    fn ready_corpus(&self) -> Result<Arc<Corpus>, EngineError> {
        match &*self.inner.state.borrow() {
            LoadState::Ready { corpus } => Ok(Arc::clone(corpus)),
            _ => Err(EngineError::NotReady),
        }
    }
}
