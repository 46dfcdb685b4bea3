//! Error taxonomy for corpus loading, dispatch and query evaluation
//!
//! Every failure is scoped to a single load attempt or a single request.
//! A query that matches zero words is not an error.
//!
//! Each variant carries a stable short code used in protocol error envelopes:
//!
//! - `load`: the corpus source was unreadable or produced no usable entries
//! - `not-ready`: a query arrived before any corpus finished loading
//! - `invalid-query`: the query shape is malformed
//! - `internal`: the scan task did not run to completion

use thiserror::Error;

/// Errors surfaced by the engine and the dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The corpus source could not be read, or normalized to nothing
    #[error("failed to load word list `{language}`: {reason}")]
    Load { language: String, reason: String },

    /// No corpus is ready; the caller should retry after `ready`
    #[error("word list is not ready yet")]
    NotReady,

    /// The query is malformed (caller bug, never retried automatically)
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The scan task panicked or was aborted
    #[error("scan failed: {0}")]
    Internal(String),
}

impl EngineError {
    /// Build a [`EngineError::Load`] for `language`
    pub fn load(language: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Load {
            language: language.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`EngineError::InvalidQuery`]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidQuery(message.into())
    }

    /// Stable short code for protocol envelopes
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Load { .. } => "load",
            Self::NotReady => "not-ready",
            Self::InvalidQuery(_) => "invalid-query",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether retrying the same request later can succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::NotReady)
    }
}
