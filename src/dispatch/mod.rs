//! Asynchronous task dispatch
//!
//! A [`Dispatcher`] owns the corpus lifecycle and runs scans on the blocking
//! pool. [`spawn_worker`] wraps it in a request/response channel pair speaking
//! the envelopes in [`protocol`].

mod dispatcher;
pub mod protocol;
mod source;
mod worker;

pub use dispatcher::{Dispatcher, LoadState, LoadSummary, Readiness};
pub use protocol::{Command, CorrelationId, Request, RequestKind, Response, ResponseKind};
pub use source::{CorpusSource, FileSource, StaticSource};
pub use worker::{CHANNEL_CAPACITY, Worker, handle_request, spawn_worker};
