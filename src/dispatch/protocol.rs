//! Request/response envelopes exchanged with the dispatcher
//!
//! Inbound: `{ "kind": ..., "payload": {...}, "correlationId": ... }`.
//! Outbound: `{ "kind": "ready" | "result" | "error", "correlationId": ..., ... }`.
//! Every inbound request produces exactly one outbound message carrying the
//! same correlation id.

use crate::core::Query;
use crate::engine::{OrderBy, QueryOutput, QueryRequest, ScoredWord};
use crate::errors::EngineError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::dispatcher::LoadSummary;

/// Caller-chosen request identifier, echoed back verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrelationId {
    Number(u64),
    Text(String),
}

impl From<u64> for CorrelationId {
    fn from(id: u64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for CorrelationId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for CorrelationId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestKind {
    Init,
    Subset,
    Pattern,
    ConstraintSolve,
    KeysetSolve,
}

/// Inbound request envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub kind: RequestKind,
    #[serde(default)]
    pub payload: Value,
    pub correlation_id: CorrelationId,
}

/// A request decoded into something the dispatcher can act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Init { language: String },
    Query(QueryRequest),
}

#[derive(Deserialize)]
struct InitPayload {
    language: String,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Presentation {
    #[serde(default, alias = "sort")]
    order_by: Option<OrderBy>,
    #[serde(default)]
    limit: Option<usize>,
}

fn parse_payload<T: DeserializeOwned>(payload: &Value, what: &str) -> Result<T, EngineError> {
    T::deserialize(payload).map_err(|e| EngineError::invalid(format!("malformed {what} payload: {e}")))
}

impl Request {
    pub fn new(kind: RequestKind, payload: Value, correlation_id: impl Into<CorrelationId>) -> Self {
        Self {
            kind,
            payload,
            correlation_id: correlation_id.into(),
        }
    }

    pub fn init(language: &str, correlation_id: impl Into<CorrelationId>) -> Self {
        let mut payload = Map::new();
        payload.insert("language".to_string(), Value::from(language));
        Self::new(RequestKind::Init, Value::Object(payload), correlation_id)
    }

    /// Decode the payload according to `kind`
    ///
    /// Query payloads may also carry `orderBy` (alias `sort`) and `limit`.
    /// A missing payload is treated as an empty object.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidQuery`] when the payload does not match
    /// the shape `kind` requires.
    pub fn into_command(self) -> Result<Command, EngineError> {
        let payload = if self.payload.is_null() {
            Value::Object(Map::new())
        } else {
            self.payload
        };

        let query = match self.kind {
            RequestKind::Init => {
                let init: InitPayload = parse_payload(&payload, "init")?;
                return Ok(Command::Init {
                    language: init.language,
                });
            }
            RequestKind::Subset => Query::Subset(parse_payload(&payload, "subset")?),
            RequestKind::Pattern => Query::Pattern(parse_payload(&payload, "pattern")?),
            RequestKind::ConstraintSolve => {
                Query::ConstraintSolve(parse_payload(&payload, "constraint-solve")?)
            }
            RequestKind::KeysetSolve => {
                Query::KeysetSolve(parse_payload(&payload, "keyset-solve")?)
            }
        };

        let presentation: Presentation = parse_payload(&payload, "ordering")?;
        Ok(Command::Query(
            QueryRequest::new(query)
                .with_order(presentation.order_by.unwrap_or_default())
                .with_limit(presentation.limit),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Ready,
    Result,
    Error,
}

/// Outbound message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub kind: ResponseKind,
    /// Absent only when the inbound line could not be decoded at all
    pub correlation_id: Option<CorrelationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<ScoredWord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Response {
    const fn empty(kind: ResponseKind, correlation_id: Option<CorrelationId>) -> Self {
        Self {
            kind,
            correlation_id,
            language: None,
            word_count: None,
            results: None,
            total: None,
            elapsed_ms: None,
            code: None,
            message: None,
        }
    }

    #[must_use]
    pub fn ready(correlation_id: CorrelationId, summary: &LoadSummary) -> Self {
        Self {
            language: Some(summary.language.clone()),
            word_count: Some(summary.word_count),
            ..Self::empty(ResponseKind::Ready, Some(correlation_id))
        }
    }

    #[must_use]
    pub fn result(correlation_id: CorrelationId, output: QueryOutput) -> Self {
        Self {
            elapsed_ms: Some(output.elapsed_ms()),
            total: Some(output.total),
            results: Some(output.results),
            ..Self::empty(ResponseKind::Result, Some(correlation_id))
        }
    }

    #[must_use]
    pub fn error(correlation_id: Option<CorrelationId>, error: &EngineError) -> Self {
        Self {
            code: Some(error.code()),
            message: Some(error.to_string()),
            ..Self::empty(ResponseKind::Error, correlation_id)
        }
    }
}
