//! Lookup command
//!
//! Loads a word list through the dispatcher and runs one query against it.
//! Shared by the `unscramble`, `pattern`, `wordle` and `bee` subcommands.

use crate::core::Query;
use crate::dispatch::{CorpusSource, Dispatcher, LoadSummary};
use crate::engine::{QueryOutput, QueryRequest};
use anyhow::{Context, Result};

/// Result of a single lookup
#[derive(Debug, Clone)]
pub struct LookupResult {
    pub query: Query,
    pub load: LoadSummary,
    pub output: QueryOutput,
}

/// Load `language` and run `request` against it
///
/// # Errors
/// Fails if the word list cannot be loaded or the query is malformed.
pub async fn run_lookup<S: CorpusSource>(
    dispatcher: &Dispatcher<S>,
    language: &str,
    request: QueryRequest,
) -> Result<LookupResult> {
    let load = dispatcher
        .load(language)
        .await
        .with_context(|| format!("loading word list `{language}`"))?;

    let query = request.query.clone();
    let output = dispatcher
        .query(request)
        .await
        .with_context(|| format!("running {query}"))?;

    Ok(LookupResult {
        query,
        load,
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::core::{ConstraintQuery, KeysetQuery, SubsetQuery};
    use crate::dispatch::StaticSource;
    use crate::engine::OrderBy;

    fn dispatcher() -> Dispatcher<StaticSource> {
        Dispatcher::new(
            StaticSource::new().with_language("en", "crane\ncrate\ngrate\nhoney\nphony\nbee"),
            EngineConfig::default(),
        )
    }

    #[tokio::test]
    async fn lookup_loads_then_queries() {
        let dispatcher = dispatcher();
        let result = run_lookup(
            &dispatcher,
            "en",
            QueryRequest::new(
                ConstraintQuery::new("_r_t_")
                    .with_required("a")
                    .with_excluded("c"),
            ),
        )
        .await
        .unwrap();

        assert_eq!(result.load.word_count, 6);
        assert_eq!(result.output.words().collect::<Vec<_>>(), ["grate"]);
        assert_eq!(result.query.kind(), "constraint-solve");
    }

    #[tokio::test]
    async fn lookup_orders_results() {
        let dispatcher = dispatcher();
        let result = run_lookup(
            &dispatcher,
            "en",
            QueryRequest::new(KeysetQuery::new('n', "hoeyp").with_min_length(4))
                .with_order(OrderBy::Alphabetical),
        )
        .await
        .unwrap();
        assert_eq!(result.output.words().collect::<Vec<_>>(), ["honey", "phony"]);
    }

    #[tokio::test]
    async fn lookup_reports_missing_language() {
        let dispatcher = dispatcher();
        let err = run_lookup(&dispatcher, "xx", QueryRequest::new(SubsetQuery::new("abc")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("xx"));
    }
}
