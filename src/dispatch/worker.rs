//! Channel front end for the dispatcher
//!
//! Requests go in on one bounded channel and responses come out on another.
//! Each request is handled on its own task, so a slow load never holds up
//! queries or error replies. Responses may arrive in any order; callers
//! match them by correlation id.

use super::dispatcher::Dispatcher;
use super::protocol::{Command, Request, Response};
use super::source::CorpusSource;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Capacity of both worker channels
pub const CHANNEL_CAPACITY: usize = 64;

/// Handles to a running worker
pub struct Worker {
    pub requests: mpsc::Sender<Request>,
    pub responses: mpsc::Receiver<Response>,
    /// Finishes once `requests` is dropped and in-flight requests are dispatched
    pub task: JoinHandle<()>,
}

/// Start a worker serving `dispatcher`
pub fn spawn_worker<S: CorpusSource>(dispatcher: Dispatcher<S>) -> Worker {
    let (request_tx, request_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (response_tx, response_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let task = tokio::spawn(run(dispatcher, request_rx, response_tx));

    Worker {
        requests: request_tx,
        responses: response_rx,
        task,
    }
}

async fn run<S: CorpusSource>(
    dispatcher: Dispatcher<S>,
    mut requests: mpsc::Receiver<Request>,
    responses: mpsc::Sender<Response>,
) {
    while let Some(request) = requests.recv().await {
        let dispatcher = dispatcher.clone();
        let responses = responses.clone();
        tokio::spawn(async move {
            let response = handle_request(&dispatcher, request).await;
            if responses.send(response).await.is_err() {
                tracing::debug!("response receiver dropped");
            }
        });
    }
    tracing::debug!("request channel closed, worker exiting");
}

/// Turn one request into its single response
pub async fn handle_request<S: CorpusSource>(
    dispatcher: &Dispatcher<S>,
    request: Request,
) -> Response {
    let correlation_id = request.correlation_id.clone();
    let kind = request.kind;

    let outcome = match request.into_command() {
        Ok(Command::Init { language }) => dispatcher
            .load(&language)
            .await
            .map(|summary| Response::ready(correlation_id.clone(), &summary)),
        Ok(Command::Query(query)) => dispatcher
            .query(query)
            .await
            .map(|output| Response::result(correlation_id.clone(), output)),
        Err(err) => Err(err),
    };

    outcome.unwrap_or_else(|err| {
        tracing::warn!(
            id = %correlation_id,
            ?kind,
            code = err.code(),
            error = %err,
            "request failed"
        );
        Response::error(Some(correlation_id), &err)
    })
}
