//! Serve command
//!
//! Speaks the dispatch protocol as JSON lines: one request per input line,
//! one response per output line. Responses are written as they complete, so
//! their order follows completion rather than submission.

use crate::dispatch::{CorpusSource, Dispatcher, Request, Response, Worker, spawn_worker};
use crate::errors::EngineError;
use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Counters for one serve session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    pub requests: usize,
    pub responses: usize,
    /// Lines that were not a valid request envelope
    pub malformed: usize,
}

async fn write_response<W: AsyncWrite + Unpin>(writer: &mut W, response: &Response) -> Result<()> {
    let mut line = serde_json::to_vec(response)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}

/// Serve requests from `reader` until it is exhausted and every response is written
///
/// # Errors
/// Fails only on I/O errors; request failures become error responses.
pub async fn run_serve<S, R, W>(dispatcher: Dispatcher<S>, reader: R, mut writer: W) -> Result<ServeStats>
where
    S: CorpusSource,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let Worker {
        requests,
        mut responses,
        task,
    } = spawn_worker(dispatcher);
    let mut requests = Some(requests);
    let mut lines = reader.lines();
    let mut stats = ServeStats::default();

    loop {
        tokio::select! {
            line = lines.next_line(), if requests.is_some() => {
                let Some(line) = line? else {
                    tracing::debug!(requests = stats.requests, "input closed");
                    requests = None;
                    continue;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<Request>(&line) {
                    Ok(request) => {
                        stats.requests += 1;
                        if let Some(sender) = &requests {
                            sender.send(request).await?;
                        }
                    }
                    Err(e) => {
                        stats.malformed += 1;
                        tracing::warn!(error = %e, "malformed request line");
                        let error = EngineError::invalid(format!("malformed request: {e}"));
                        write_response(&mut writer, &Response::error(None, &error)).await?;
                    }
                }
            }
            response = responses.recv() => {
                let Some(response) = response else { break };
                stats.responses += 1;
                write_response(&mut writer, &response).await?;
            }
        }
    }

    task.await?;
    Ok(stats)
}
