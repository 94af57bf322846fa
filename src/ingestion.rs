//! Polling of a package report until its ingestion settles
//!
//! A package the API has never seen is queued for ingestion and reported as
//! `pending`, then `scoring`, until its data is `complete` (or `failed`).
//! [`poll_report`] keeps re-requesting the report while that is the case,
//! waiting [`ClientOptions::ingestion_retry_wait`] between requests.
//!
//! Only the ingestion status is ever retried. Transport, HTTP status and
//! decode errors end the poll immediately.

use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::fetch::fetch_json;
use crate::models::Reply;
use crate::transport::Transport;
use crate::types::IngestionStatus;
use tokio_util::sync::CancellationToken;
use url::Url;

enum PollState {
    Fetching,
    Evaluating(Reply),
    Retrying,
    Done(Reply),
    Failed(Error),
}

#[derive(Debug, PartialEq, Eq)]
enum Verdict {
    /// Hand the report to the caller
    Ready,
    /// Ingestion still running, poll again
    Wait,
}

/// Decide what to do with a report in the given ingestion state
fn evaluate(
    status: Option<&IngestionStatus>,
    options: &ClientOptions,
    package: &str,
) -> Result<Verdict> {
    match status {
        Some(IngestionStatus::Failed) if options.err_on_failed_ingestion => {
            Err(Error::IngestionFailed {
                package: package.to_string(),
            })
        }
        Some(IngestionStatus::Complete) | Some(IngestionStatus::Failed) => Ok(Verdict::Ready),
        Some(IngestionStatus::Pending) | Some(IngestionStatus::Scoring) => {
            if options.wait_for_ingestion {
                Ok(Verdict::Wait)
            } else {
                Ok(Verdict::Ready)
            }
        }
        Some(other) => Err(Error::Protocol(other.to_string())),
        None => Err(Error::Protocol("no status in package data".to_string())),
    }
}

/// Fetch the report at `url` until the package ingestion reaches a state
/// the options accept.
///
/// `package` is only used in errors and logs. Firing `cancel` abandons the
/// in-flight request or the wait between requests and returns
/// [`Error::Cancelled`].
pub async fn poll_report<R>(
    transport: &R,
    url: &Url,
    package: &str,
    options: &ClientOptions,
    cancel: &CancellationToken,
) -> Result<Reply>
where
    R: Transport + ?Sized,
{
    let mut retries: u32 = 0;
    let mut state = PollState::Fetching;

    loop {
        state = match state {
            PollState::Fetching => {
                tracing::debug!(package, url = %url, attempt = retries + 1, "Requesting package report");

                let fetched = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(Error::Cancelled),
                    result = fetch_json::<Reply, R>(transport, url) => result,
                };

                match fetched {
                    Ok(reply) => PollState::Evaluating(reply),
                    Err(e) => PollState::Failed(e),
                }
            }

            PollState::Evaluating(reply) => {
                let status = reply.ingestion_status();
                tracing::debug!(
                    package,
                    status = status.map(IngestionStatus::as_str).unwrap_or("<none>"),
                    attempt = retries + 1,
                    "Evaluating ingestion status"
                );

                match evaluate(status, options, package) {
                    Ok(Verdict::Ready) => PollState::Done(reply),
                    Ok(Verdict::Wait) => PollState::Retrying,
                    Err(e) => PollState::Failed(e),
                }
            }

            PollState::Retrying => {
                retries += 1;

                match options.ingestion_max_retries {
                    Some(max) if retries > max => PollState::Failed(Error::RetryBudgetExhausted {
                        package: package.to_string(),
                        attempts: retries,
                    }),
                    max => {
                        tracing::info!(
                            package,
                            attempt = retries,
                            max_retries = ?max,
                            wait = ?options.ingestion_retry_wait,
                            "Package is being ingested, retrying"
                        );

                        tokio::select! {
                            biased;
                            _ = cancel.cancelled() => PollState::Failed(Error::Cancelled),
                            _ = tokio::time::sleep(options.ingestion_retry_wait) => PollState::Fetching,
                        }
                    }
                }
            }

            PollState::Done(reply) => {
                if retries > 0 {
                    tracing::info!(package, attempts = retries + 1, "Package ingestion settled");
                }
                return Ok(reply);
            }

            PollState::Failed(e) => {
                tracing::warn!(package, error = %e, attempts = retries + 1, "Package report failed");
                return Err(e);
            }
        };
    }
}
