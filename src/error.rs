//! Error types for trusty-client
//!
//! Every fallible operation in the crate returns [`Error`]. The variants are
//! grouped roughly by where they are detected:
//! - before any I/O (invalid dependency, malformed base URL, bad purl)
//! - at the transport or HTTP layer (transport failure, non-200 status)
//! - while decoding or interpreting a response (decode, protocol, ingestion)
//! - by the orchestration layer (retry budget, cancellation, batch aggregation)

use std::fmt;
use thiserror::Error;

/// Result type alias for trusty-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for trusty-client
#[derive(Debug, Error)]
pub enum Error {
    /// Dependency lacks the fields required to build a query.
    ///
    /// All problems are collected, not only the first one found.
    #[error("invalid dependency {name:?}: {}", .problems.join("; "))]
    InvalidDependency {
        /// Name of the offending dependency (may be empty)
        name: String,
        /// One entry per missing or invalid field
        problems: Vec<String>,
    },

    /// The configured API base URL cannot be parsed or cannot carry a path
    #[error("failed to parse endpoint {url:?}: {reason}")]
    MalformedBaseUrl {
        /// The base URL as configured
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The transport failed before an HTTP status was received
    #[error("could not send request to {url}: {source}")]
    Transport {
        /// Request URL
        url: String,
        /// Underlying transport failure
        #[source]
        source: TransportError,
    },

    /// The API answered with something other than 200 OK
    #[error("received non-200 response: {status} from {url}")]
    UnexpectedStatus {
        /// Request URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Response body is not valid JSON of the expected shape
    #[error("could not unmarshal response: {0}")]
    Decode(#[from] serde_json::Error),

    /// One response of a batch could not be decoded
    #[error("could not unmarshal response #{index}: {source}")]
    DecodeItem {
        /// Position of the response in the batch
        index: usize,
        /// Underlying decode failure
        #[source]
        source: serde_json::Error,
    },

    /// The server reported an ingestion status the client does not understand
    #[error("unexpected ingestion status when querying package: {0}")]
    Protocol(String),

    /// Ingestion failed upstream and the client is configured to treat that as an error
    #[error("upstream error ingesting package data for {package:?}")]
    IngestionFailed {
        /// Package that failed ingestion
        package: String,
    },

    /// The package was still being ingested when the retry budget ran out
    #[error("time out reached waiting for ingestion of {package:?} after {attempts} requests")]
    RetryBudgetExhausted {
        /// Package being polled
        package: String,
        /// Number of requests sent
        attempts: u32,
    },

    /// Several per-item failures from a batch operation
    #[error("{0}")]
    Aggregate(AggregateError),

    /// The package URL names an ecosystem the API does not support
    #[error("ecosystem not supported: {0}")]
    UnsupportedEcosystem(String),

    /// The package URL is malformed
    #[error("unable to parse package url {purl:?}: {reason}")]
    InvalidPurl {
        /// The rejected package URL
        purl: String,
        /// What is wrong with it
        reason: String,
    },

    /// The caller's cancellation token fired
    #[error("operation cancelled")]
    Cancelled,

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "base_url")
        key: Option<String>,
    },
}

impl Error {
    /// Returns true if the error was detected from the caller's input alone,
    /// before any network I/O took place.
    pub fn is_validation(&self) -> bool {
        match self {
            Error::InvalidDependency { .. }
            | Error::MalformedBaseUrl { .. }
            | Error::UnsupportedEcosystem(_)
            | Error::InvalidPurl { .. } => true,
            Error::Aggregate(agg) => {
                !agg.is_empty() && agg.errors().iter().all(|(_, e)| e.is_validation())
            }
            _ => false,
        }
    }
}

/// Failure reported by a [`Transport`](crate::transport::Transport)
/// implementation for a single request.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Error from the underlying HTTP client (connect, timeout, body read)
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Any other transport failure
    #[error("{0}")]
    Other(String),
}

/// Several indexed errors joined into one.
///
/// Batch operations collect every per-item failure instead of stopping at the
/// first one; the index is the item's position in the caller's input.
#[derive(Debug)]
pub struct AggregateError {
    context: String,
    errors: Vec<(usize, Error)>,
}

impl AggregateError {
    /// Create an empty aggregate with a short description of the operation
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            errors: Vec::new(),
        }
    }

    /// Record the failure of item `index`
    pub fn push(&mut self, index: usize, error: Error) {
        self.errors.push((index, error));
    }

    /// The collected `(index, error)` pairs in insertion order
    pub fn errors(&self) -> &[(usize, Error)] {
        &self.errors
    }

    /// Number of collected errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True when no error was recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok(())` when empty, otherwise the aggregate wrapped in [`Error::Aggregate`]
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Aggregate(self))
        }
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} errors)", self.context, self.errors.len())?;
        for (index, error) in &self.errors {
            write!(f, "; #{index}: {error}")?;
        }
        Ok(())
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dependency_lists_every_problem() {
        let err = Error::InvalidDependency {
            name: String::new(),
            problems: vec![
                "dependency has no name defined".into(),
                "dependency has no ecosystem set".into(),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("no name defined"), "{msg}");
        assert!(msg.contains("no ecosystem set"), "{msg}");
    }

    #[test]
    fn empty_aggregate_is_ok() {
        assert!(AggregateError::new("fetching").into_result().is_ok());
    }

    #[test]
    fn aggregate_display_includes_indices() {
        let mut agg = AggregateError::new("fetching data from Trusty");
        agg.push(0, Error::Transport {
            url: "https://example.com".into(),
            source: TransportError::Other("connection reset".into()),
        });
        agg.push(3, Error::UnexpectedStatus {
            url: "https://example.com".into(),
            status: 404,
        });

        let err = agg.into_result().unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("fetching data from Trusty (2 errors)"), "{msg}");
        assert!(msg.contains("#0: could not send request"), "{msg}");
        assert!(msg.contains("#3: received non-200 response: 404"), "{msg}");
    }

    #[test]
    fn validation_classification() {
        assert!(Error::UnsupportedEcosystem("pkg:foo".into()).is_validation());
        assert!(!Error::Cancelled.is_validation());
        assert!(
            !Error::UnexpectedStatus {
                url: String::new(),
                status: 500
            }
            .is_validation()
        );

        let mut all_validation = AggregateError::new("resolving endpoints");
        all_validation.push(
            1,
            Error::InvalidDependency {
                name: "x".into(),
                problems: vec!["dependency has no ecosystem set".into()],
            },
        );
        assert!(Error::Aggregate(all_validation).is_validation());

        let mut mixed = AggregateError::new("fetching");
        mixed.push(0, Error::Cancelled);
        assert!(!Error::Aggregate(mixed).is_validation());

        assert!(!Error::Aggregate(AggregateError::new("empty")).is_validation());
    }
}
