//! HTTP transport abstraction
//!
//! The client only ever needs two primitives: a single GET and a group of
//! GETs answered in input order. [`Transport`] captures both so tests can
//! substitute a scripted fake; [`HttpTransport`] is the `reqwest` version.

use crate::config::ClientOptions;
use crate::error::{Error, TransportError};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use url::Url;

/// A fully-read HTTP response
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a response from a status code and body
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 200 OK, the only status the API answers with on success
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Capability to issue GET requests
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one GET request and read the whole body
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError>;

    /// Send a GET for every URL
    ///
    /// The result has one entry per URL, in the same order as `urls`,
    /// regardless of completion order.
    async fn get_group(&self, urls: &[Url]) -> Vec<Result<HttpResponse, TransportError>>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        (**self).get(url).await
    }

    async fn get_group(&self, urls: &[Url]) -> Vec<Result<HttpResponse, TransportError>> {
        (**self).get_group(urls).await
    }
}

/// [`Transport`] over a shared `reqwest` client
///
/// Group requests run at most `workers` at a time.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    max_parallel: usize,
}

impl HttpTransport {
    /// Build a transport from the client options (timeout, user agent, workers)
    pub fn new(options: &ClientOptions) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(options.request_timeout)
            .user_agent(options.user_agent.as_str())
            .build()
            .map_err(|e| Error::Config {
                message: format!("Failed to create HTTP client: {}", e),
                key: None,
            })?;

        Ok(Self::with_client(client, options.workers))
    }

    /// Wrap an existing `reqwest` client
    pub fn with_client(client: reqwest::Client, workers: usize) -> Self {
        Self {
            client,
            max_parallel: workers.max(1),
        }
    }

    /// Maximum number of requests a group call keeps in flight
    pub fn max_parallel(&self) -> usize {
        self.max_parallel
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        tracing::debug!(url = %url, "Sending request");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        tracing::trace!(url = %url, status, bytes = body.len(), "Received response");
        Ok(HttpResponse::new(status, body.to_vec()))
    }

    async fn get_group(&self, urls: &[Url]) -> Vec<Result<HttpResponse, TransportError>> {
        tracing::debug!(
            count = urls.len(),
            workers = self.max_parallel,
            "Sending request group"
        );

        // Collect before buffering: the boxed futures must not borrow the
        // stream closure's argument.
        let requests: Vec<_> = urls.iter().map(|url| self.get(url)).collect();
        stream::iter(requests)
            .buffered(self.max_parallel)
            .collect()
            .await
    }
}
