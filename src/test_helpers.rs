//! Shared test helpers: a scripted in-memory transport.

use crate::error::TransportError;
use crate::transport::{HttpResponse, Transport};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use url::Url;

/// One scripted answer of the fake transport
#[derive(Clone, Debug)]
pub(crate) enum Scripted {
    /// Answer with this status and body
    Response(u16, String),
    /// Fail at the transport level with this message
    Fail(String),
}

impl Scripted {
    fn to_result(&self) -> Result<HttpResponse, TransportError> {
        match self {
            Scripted::Response(status, body) => Ok(HttpResponse::new(*status, body.as_bytes())),
            Scripted::Fail(msg) => Err(TransportError::Other(msg.clone())),
        }
    }
}

/// Transport answering `get` from a script, in order.
///
/// The last script entry is repeated once the script runs out. `get_group`
/// answers from the group script when one is set, otherwise through `get`.
pub(crate) struct FakeTransport {
    script: Mutex<VecDeque<Scripted>>,
    group_script: Option<Vec<Scripted>>,
    delay: Option<Duration>,
    calls: AtomicU32,
    group_calls: AtomicU32,
    urls: Mutex<Vec<Url>>,
}

impl FakeTransport {
    pub(crate) fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            group_script: None,
            delay: None,
            calls: AtomicU32::new(0),
            group_calls: AtomicU32::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    /// Fake whose group call answers `script` index by index
    pub(crate) fn with_group(script: Vec<Scripted>) -> Self {
        Self {
            group_script: Some(script),
            ..Self::new(Vec::new())
        }
    }

    /// Delay every `get` by `delay`
    pub(crate) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `get` calls so far
    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of `get_group` calls so far
    pub(crate) fn group_calls(&self) -> u32 {
        self.group_calls.load(Ordering::SeqCst)
    }

    /// Every URL requested, in request order
    pub(crate) fn urls(&self) -> Vec<Url> {
        self.urls.lock().unwrap().clone()
    }

    fn next(&self) -> Scripted {
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script
                .front()
                .cloned()
                .unwrap_or_else(|| Scripted::Fail("script exhausted".into()))
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.clone());
        let answer = self.next();

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        answer.to_result()
    }

    async fn get_group(&self, urls: &[Url]) -> Vec<Result<HttpResponse, TransportError>> {
        self.group_calls.fetch_add(1, Ordering::SeqCst);

        match &self.group_script {
            Some(script) => {
                self.urls.lock().unwrap().extend(urls.iter().cloned());
                script.iter().map(Scripted::to_result).collect()
            }
            None => {
                let mut results = Vec::with_capacity(urls.len());
                for url in urls {
                    results.push(self.get(url).await);
                }
                results
            }
        }
    }
}

/// A minimal report body with the given name and ingestion status
pub(crate) fn report_body(name: &str, status: &str) -> String {
    serde_json::json!({
        "package_name": name,
        "package_type": "pypi",
        "summary": {"score": 7.5, "description": {}},
        "package_data": {"status": status},
    })
    .to_string()
}
