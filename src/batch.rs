//! Batch queries through the transport group primitive

use crate::endpoint;
use crate::error::{AggregateError, Error, Result, TransportError};
use crate::fetch::check_status;
use crate::transport::Transport;
use crate::types::Dependency;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

/// Query `path` for every dependency and decode the answers.
///
/// All endpoints are resolved before any request is sent; if one of them is
/// invalid nothing goes out and every failing dependency is reported, tagged
/// with its index. Transport and status failures are collected the same way.
/// On success the result is index-aligned with `dependencies`.
pub async fn group_fetch<T, R>(
    transport: &R,
    base_url: &str,
    path: &str,
    dependencies: &[Dependency],
    cancel: &CancellationToken,
) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Transport + ?Sized,
{
    let mut invalid = AggregateError::new("unable to resolve dependency endpoints");
    let mut urls = Vec::with_capacity(dependencies.len());
    for (index, dependency) in dependencies.iter().enumerate() {
        match endpoint::resolve(base_url, path, dependency) {
            Ok(url) => urls.push(url),
            Err(e) => invalid.push(index, e),
        }
    }
    invalid.into_result()?;

    if urls.is_empty() {
        return Ok(Vec::new());
    }

    tracing::debug!(count = urls.len(), path, "Fetching package group");

    let responses = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(Error::Cancelled),
        responses = transport.get_group(&urls) => responses,
    };

    if responses.len() != urls.len() {
        return Err(Error::Transport {
            url: base_url.to_string(),
            source: TransportError::Other(format!(
                "expected {} responses, got {}",
                urls.len(),
                responses.len()
            )),
        });
    }

    let mut failed = AggregateError::new("fetching data from Trusty");
    let mut bodies = Vec::with_capacity(responses.len());
    for (index, (url, response)) in urls.iter().zip(responses).enumerate() {
        let checked = response
            .map_err(|source| Error::Transport {
                url: url.to_string(),
                source,
            })
            .and_then(|response| check_status(url, &response).map(|()| response));

        match checked {
            Ok(response) => bodies.push(response.body),
            Err(e) => failed.push(index, e),
        }
    }
    if !failed.is_empty() {
        tracing::warn!(count = failed.len(), "Package group had failed requests");
    }
    failed.into_result()?;

    bodies
        .iter()
        .enumerate()
        .map(|(index, body)| {
            serde_json::from_slice(body).map_err(|source| Error::DecodeItem { index, source })
        })
        .collect()
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;
    use crate::endpoint::REPORT_PATH;
    use crate::models::Reply;
    use crate::test_helpers::{FakeTransport, Scripted, report_body};
    use crate::types::Ecosystem;
    use std::time::Duration;

    fn deps(names: &[&str]) -> Vec<Dependency> {
        names
            .iter()
            .map(|n| Dependency::new(*n, Ecosystem::PyPI))
            .collect()
    }

    async fn fetch(transport: &FakeTransport, dependencies: &[Dependency]) -> Result<Vec<Reply>> {
        group_fetch(
            transport,
            DEFAULT_BASE_URL,
            REPORT_PATH,
            dependencies,
            &CancellationToken::new(),
        )
        .await
    }

    #[tokio::test]
    async fn results_are_index_aligned() {
        let transport = FakeTransport::with_group(vec![
            Scripted::Response(200, report_body("a", "complete")),
            Scripted::Response(200, report_body("b", "complete")),
        ]);

        let replies = fetch(&transport, &deps(&["a", "b"])).await.unwrap();

        let names: Vec<&str> = replies.iter().map(|r| r.package_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(transport.group_calls(), 1);

        let urls = transport.urls();
        assert!(urls[0].as_str().contains("package_name=a"));
        assert!(urls[1].as_str().contains("package_name=b"));
    }

    #[tokio::test]
    async fn invalid_dependency_sends_nothing() {
        let transport = FakeTransport::with_group(vec![]);
        let mut dependencies = deps(&["a"]);
        dependencies.push(Dependency::default());
        dependencies.push(Dependency {
            name: "c".into(),
            ..Dependency::default()
        });

        let err = fetch(&transport, &dependencies).await.unwrap_err();

        match &err {
            Error::Aggregate(agg) => {
                let indices: Vec<usize> = agg.errors().iter().map(|(i, _)| *i).collect();
                assert_eq!(indices, vec![1, 2]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_validation());
        assert_eq!(transport.group_calls(), 0);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn empty_input() {
        let transport = FakeTransport::with_group(vec![]);
        let replies = fetch(&transport, &[]).await.unwrap();
        assert!(replies.is_empty());
        assert_eq!(transport.group_calls(), 0);
    }

    #[tokio::test]
    async fn failures_are_aggregated() {
        let transport = FakeTransport::with_group(vec![
            Scripted::Response(200, report_body("a", "complete")),
            Scripted::Fail("connection reset".into()),
            Scripted::Response(404, String::new()),
        ]);

        let err = fetch(&transport, &deps(&["a", "b", "c"])).await.unwrap_err();

        match err {
            Error::Aggregate(agg) => {
                assert_eq!(agg.len(), 2);
                assert!(matches!(agg.errors()[0], (1, Error::Transport { .. })));
                assert!(matches!(
                    agg.errors()[1],
                    (2, Error::UnexpectedStatus { status: 404, .. })
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn decode_failure_names_index() {
        let transport = FakeTransport::with_group(vec![
            Scripted::Response(200, report_body("a", "complete")),
            Scripted::Response(200, "nope".into()),
        ]);

        let err = fetch(&transport, &deps(&["a", "b"])).await.unwrap_err();
        assert!(matches!(err, Error::DecodeItem { index: 1, .. }), "{err:?}");
        assert!(err.to_string().contains("#1"));
    }

    #[tokio::test]
    async fn short_group_answer() {
        let transport = FakeTransport::with_group(vec![Scripted::Response(200, report_body("a", "complete"))]);
        let err = fetch(&transport, &deps(&["a", "b"])).await.unwrap_err();
        assert!(matches!(err, Error::Transport { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn cancel_aborts_group() {
        let transport = FakeTransport::new(vec![Scripted::Response(200, report_body("a", "complete"))])
            .delayed(Duration::from_secs(30));
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let err = group_fetch::<Reply, _>(&transport, DEFAULT_BASE_URL, REPORT_PATH, &deps(&["a"]), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled), "{err:?}");
    }
}
