//! The Trusty API client

use crate::batch::group_fetch;
use crate::config::ClientOptions;
use crate::endpoint::{self, ALTERNATIVES_PATH, PACKAGE_PATH, PROVENANCE_PATH, REPORT_PATH, SUMMARY_PATH};
use crate::error::Result;
use crate::fetch::fetch_json;
use crate::ingestion::poll_report;
use crate::models::{PackageAlternatives, PackageSummaryAnnotation, Provenance, Reply, TrustyPackageData};
use crate::purl;
use crate::transport::{HttpTransport, Transport};
use crate::types::Dependency;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Client for the Trusty package API
///
/// Options are fixed at construction. The client holds no other state and
/// can be shared between tasks by reference.
///
/// # Example
///
/// ```no_run
/// use trusty_client::{Dependency, Ecosystem, TrustyClient};
///
/// # async fn example() -> trusty_client::Result<()> {
/// let client = TrustyClient::new()?;
/// let report = client
///     .report(&Dependency::new("requests", Ecosystem::PyPI))
///     .await?;
/// println!("{}: {:?}", report.package_name, report.summary.score);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TrustyClient<T = HttpTransport> {
    options: ClientOptions,
    transport: T,
}

impl TrustyClient<HttpTransport> {
    /// Client with default options, honoring `TRUSTY_ENDPOINT`
    pub fn new() -> Result<Self> {
        Self::with_options(ClientOptions::from_env())
    }

    /// Client with the given options over an HTTP transport
    pub fn with_options(options: ClientOptions) -> Result<Self> {
        let options = options.normalized();
        let transport = HttpTransport::new(&options)?;
        Ok(Self { options, transport })
    }
}

impl<T: Transport> TrustyClient<T> {
    /// Client over a caller-provided transport
    pub fn with_transport(options: ClientOptions, transport: T) -> Self {
        Self {
            options: options.normalized(),
            transport,
        }
    }

    /// Options in effect
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Transport used for requests
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Report URL for `dependency`
    pub fn package_endpoint(&self, dependency: &Dependency) -> Result<Url> {
        endpoint::resolve(&self.options.base_url, REPORT_PATH, dependency)
    }

    /// Report URL for a package URL
    pub fn purl_endpoint(&self, purl: &str) -> Result<Url> {
        let dependency = purl::purl_to_dependency(purl)?;
        self.package_endpoint(&dependency)
    }

    /// Convert a package URL into a [`Dependency`]
    pub fn purl_to_dependency(&self, purl: &str) -> Result<Dependency> {
        purl::purl_to_dependency(purl)
    }

    /// Full report of a package, waiting for its ingestion as configured
    pub async fn report(&self, dependency: &Dependency) -> Result<Reply> {
        self.report_with_cancel(dependency, &CancellationToken::new())
            .await
    }

    /// [`report`](Self::report) that stops when `cancel` fires
    pub async fn report_with_cancel(
        &self,
        dependency: &Dependency,
        cancel: &CancellationToken,
    ) -> Result<Reply> {
        let url = self.package_endpoint(dependency)?;
        poll_report(&self.transport, &url, &dependency.name, &self.options, cancel).await
    }

    /// Reports of several packages, fetched in parallel
    ///
    /// Reports are returned in input order and do not wait for ingestion.
    pub async fn group_report(&self, dependencies: &[Dependency]) -> Result<Vec<Reply>> {
        self.group_report_with_cancel(dependencies, &CancellationToken::new())
            .await
    }

    /// [`group_report`](Self::group_report) that stops when `cancel` fires
    pub async fn group_report_with_cancel(
        &self,
        dependencies: &[Dependency],
        cancel: &CancellationToken,
    ) -> Result<Vec<Reply>> {
        group_fetch(
            &self.transport,
            &self.options.base_url,
            REPORT_PATH,
            dependencies,
            cancel,
        )
        .await
    }

    /// Security summary of a package
    pub async fn summary(&self, dependency: &Dependency) -> Result<PackageSummaryAnnotation> {
        self.fetch(SUMMARY_PATH, dependency).await
    }

    /// Registry and repository metadata of a package
    pub async fn package_metadata(&self, dependency: &Dependency) -> Result<TrustyPackageData> {
        self.fetch(PACKAGE_PATH, dependency).await
    }

    /// Alternatives to a package
    pub async fn alternatives(&self, dependency: &Dependency) -> Result<PackageAlternatives> {
        self.fetch(ALTERNATIVES_PATH, dependency).await
    }

    /// Provenance details of a package
    pub async fn provenance(&self, dependency: &Dependency) -> Result<Provenance> {
        self.fetch(PROVENANCE_PATH, dependency).await
    }

    async fn fetch<R: DeserializeOwned>(&self, path: &str, dependency: &Dependency) -> Result<R> {
        let url = endpoint::resolve(&self.options.base_url, path, dependency)?;
        fetch_json(&self.transport, &url).await
    }
}
