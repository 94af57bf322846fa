//! # trusty-client
//!
//! Async client for the Trusty package-intelligence API.
//!
//! ## Design Philosophy
//!
//! trusty-client is designed to be:
//! - **Typed** - Every response is decoded into a documented struct
//! - **Sensible defaults** - Works against the public API with zero configuration
//! - **Patient** - Reports of packages still being ingested are polled until they settle
//! - **Testable** - All I/O goes through the [`Transport`] trait
//!
//! ## Quick Start
//!
//! ```no_run
//! use trusty_client::{ClientOptions, Dependency, Ecosystem, TrustyClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TrustyClient::with_options(ClientOptions {
//!         err_on_failed_ingestion: true,
//!         ..Default::default()
//!     })?;
//!
//!     let report = client
//!         .report(&Dependency::new("requests", Ecosystem::PyPI))
//!         .await?;
//!     println!("score: {:?}", report.summary.score);
//!
//!     let dependency = client.purl_to_dependency("pkg:npm/%40react-stately/color@3.7.0")?;
//!     let alternatives = client.alternatives(&dependency).await?;
//!     for alt in alternatives.packages {
//!         println!("{} ({:?})", alt.package_name, alt.score);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Parallel batch queries
pub mod batch;
/// Client facade
pub mod client;
/// Configuration types
pub mod config;
/// API paths and query URL construction
pub mod endpoint;
/// Error types
pub mod error;
/// Single request decoding
pub mod fetch;
/// Ingestion polling
pub mod ingestion;
/// API response bodies
pub mod models;
/// Package URL parsing
pub mod purl;
/// HTTP transport abstraction
pub mod transport;
/// Core types
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use client::TrustyClient;
pub use config::{ClientOptions, DEFAULT_BASE_URL, ENDPOINT_ENV_VAR};
pub use error::{AggregateError, Error, Result, TransportError};
pub use purl::{Purl, purl_to_dependency, purl_to_ecosystem};
pub use transport::{HttpResponse, HttpTransport, Transport};
pub use types::{Dependency, Ecosystem, IngestionStatus, PackageType};
