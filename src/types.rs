//! Core query types: the dependency being asked about and the enums shared by
//! every endpoint.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Packaging ecosystem a dependency belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// JavaScript packages from the npm registry
    Npm,
    /// Go modules
    Go,
    /// Python Package Index
    PyPI,
    /// Rust crates from crates.io
    Crates,
    /// Java packages from Maven Central
    Maven,
}

impl Ecosystem {
    /// Every supported ecosystem
    pub const ALL: [Ecosystem; 5] = [
        Ecosystem::Npm,
        Ecosystem::Go,
        Ecosystem::PyPI,
        Ecosystem::Crates,
        Ecosystem::Maven,
    ];

    /// Human-facing name of the ecosystem (e.g. "PyPI")
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Npm => "npm",
            Ecosystem::Go => "Go",
            Ecosystem::PyPI => "PyPI",
            Ecosystem::Crates => "crates",
            Ecosystem::Maven => "Maven",
        }
    }

    /// Token sent as the `package_type` query parameter
    pub fn package_type(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Ecosystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "npm" => Ok(Ecosystem::Npm),
            "go" | "golang" => Ok(Ecosystem::Go),
            "pypi" => Ok(Ecosystem::PyPI),
            "crates" | "cargo" => Ok(Ecosystem::Crates),
            "maven" => Ok(Ecosystem::Maven),
            _ => Err(Error::UnsupportedEcosystem(s.to_string())),
        }
    }
}

/// A package to query the API about
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Package name, including any namespace (e.g. "@scope/pkg")
    #[serde(default)]
    pub name: String,

    /// Ecosystem the package is published in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecosystem: Option<Ecosystem>,

    /// Specific version to query; the latest is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Dependency {
    /// Create a dependency without a pinned version
    pub fn new(name: impl Into<String>, ecosystem: Ecosystem) -> Self {
        Self {
            name: name.into(),
            ecosystem: Some(ecosystem),
            version: None,
        }
    }

    /// Pin the dependency to a version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Check that every field needed to build a query is present.
    ///
    /// All problems are reported together in a single [`Error::InvalidDependency`].
    pub fn validate(&self) -> Result<(), Error> {
        let mut problems = Vec::new();
        if self.name.is_empty() {
            problems.push("dependency has no name defined".to_string());
        }
        if self.ecosystem.is_none() {
            problems.push("dependency has no ecosystem set".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidDependency {
                name: self.name.clone(),
                problems,
            })
        }
    }
}

/// Server-side ingestion state of a package
///
/// Unknown values are kept as [`IngestionStatus::Unrecognized`] instead of
/// failing deserialization, so the poll loop can report them as a protocol
/// error with the offending value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IngestionStatus {
    /// Waiting for ingestion to start
    Pending,
    /// Scores are being computed
    Scoring,
    /// Scores are being propagated to related packages
    Propagate,
    /// Neighbouring packages are being ingested
    Neighbours,
    /// Initial metadata fetched
    Initial,
    /// Ingestion finished, data available
    Complete,
    /// Ingestion failed permanently
    Failed,
    /// Package was removed
    Deleted,
    /// A value this client does not know about
    Unrecognized(String),
}

impl IngestionStatus {
    /// Wire representation of the status
    pub fn as_str(&self) -> &str {
        match self {
            IngestionStatus::Pending => "pending",
            IngestionStatus::Scoring => "scoring",
            IngestionStatus::Propagate => "propagate",
            IngestionStatus::Neighbours => "neighbours",
            IngestionStatus::Initial => "initial",
            IngestionStatus::Complete => "complete",
            IngestionStatus::Failed => "failed",
            IngestionStatus::Deleted => "deleted",
            IngestionStatus::Unrecognized(s) => s,
        }
    }
}

impl From<String> for IngestionStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => IngestionStatus::Pending,
            "scoring" => IngestionStatus::Scoring,
            "propagate" => IngestionStatus::Propagate,
            "neighbours" => IngestionStatus::Neighbours,
            "initial" => IngestionStatus::Initial,
            "complete" => IngestionStatus::Complete,
            "failed" => IngestionStatus::Failed,
            "deleted" => IngestionStatus::Deleted,
            _ => IngestionStatus::Unrecognized(s),
        }
    }
}

impl From<IngestionStatus> for String {
    fn from(status: IngestionStatus) -> Self {
        match status {
            IngestionStatus::Unrecognized(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for IngestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Package type as reported in response bodies
///
/// The API may return types this client has no [`Ecosystem`] for; those are
/// kept as [`PackageType::Unrecognized`] so one unfamiliar entry does not
/// fail a whole response.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PackageType {
    /// A known ecosystem
    Known(Ecosystem),
    /// A type this client does not know about
    Unrecognized(String),
}

impl PackageType {
    /// The ecosystem, when the type is a known one
    pub fn ecosystem(&self) -> Option<Ecosystem> {
        match self {
            PackageType::Known(ecosystem) => Some(*ecosystem),
            PackageType::Unrecognized(_) => None,
        }
    }
}

impl From<Ecosystem> for PackageType {
    fn from(ecosystem: Ecosystem) -> Self {
        PackageType::Known(ecosystem)
    }
}

impl From<String> for PackageType {
    fn from(s: String) -> Self {
        Ecosystem::ALL
            .into_iter()
            .find(|ecosystem| ecosystem.package_type() == s)
            .map(PackageType::Known)
            .unwrap_or(PackageType::Unrecognized(s))
    }
}

impl From<PackageType> for String {
    fn from(package_type: PackageType) -> Self {
        match package_type {
            PackageType::Known(ecosystem) => ecosystem.package_type(),
            PackageType::Unrecognized(s) => s,
        }
    }
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageType::Known(ecosystem) => f.write_str(&ecosystem.package_type()),
            PackageType::Unrecognized(s) => f.write_str(s),
        }
    }
}
