//! Bodies of the v2 endpoints: summary, package metadata and alternatives

use crate::types::{IngestionStatus, PackageType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Progress of a computation that runs asynchronously on the server
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    /// Still being processed
    InProgress,
    /// Processing finished
    Complete,
}

/// Kind of provenance information found for a package
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProvenanceType {
    /// Fully verified sigstore provenance
    #[serde(rename = "verified_provenance")]
    VerifiedProvenance,
    /// Releases match repository tags
    #[serde(rename = "historical_provenance_match")]
    HistoricalProvenance,
    /// No provenance information
    #[serde(rename = "unknown")]
    Unknown,
    /// Conflicting provenance information
    #[serde(rename = "mismatched")]
    Mismatched,
}

/// Summary of the security signals of a package (`v2/summary`)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageSummaryAnnotation {
    /// Overall score; absent while scoring is in progress
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Per-signal breakdown
    #[serde(deserialize_with = "super::null_as_default")]
    pub description: SummaryDescription,
    /// Whether the summary is final
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProcessingStatus>,
}

/// Per-signal breakdown of a [`PackageSummaryAnnotation`]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryDescription {
    /// Origin of the data
    #[serde(deserialize_with = "super::null_as_default")]
    pub from: String,
    /// Provenance score
    #[serde(deserialize_with = "super::null_as_default")]
    pub provenance: f64,
    /// Trust summary score
    #[serde(rename = "trust-summary", deserialize_with = "super::null_as_default")]
    pub trust_summary: f64,
    /// Typosquatting score
    #[serde(deserialize_with = "super::null_as_default")]
    pub typosquatting: f64,
    /// Author activity score
    #[serde(deserialize_with = "super::null_as_default")]
    pub activity_user: f64,
    /// Repository activity score
    #[serde(deserialize_with = "super::null_as_default")]
    pub activity_repo: f64,
    /// Combined activity score
    #[serde(deserialize_with = "super::null_as_default")]
    pub activity: f64,
    /// Trust-weighted activity score
    #[serde(rename = "trust-activity", deserialize_with = "super::null_as_default")]
    pub trust_activity: f64,
    /// Package is flagged as malicious
    #[serde(deserialize_with = "super::null_as_default")]
    pub malicious: bool,
    /// Kind of provenance found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance_type: Option<ProvenanceType>,
}

/// Registry and repository metadata of a package (`v2/pkg`)
// Field names mirror the API keys.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustyPackageData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IngestionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub package_type: Option<PackageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    // The API really spells it this way.
    #[serde(rename = "packag_description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stargazers_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watchers_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_projects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_downloads: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forks_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deprecated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_issues_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_repos: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_gists: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "super::null_as_default")]
    pub contributors: Vec<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub malicious: Option<PackageMaliciousPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_triggered_reingestion: Option<bool>,
}

/// Repository owner or contributor
// Field names mirror the API keys.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravatar_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub hireable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_repos: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_gists: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<serde_json::Value>,
}

/// Advisory attached to a malicious package
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageMaliciousPayload {
    /// Short summary
    #[serde(deserialize_with = "super::null_as_default")]
    pub summary: String,
    /// Full details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Publication time of the advisory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
    /// Last modification of the advisory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    /// Advisory source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Packages that can be used in place of the queried one (`v2/alternatives`)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageAlternatives {
    /// Whether the list is final
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProcessingStatus>,
    /// Suggested packages
    #[serde(deserialize_with = "super::null_as_default")]
    pub packages: Vec<PackageBasicInfo>,
}

/// Short description of a package
// Field names mirror the API keys.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageBasicInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub package_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_type: Option<PackageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub is_malicious: bool,
}
