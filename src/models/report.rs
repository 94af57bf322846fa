//! Package report returned by the `v1/report` endpoint

use super::provenance::Provenance;
use crate::types::IngestionStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Full report of the trust signals computed for a package
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reply {
    /// Package name
    #[serde(deserialize_with = "super::null_as_default")]
    pub package_name: String,
    /// Ecosystem token (e.g. "pypi")
    #[serde(deserialize_with = "super::null_as_default")]
    pub package_type: String,
    /// Version the report refers to
    #[serde(deserialize_with = "super::null_as_default")]
    pub package_version: String,
    /// Report status as sent by the API
    #[serde(deserialize_with = "super::null_as_default")]
    pub status: String,
    /// Overall score
    #[serde(deserialize_with = "super::null_as_default")]
    pub summary: ScoreSummary,
    /// Provenance signals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
    /// Repository and author activity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<Activity>,
    /// Typosquatting risk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typosquatting: Option<Typosquatting>,
    /// Packages that could replace this one
    #[serde(deserialize_with = "super::null_as_default")]
    pub alternatives: AlternativesList,
    /// Registry metadata, including the ingestion status
    #[serde(deserialize_with = "super::null_as_default")]
    pub package_data: PackageData,
}

impl Reply {
    /// Ingestion state of the package, if the API reported one
    pub fn ingestion_status(&self) -> Option<&IngestionStatus> {
        self.package_data.status.as_ref()
    }

    /// True when the package has been flagged as malicious
    pub fn is_malicious(&self) -> bool {
        self.package_data.malicious.is_some()
    }
}

/// Activity score of the package
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    /// Score
    #[serde(deserialize_with = "super::null_as_default")]
    pub score: f64,
    /// Explanation
    #[serde(deserialize_with = "super::null_as_default")]
    pub description: String,
}

/// Typosquatting score of the package
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Typosquatting {
    /// Score
    #[serde(deserialize_with = "super::null_as_default")]
    pub score: f64,
    /// Explanation
    #[serde(deserialize_with = "super::null_as_default")]
    pub description: String,
}

/// An alternative package suggestion
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alternative {
    /// Name of the alternative package
    #[serde(deserialize_with = "super::null_as_default")]
    pub package_name: String,
    /// Its score
    #[serde(deserialize_with = "super::null_as_default")]
    pub score: f64,
}

/// Alternatives computed for the package
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlternativesList {
    /// Status of the alternatives computation
    #[serde(deserialize_with = "super::null_as_default")]
    pub status: String,
    /// Suggested packages
    #[serde(deserialize_with = "super::null_as_default")]
    pub packages: Vec<Alternative>,
}

/// Overall score and its free-form breakdown
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreSummary {
    /// Overall score; absent while the package is being scored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Per-signal breakdown
    #[serde(deserialize_with = "super::null_as_default")]
    pub description: BTreeMap<String, serde_json::Value>,
}

/// Registry metadata of the package
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageData {
    /// Ingestion state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IngestionStatus>,
    /// Repository is archived
    #[serde(deserialize_with = "super::null_as_default")]
    pub archived: bool,
    /// Package is deprecated in its registry
    #[serde(rename = "is_deprecated", deserialize_with = "super::null_as_default")]
    pub deprecated: bool,
    /// Malicious package advisory, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub malicious: Option<MaliciousData>,
}

/// Advisory for a package flagged as malicious
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaliciousData {
    /// Short summary
    #[serde(deserialize_with = "super::null_as_default")]
    pub summary: String,
    /// Full details
    #[serde(deserialize_with = "super::null_as_default")]
    pub details: String,
    /// Publication time of the advisory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
    /// Last modification of the advisory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    /// Advisory source
    #[serde(deserialize_with = "super::null_as_default")]
    pub source: String,
}
