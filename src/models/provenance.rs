//! Provenance signals, shared by the v1 report and the v2 provenance endpoint

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How confidently a package can be traced back to its source repository
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Provenance {
    /// Provenance score
    #[serde(deserialize_with = "super::null_as_default")]
    pub score: f64,

    /// Breakdown of the score
    #[serde(deserialize_with = "super::null_as_default")]
    pub description: ProvenanceDescription,

    /// When the provenance data was last computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Historical and sigstore provenance details
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvenanceDescription {
    /// Match between registry releases and repository tags
    #[serde(rename = "hp", deserialize_with = "super::null_as_default")]
    pub historical: HistoricalProvenance,

    /// Sigstore attestation data
    ///
    /// The v1 report names this key `provenance`, the v2 endpoint `sigstore`.
    #[serde(
        rename = "sigstore",
        alias = "provenance",
        deserialize_with = "super::null_as_default"
    )]
    pub sigstore: SigstoreProvenance,
}

/// Overlap between published versions and repository tags
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricalProvenance {
    /// Number of tags in the repository
    #[serde(deserialize_with = "super::null_as_default")]
    pub tags: f64,
    /// Number of versions that match a tag
    #[serde(deserialize_with = "super::null_as_default")]
    pub common: f64,
    /// Percentage of versions matching a tag
    #[serde(deserialize_with = "super::null_as_default")]
    pub overlap: f64,
    /// Number of published versions
    #[serde(deserialize_with = "super::null_as_default")]
    pub versions: f64,
    /// Raw time series of the overlap, when provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub over_time: Option<serde_json::Value>,
}

/// Sigstore attestation of the package build
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigstoreProvenance {
    /// Certificate issuer
    #[serde(deserialize_with = "super::null_as_default")]
    pub issuer: String,
    /// Build workflow
    #[serde(deserialize_with = "super::null_as_default")]
    pub workflow: String,
    /// Repository the package was built from
    #[serde(rename = "source_repo", deserialize_with = "super::null_as_default")]
    pub source_repository: String,
    /// OIDC token issuer
    #[serde(deserialize_with = "super::null_as_default")]
    pub token_issuer: String,
    /// Transparency log entry
    #[serde(deserialize_with = "super::null_as_default")]
    pub transparency: String,
}
