//! Response bodies of the Trusty API
//!
//! Every field the API may omit is optional and is skipped on serialization
//! when unset, so re-encoding a decoded body never invents values. Required
//! fields read an explicit `null` as their default.

use serde::{Deserialize, Deserializer};

mod package;
mod provenance;
mod report;

pub use package::{
    PackageAlternatives, PackageBasicInfo, PackageMaliciousPayload, PackageSummaryAnnotation,
    ProcessingStatus, ProvenanceType, SummaryDescription, TrustyPackageData, User,
};
pub use provenance::{HistoricalProvenance, Provenance, ProvenanceDescription, SigstoreProvenance};
pub use report::{
    Activity, Alternative, AlternativesList, MaliciousData, PackageData, Reply, ScoreSummary,
    Typosquatting,
};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
