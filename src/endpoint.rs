//! Query URL construction for the Trusty API

use crate::error::{Error, Result};
use crate::types::Dependency;
use url::Url;

/// Path of the v1 package report
pub const REPORT_PATH: &str = "v1/report";
/// Path of the v2 security summary
pub const SUMMARY_PATH: &str = "v2/summary";
/// Path of the v2 package metadata
pub const PACKAGE_PATH: &str = "v2/pkg";
/// Path of the v2 alternatives list
pub const ALTERNATIVES_PATH: &str = "v2/alternatives";
/// Path of the v2 provenance details
pub const PROVENANCE_PATH: &str = "v2/provenance";

/// Build the query URL for `dependency` on the API path `path`.
///
/// The dependency is validated first; a dependency missing its name and its
/// ecosystem yields one error listing both problems. The query carries
/// `package_name`, `package_type` (lower-cased ecosystem) and, when a
/// non-empty version is set, `package_version`.
pub fn resolve(base_url: &str, path: &str, dependency: &Dependency) -> Result<Url> {
    dependency.validate()?;

    let package_type = dependency
        .ecosystem
        .map(|ecosystem| ecosystem.package_type())
        .unwrap_or_default();

    let mut params = vec![
        ("package_name", dependency.name.as_str()),
        ("package_type", package_type.as_str()),
    ];
    if let Some(version) = dependency.version.as_deref().filter(|v| !v.is_empty()) {
        params.push(("package_version", version));
    }

    join(base_url, path, &params)
}

/// Append `path` to the path of `base_url` and add `params` to the query.
///
/// Existing path segments of the base URL are kept, empty segments are
/// dropped, and a trailing slash on `path` is preserved.
pub fn join(base_url: &str, path: &str, params: &[(&str, &str)]) -> Result<Url> {
    let mut url = Url::parse(base_url).map_err(|e| Error::MalformedBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    {
        let mut segments = url.path_segments_mut().map_err(|()| Error::MalformedBaseUrl {
            url: base_url.to_string(),
            reason: "URL cannot carry a path".to_string(),
        })?;
        segments.pop_if_empty();

        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        segments.extend(&parts);
        if path.ends_with('/') && !parts.is_empty() {
            segments.push("");
        }
    }

    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }

    Ok(url)
}
