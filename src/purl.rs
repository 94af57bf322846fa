//! Package URL (purl) parsing
//!
//! Parses identifiers of the form
//! `pkg:type/namespace/name@version?qualifiers#subpath` and maps them to the
//! [`Dependency`] the API understands.

use crate::error::{Error, Result};
use crate::types::{Dependency, Ecosystem};

/// Purl prefixes the API can answer for
const SUPPORTED_PREFIXES: [(&str, Ecosystem); 3] = [
    ("pkg:golang", Ecosystem::Go),
    ("pkg:npm", Ecosystem::Npm),
    ("pkg:pypi", Ecosystem::PyPI),
];

/// A parsed package URL
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Purl {
    /// Package type (e.g. "npm", "golang"), lower-cased
    pub package_type: String,
    /// Namespace segments joined with '/', if any
    pub namespace: Option<String>,
    /// Package name
    pub name: String,
    /// Version, if any
    pub version: Option<String>,
    /// Qualifier key/value pairs in input order
    pub qualifiers: Vec<(String, String)>,
    /// Subpath inside the package, if any
    pub subpath: Option<String>,
}

impl Purl {
    /// Parse a package URL string
    pub fn parse(purl: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidPurl {
            purl: purl.to_string(),
            reason: reason.to_string(),
        };

        let rest = purl
            .strip_prefix("pkg:")
            .ok_or_else(|| invalid("missing \"pkg:\" scheme"))?
            .trim_start_matches('/');

        let (rest, subpath) = match rest.split_once('#') {
            Some((rest, subpath)) => (rest, Some(subpath)),
            None => (rest, None),
        };
        let (rest, qualifiers) = match rest.split_once('?') {
            Some((rest, qualifiers)) => (rest, Some(qualifiers)),
            None => (rest, None),
        };

        let (package_type, path) = rest
            .split_once('/')
            .ok_or_else(|| invalid("missing package name"))?;
        if package_type.is_empty() {
            return Err(invalid("missing package type"));
        }

        // Only the last segment can carry the version; '@' in a namespace is
        // part of the name (e.g. npm scopes).
        let path = path.trim_end_matches('/');
        let (namespace, last) = match path.rsplit_once('/') {
            Some((namespace, last)) => (Some(namespace), last),
            None => (None, path),
        };
        let (name, version) = match last.rsplit_once('@') {
            Some((name, version)) => (name, Some(version)),
            None => (last, None),
        };

        let name = decode(purl, name)?;
        if name.is_empty() {
            return Err(invalid("missing package name"));
        }

        let namespace = match namespace {
            Some(ns) => {
                let segments = ns
                    .split('/')
                    .filter(|s| !s.is_empty())
                    .map(|s| decode(purl, s))
                    .collect::<Result<Vec<_>>>()?;
                (!segments.is_empty()).then(|| segments.join("/"))
            }
            None => None,
        };

        let version = version
            .map(|v| decode(purl, v))
            .transpose()?
            .filter(|v| !v.is_empty());

        let qualifiers = qualifiers
            .into_iter()
            .flat_map(|q| q.split('&'))
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').ok_or_else(|| invalid("malformed qualifier"))?;
                Ok((key.to_lowercase(), decode(purl, value)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let subpath = subpath
            .map(|s| decode(purl, s.trim_matches('/')))
            .transpose()?
            .filter(|s| !s.is_empty());

        Ok(Self {
            package_type: package_type.to_lowercase(),
            namespace,
            name,
            version,
            qualifiers,
            subpath,
        })
    }

    /// Name including the namespace (e.g. "@scope/pkg", "github.com/org/repo")
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}/{}", ns, self.name),
            None => self.name.clone(),
        }
    }
}

impl std::str::FromStr for Purl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn decode(purl: &str, component: &str) -> Result<String> {
    urlencoding::decode(component)
        .map(|c| c.into_owned())
        .map_err(|e| Error::InvalidPurl {
            purl: purl.to_string(),
            reason: format!("invalid percent-encoding: {}", e),
        })
}

/// Ecosystem of a package URL, detected from its prefix
pub fn purl_to_ecosystem(purl: &str) -> Result<Ecosystem> {
    SUPPORTED_PREFIXES
        .iter()
        .find(|(prefix, _)| purl.starts_with(prefix))
        .map(|(_, ecosystem)| *ecosystem)
        .ok_or_else(|| Error::UnsupportedEcosystem(purl.to_string()))
}

/// Convert a package URL into a [`Dependency`]
///
/// The ecosystem is checked before the purl is parsed, so an unsupported
/// scheme is always reported as [`Error::UnsupportedEcosystem`].
pub fn purl_to_dependency(purl: &str) -> Result<Dependency> {
    let ecosystem = purl_to_ecosystem(purl)?;
    let parsed = Purl::parse(purl)?;

    Ok(Dependency {
        name: parsed.full_name(),
        ecosystem: Some(ecosystem),
        version: parsed.version,
    })
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golang_purl_keeps_module_path() {
        let dep = purl_to_dependency("pkg:golang/github.com/k8s.io/release@v1.0.8").unwrap();
        assert_eq!(dep.name, "github.com/k8s.io/release");
        assert_eq!(dep.version.as_deref(), Some("v1.0.8"));
        assert_eq!(dep.ecosystem, Some(Ecosystem::Go));
    }

    #[test]
    fn pypi_purl() {
        let dep = purl_to_dependency("pkg:pypi/requests@1.2.3").unwrap();
        assert_eq!(
            dep,
            Dependency {
                name: "requests".into(),
                ecosystem: Some(Ecosystem::PyPI),
                version: Some("1.2.3".into()),
            }
        );
    }

    #[test]
    fn npm_scoped_purl() {
        let dep = purl_to_dependency("pkg:npm/%40react-stately/color@3.7.0").unwrap();
        assert_eq!(dep.name, "@react-stately/color");
        assert_eq!(dep.version.as_deref(), Some("3.7.0"));
        assert_eq!(dep.ecosystem, Some(Ecosystem::Npm));
    }

    #[test]
    fn purl_without_version() {
        let dep = purl_to_dependency("pkg:npm/%40react-stately/color").unwrap();
        assert_eq!(dep.name, "@react-stately/color");
        assert_eq!(dep.version, None);

        let dep = purl_to_dependency("pkg:npm/@angular/core").unwrap();
        assert_eq!(dep.name, "@angular/core");
        assert_eq!(dep.version, None);
    }

    #[test]
    fn unsupported_ecosystem() {
        let err = purl_to_dependency("pkg:bugget/hello/there@1234").unwrap_err();
        assert!(matches!(err, Error::UnsupportedEcosystem(_)), "{err:?}");

        let err = purl_to_dependency("http:npm/hello/there@1234").unwrap_err();
        assert!(matches!(err, Error::UnsupportedEcosystem(_)), "{err:?}");

        let err = purl_to_ecosystem("pkg:cargo/serde@1.0.0").unwrap_err();
        assert!(matches!(err, Error::UnsupportedEcosystem(_)), "{err:?}");
    }

    #[test]
    fn malformed_purl() {
        let err = purl_to_dependency("pkg:npm").unwrap_err();
        assert!(matches!(err, Error::InvalidPurl { .. }), "{err:?}");

        let err = purl_to_dependency("pkg:pypi/@1.0").unwrap_err();
        assert!(matches!(err, Error::InvalidPurl { .. }), "{err:?}");
    }

    #[test]
    fn parses_qualifiers_and_subpath() {
        let purl: Purl = "pkg:pypi/django@1.11.1?repository_url=https%3A%2F%2Fpypi.org&arch=x86#src/django"
            .parse()
            .unwrap();
        assert_eq!(purl.package_type, "pypi");
        assert_eq!(purl.namespace, None);
        assert_eq!(purl.name, "django");
        assert_eq!(purl.version.as_deref(), Some("1.11.1"));
        assert_eq!(
            purl.qualifiers,
            vec![
                ("repository_url".to_string(), "https://pypi.org".to_string()),
                ("arch".to_string(), "x86".to_string()),
            ]
        );
        assert_eq!(purl.subpath.as_deref(), Some("src/django"));
    }
}
