//! Configuration types for trusty-client

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default root of the Trusty API
pub const DEFAULT_BASE_URL: &str = "https://api.trustypkg.dev";

/// Environment variable that overrides [`ClientOptions::base_url`] in
/// [`ClientOptions::from_env`]
pub const ENDPOINT_ENV_VAR: &str = "TRUSTY_ENDPOINT";

/// Options for a [`TrustyClient`](crate::TrustyClient)
///
/// Options are read once when the client is built and never change
/// afterwards. Every field has a serde default, so a partial JSON/TOML
/// document is enough to configure a client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientOptions {
    /// Maximum number of parallel requests for batch operations (default: 2)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Root URL of the Trusty API (default: "https://api.trustypkg.dev")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Keep polling a report while the package is "pending" or "scoring" (default: true)
    #[serde(default = "default_true")]
    pub wait_for_ingestion: bool,

    /// Return an error when the package ingestion failed upstream (default: false)
    ///
    /// When false the report is returned as-is and the caller is expected to
    /// inspect its ingestion status.
    #[serde(default)]
    pub err_on_failed_ingestion: bool,

    /// Delay between two polls of a package still being ingested (default: 5 seconds)
    ///
    /// Serialized as seconds; fractions are allowed (e.g. `0.25`).
    #[serde(default = "default_ingestion_retry_wait", with = "duration_serde")]
    pub ingestion_retry_wait: Duration,

    /// Maximum number of extra requests sent while waiting for ingestion
    ///
    /// `None` (the default) polls until the package reaches a terminal state.
    /// `Some(0)` never retries: a package still being ingested on the first
    /// request is reported as [`Error::RetryBudgetExhausted`](crate::Error::RetryBudgetExhausted).
    #[serde(default)]
    pub ingestion_max_retries: Option<u32>,

    /// Per-request timeout of the HTTP transport (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            base_url: default_base_url(),
            wait_for_ingestion: true,
            err_on_failed_ingestion: false,
            ingestion_retry_wait: default_ingestion_retry_wait(),
            ingestion_max_retries: None,
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientOptions {
    /// Default options with the base URL taken from `TRUSTY_ENDPOINT` when set
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();
        if let Some(endpoint) = lookup(ENDPOINT_ENV_VAR).filter(|ep| !ep.is_empty()) {
            tracing::debug!(endpoint = %endpoint, "Using API endpoint from environment");
            opts.base_url = endpoint;
        }
        opts
    }

    /// Replace unset values (empty base URL, zero workers) with the defaults
    pub fn normalized(mut self) -> Self {
        if self.base_url.is_empty() {
            self.base_url = default_base_url();
        }
        if self.workers == 0 {
            self.workers = default_workers();
        }
        self
    }
}

fn default_true() -> bool {
    true
}

fn default_workers() -> usize {
    2
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_ingestion_retry_wait() -> Duration {
    Duration::from_secs(5)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    concat!("trusty-client/", env!("CARGO_PKG_VERSION")).to_string()
}

// Duration serialization helper
//
// Durations are seconds. Whole values are written as integers; fractional
// seconds are accepted and written back without losing precision.
mod duration_serde {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_nanos() == 0 {
            serializer.serialize_u64(duration.as_secs())
        } else {
            serializer.serialize_f64(duration.as_secs_f64())
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs)
            .map_err(|e| D::Error::custom(format!("invalid duration {}: {}", secs, e)))
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let opts = ClientOptions::default();
        assert_eq!(opts.workers, 2);
        assert_eq!(opts.base_url, DEFAULT_BASE_URL);
        assert!(opts.wait_for_ingestion);
        assert!(!opts.err_on_failed_ingestion);
        assert_eq!(opts.ingestion_retry_wait, Duration::from_secs(5));
        assert_eq!(opts.ingestion_max_retries, None);
    }

    #[test]
    fn env_overrides_base_url() {
        let opts = ClientOptions::from_lookup(|key| {
            (key == ENDPOINT_ENV_VAR).then(|| "http://localhost:8080".to_string())
        });
        assert_eq!(opts.base_url, "http://localhost:8080");
    }

    #[test]
    fn empty_env_value_is_ignored() {
        let opts = ClientOptions::from_lookup(|_| Some(String::new()));
        assert_eq!(opts.base_url, DEFAULT_BASE_URL);

        let opts = ClientOptions::from_lookup(|_| None);
        assert_eq!(opts.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn normalized_fills_defaults() {
        let opts = ClientOptions {
            workers: 0,
            base_url: String::new(),
            ..Default::default()
        }
        .normalized();
        assert_eq!(opts.workers, 2);
        assert_eq!(opts.base_url, DEFAULT_BASE_URL);

        let opts = ClientOptions {
            workers: 1,
            base_url: "https://test.com".into(),
            ..Default::default()
        }
        .normalized();
        assert_eq!(opts.workers, 1);
        assert_eq!(opts.base_url, "https://test.com");
    }

    #[test]
    fn partial_document_uses_defaults() {
        let opts: ClientOptions = serde_json::from_str(
            r#"{"workers": 8, "ingestion_retry_wait": 1, "ingestion_max_retries": 3}"#,
        )
        .unwrap();
        assert_eq!(opts.workers, 8);
        assert_eq!(opts.ingestion_retry_wait, Duration::from_secs(1));
        assert_eq!(opts.ingestion_max_retries, Some(3));
        assert!(opts.wait_for_ingestion);
        assert_eq!(opts.base_url, DEFAULT_BASE_URL);
        assert_eq!(opts.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn sub_second_waits_survive_reencoding() {
        let opts = ClientOptions {
            ingestion_retry_wait: Duration::from_millis(20),
            request_timeout: Duration::from_millis(1500),
            ..Default::default()
        };

        let encoded = serde_json::to_string(&opts).unwrap();
        let decoded: ClientOptions = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded.ingestion_retry_wait, Duration::from_millis(20));
        assert_eq!(decoded.request_timeout, Duration::from_millis(1500));

        let whole = serde_json::to_value(ClientOptions::default()).unwrap();
        assert_eq!(whole["ingestion_retry_wait"], 5);
    }

    #[test]
    fn negative_wait_is_rejected() {
        let err = serde_json::from_str::<ClientOptions>(r#"{"ingestion_retry_wait": -1}"#)
            .unwrap_err();
        assert!(err.to_string().contains("invalid duration"), "{err}");
    }
}
