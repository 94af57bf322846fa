//! Response bodies and client construction for wiremock-backed tests

use std::time::Duration;
use trusty_client::{ClientOptions, TrustyClient};
use wiremock::MockServer;

/// Report body with the given package name and ingestion status
pub fn report_json(name: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "package_name": name,
        "package_type": "pypi",
        "package_version": "2.32.3",
        "status": "complete",
        "summary": {"score": 8.2, "description": {"activity": 7.1}},
        "activity": {"score": 7.1, "description": "active"},
        "alternatives": {"status": "complete", "packages": []},
        "package_data": {"status": status, "archived": false, "is_deprecated": false},
    })
}

/// Options pointing at `server`, with a short retry wait
pub fn options_for(server: &MockServer) -> ClientOptions {
    ClientOptions {
        base_url: server.uri(),
        ingestion_retry_wait: Duration::from_millis(20),
        request_timeout: Duration::from_secs(5),
        ..ClientOptions::default()
    }
}

/// HTTP client pointing at `server`
pub fn client_for(server: &MockServer) -> TrustyClient {
    match TrustyClient::with_options(options_for(server)) {
        Ok(client) => client,
        Err(e) => panic!("failed to build client: {e}"),
    }
}
