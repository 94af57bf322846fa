//! Single request: GET, status check, JSON decode

use crate::error::{Error, Result};
use crate::transport::{HttpResponse, Transport};
use serde::de::DeserializeOwned;
use url::Url;

/// GET `url` once and decode the JSON body into `T`
///
/// Any status other than 200 is an error and the body is not parsed.
pub async fn fetch_json<T, R>(transport: &R, url: &Url) -> Result<T>
where
    T: DeserializeOwned,
    R: Transport + ?Sized,
{
    let response = transport.get(url).await.map_err(|source| Error::Transport {
        url: url.to_string(),
        source,
    })?;

    decode_response(url, &response)
}

/// Check the status of `response` and decode its body
pub(crate) fn decode_response<T: DeserializeOwned>(url: &Url, response: &HttpResponse) -> Result<T> {
    check_status(url, response)?;
    Ok(serde_json::from_slice(&response.body)?)
}

pub(crate) fn check_status(url: &Url, response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        Ok(())
    } else {
        tracing::debug!(url = %url, status = response.status, "Unexpected response status");
        Err(Error::UnexpectedStatus {
            url: url.to_string(),
            status: response.status,
        })
    }
}
