pub(crate) mod branch;
pub(crate) mod college;
pub(crate) mod leaderboard;
pub(crate) mod section;
#[cfg(test)]
pub(crate) mod testing;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::ErrorBody;

/// The shared HTTP client plus the API root every resource path hangs off.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: Url,
}

impl Transport {
    pub(crate) fn new(http: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("base_url {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("base_url {base_url} cannot be a base")));
        }
        Ok(Self { http, base_url })
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base URL.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("base_url {} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.url(segments)?;
        debug!(%url, "GET");
        let request = self.http.get(url.clone()).header(ACCEPT, "application/json");
        self.execute(request, &url).await
    }

    pub(crate) async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(segments)?;
        let payload = serde_json::to_vec(body)?;
        debug!(%url, bytes = payload.len(), "POST");
        let request = self
            .http
            .post(url.clone())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        self.execute(request, &url).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &Url,
    ) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            warn!(%url, error = %e, "request failed");
            Error::Http {
                url: url.to_string(),
                source: e,
            }
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| Error::ResponseBody {
            url: url.to_string(),
            source: e,
        })?;

        if !status.is_success() {
            return Err(failure(url, status, &body));
        }

        serde_json::from_slice(&body).map_err(|e| Error::Decode {
            url: url.to_string(),
            source: e,
        })
    }
}

/// Log the raw failure payload, then turn it into an error that carries the
/// server's `message` when there is one.
fn failure(url: &Url, status: StatusCode, body: &[u8]) -> Error {
    warn!(%url, %status, body = %String::from_utf8_lossy(body), "request rejected");

    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());

    match message {
        Some(message) => Error::Server {
            url: url.to_string(),
            status,
            message,
        },
        None => Error::UnexpectedStatus {
            url: url.to_string(),
            status,
        },
    }
}

/// Reject empty or whitespace-only input before a request goes out.
pub(crate) fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(Error::MissingInput { field })
    } else {
        Ok(value)
    }
}
