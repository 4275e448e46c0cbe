//! HTTP transport for the bridge-service client.
//!
//! Thin wrapper over `reqwest` that owns the base URL, applies the JSON
//! content negotiation headers, and classifies failures into the crate's
//! error taxonomy. There is deliberately no retry logic: every bridge call
//! is a single synchronous request/response exchange.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::BridgeConfig;
use crate::error::Error;

/// HTTP transport shared by the resource clients.
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    /// Create a new transport from a [`BridgeConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the HTTP client cannot be built.
    pub fn new(config: &BridgeConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(json_headers())
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URL of the bridge service, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET` a path and decode the JSON response body.
    ///
    /// # Errors
    ///
    /// [`Error::Unavailable`] on transport failure, [`Error::Protocol`] on a
    /// body that does not decode as `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let body = self.get_text(path, query).await?;
        decode(path, &body)
    }

    /// `GET` a path and return the raw response body.
    ///
    /// Used where an empty body is a valid answer and must be distinguished
    /// from a malformed one before decoding.
    ///
    /// # Errors
    ///
    /// [`Error::Unavailable`] on transport failure or server error,
    /// [`Error::Protocol`] on an unexpected status code.
    pub async fn get_text(&self, path: &str, query: &[(&str, String)]) -> Result<String, Error> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "bridge GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Unavailable(format!("GET {path}: {e}")))?;

        let status = response.status();
        check_status(path, status)?;

        response
            .text()
            .await
            .map_err(|e| Error::Unavailable(format!("GET {path}: {e}")))
    }

    /// `POST` a JSON body to a path and decode the JSON response.
    ///
    /// # Errors
    ///
    /// [`Error::Unavailable`] on transport failure, [`Error::Protocol`] on a
    /// body that does not decode as `T`.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let text = self.post_text(path, body).await?;
        decode(path, &text)
    }

    /// `POST` a JSON body and return the raw response body.
    ///
    /// # Errors
    ///
    /// [`Error::Unavailable`] on transport failure or server error,
    /// [`Error::Protocol`] on an unexpected status code.
    pub async fn post_text<B: Serialize>(&self, path: &str, body: &B) -> Result<String, Error> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "bridge POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Unavailable(format!("POST {path}: {e}")))?;

        let status = response.status();
        check_status(path, status)?;

        response
            .text()
            .await
            .map_err(|e| Error::Unavailable(format!("POST {path}: {e}")))
    }
}

/// Headers attached to every bridge request, GETs included: the bridge
/// expects both `Content-Type` and `Accept` to name JSON.
fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Classify a response status. 5xx means the bridge is up but failing, which
/// callers treat the same as unreachable; any other non-2xx breaks the
/// agreed contract.
fn check_status(path: &str, status: StatusCode) -> Result<(), Error> {
    if status.is_server_error() {
        return Err(Error::Unavailable(format!("{path}: HTTP {status}")));
    }
    if !status.is_success() {
        return Err(Error::Protocol(format!(
            "{path}: unexpected status {status}"
        )));
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Protocol(format!("{path}: {e}")))
}
