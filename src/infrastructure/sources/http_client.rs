//! # HTTP Client
//!
//! Shared JSON client for upstream sources.
//!
//! Wraps a reqwest client with:
//! - A per-request timeout, so every fetch resolves
//! - JSON deserialization
//! - Mapping of transport failures and non-2xx statuses into [`SourceError`]
//!
//! # Examples
//!
//! ```ignore
//! use profile_aggregator::infrastructure::sources::http_client::HttpClient;
//!
//! let client = HttpClient::new(5000)?;
//! let url = HttpClient::endpoint(&base, &["users", "1"])?;
//! let user: UserRecord = client.get(url).await?;
//! ```

use crate::infrastructure::sources::error::{FetchResult, SourceError};
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Error body upstreams send alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    error: String,
}

/// HTTP client wrapper for upstream sources.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Internal` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .no_proxy()
            .build()
            .map_err(|e| SourceError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Appends percent-encoded path segments to a base URL.
    ///
    /// A trailing slash on `base` is tolerated.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Internal` if `base` cannot carry a path.
    pub fn endpoint(base: &Url, segments: &[&str]) -> FetchResult<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| SourceError::internal(format!("base URL cannot hold a path: {}", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Makes a GET request and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Timeout` or `SourceError::Connection` if the request fails.
    /// Returns `SourceError::Upstream` or `SourceError::Status` on a non-2xx response.
    /// Returns `SourceError::Decode` if the response cannot be parsed.
    pub async fn get<T: DeserializeOwned>(&self, url: Url) -> FetchResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Makes a GET request with query parameters and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::get`].
    pub async fn get_with_params<T: DeserializeOwned, P: serde::Serialize + ?Sized>(
        &self,
        url: Url,
        params: &P,
    ) -> FetchResult<T> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> FetchResult<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| self.map_body_error(e))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            Err(map_status_error(status, &error_body))
        }
    }

    /// Maps a reqwest error raised while sending.
    fn map_reqwest_error(&self, error: reqwest::Error) -> SourceError {
        if error.is_timeout() {
            SourceError::timeout(format!("no response after {}ms", self.timeout_ms))
        } else if error.is_connect() {
            SourceError::connection(error.to_string())
        } else {
            SourceError::connection(format!("HTTP request failed: {}", error))
        }
    }

    /// Maps a reqwest error raised while reading a 2xx body.
    fn map_body_error(&self, error: reqwest::Error) -> SourceError {
        if error.is_timeout() {
            SourceError::timeout(format!("body not received after {}ms", self.timeout_ms))
        } else {
            SourceError::decode(error.to_string())
        }
    }
}

/// Maps a non-2xx response, preferring the upstream's own `error` field.
fn map_status_error(status: StatusCode, body: &str) -> SourceError {
    match serde_json::from_str::<UpstreamErrorBody>(body) {
        Ok(parsed) if !parsed.error.is_empty() => SourceError::upstream(status.as_u16(), parsed.error),
        _ => SourceError::status(status.as_u16()),
    }
}
