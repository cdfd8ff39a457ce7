//! Catalog API client.
//!
//! This module provides:
//!
//! - `ApiClient`: reqwest wrapper that resolves endpoints against the configured
//!   base URL and normalizes every failure into a [`ParsedError`]
//! - `ShowApi`: the seam the fetch layer talks to, so views can run against a
//!   mock in tests
//! - Endpoint helpers for the three resources the app reads
//!
//! Non-success responses are inspected for a JSON `{ "message": ... }` body.
//! When there is none, the error reads `HTTP error! status: <code>`.

mod error;
#[cfg(test)]
pub(crate) mod mock;

use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use error::{ParsedError, parse_error};

/// User agent for API requests
const USER_AGENT: &str = concat!("Ertflix/", env!("CARGO_PKG_VERSION"));

/// Endpoint listing the first page of the catalog
pub const SHOWS_ENDPOINT: &str = "shows";

/// Endpoint for a single show
pub fn show_endpoint(id: u64) -> String {
    format!("shows/{}", id)
}

/// Endpoint for a free-text show search
pub fn search_endpoint(query: &str) -> String {
    format!("search/shows?q={}", urlencoding::encode(query))
}

/// Per-request options layered on top of the client defaults
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra request headers
    pub headers: Vec<(String, String)>,
    /// Overrides the client-wide timeout
    pub timeout: Option<Duration>,
}

/// Source of raw JSON payloads for catalog endpoints.
pub trait ShowApi: Send + Sync {
    fn get_json<'a>(
        &'a self,
        endpoint: &'a str,
        options: &'a RequestOptions,
    ) -> BoxFuture<'a, Result<Value, ParsedError>>;
}

/// Fetch `endpoint` and decode the payload into `T`.
pub async fn api_fetch<T: DeserializeOwned>(
    api: &dyn ShowApi,
    endpoint: &str,
    options: &RequestOptions,
) -> Result<T, ParsedError> {
    let value = api.get_json(endpoint, options).await?;
    Ok(serde_json::from_value(value)?)
}

/// Body returned by the API alongside error statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the catalog API
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client rooted at `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ParsedError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve an endpoint suffix against the base URL
    pub fn url_for(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn request(&self, endpoint: &str, options: &RequestOptions) -> Result<Value, ParsedError> {
        let start = Instant::now();
        let url = self.url_for(endpoint);

        let mut request = self.client.get(&url);
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.inspect_err(|e| {
            tracing::warn!("Request to {} failed: {}", url, e);
        })?;

        let status = response.status();
        if !status.is_success() {
            let fallback = ParsedError::http_status(status.as_u16());
            let err = match response.json::<ErrorBody>().await {
                Ok(ErrorBody {
                    message: Some(message),
                }) if !message.is_empty() => ParsedError::new(message),
                _ => fallback,
            };
            tracing::warn!("{} returned {}: {}", url, status, err);
            return Err(err);
        }

        let value = response.json::<Value>().await?;
        tracing::debug!(
            "Fetched {} in {:.2}s",
            endpoint,
            start.elapsed().as_secs_f32()
        );
        Ok(value)
    }
}

impl ShowApi for ApiClient {
    fn get_json<'a>(
        &'a self,
        endpoint: &'a str,
        options: &'a RequestOptions,
    ) -> BoxFuture<'a, Result<Value, ParsedError>> {
        Box::pin(self.request(endpoint, options))
    }
}
