//! HTTP client for the Crunchbase v4 entity API.
//!
//! Wraps `reqwest` with the fixed `accept` and `X-cb-user-key` headers, the
//! `card_ids` field-group selector, and the retry policy in [`crate::retry`].
//! The response body is returned as an untyped [`serde_json::Value`]; shaping
//! it is the extractor's job.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode, Url};

use crate::error::CrunchbaseError;
use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://api.crunchbase.com/v4/data/entities/";
const API_KEY_HEADER: &str = "x-cb-user-key";
const DEFAULT_CARD_ID: &str = "fields";

/// How many times a request is attempted and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. `1` disables retrying.
    pub max_attempts: u32,
    /// Base delay in seconds: the wait after the n-th failure is `base * 2^n`.
    pub backoff_base_secs: u64,
}

impl RetryPolicy {
    pub const NONE: Self = Self {
        max_attempts: 1,
        backoff_base_secs: 0,
    };
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base_secs: 1,
        }
    }
}

/// Client for the Crunchbase organization endpoint.
///
/// Use [`CrunchbaseClient::new`] for production or
/// [`CrunchbaseClient::with_base_url`] to point at a mock server in tests.
pub struct CrunchbaseClient {
    client: Client,
    base_url: Url,
    card_ids: Vec<String>,
    retry: RetryPolicy,
}

impl CrunchbaseClient {
    /// Creates a client pointed at the production Crunchbase API.
    ///
    /// # Errors
    ///
    /// See [`CrunchbaseClient::with_base_url`].
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CrunchbaseError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// The API key is installed as a sensitive default header so it is sent on
    /// every request but never shows up in `reqwest` debug output.
    ///
    /// # Errors
    ///
    /// - [`CrunchbaseError::InvalidApiKey`] if the key is not a valid header value.
    /// - [`CrunchbaseError::InvalidBaseUrl`] if `base_url` cannot hold path segments.
    /// - [`CrunchbaseError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, CrunchbaseError> {
        let mut key = HeaderValue::from_str(api_key).map_err(CrunchbaseError::InvalidApiKey)?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        let invalid = |reason: String| CrunchbaseError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };
        // Normalise to exactly one trailing slash so joined segments land
        // under the base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("URL cannot have path segments".to_owned()));
        }

        Ok(Self {
            client,
            base_url,
            card_ids: vec![DEFAULT_CARD_ID.to_owned()],
            retry: RetryPolicy::default(),
        })
    }

    /// Replaces the retry policy (default: 3 attempts, 1 s base).
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replaces the requested card ids (default: `fields`). An empty list
    /// keeps the current selection.
    #[must_use]
    pub fn with_card_ids(mut self, card_ids: Vec<String>) -> Self {
        if !card_ids.is_empty() {
            self.card_ids = card_ids;
        }
        self
    }

    /// Fetches one organization by permalink or UUID.
    ///
    /// Calls `GET {base}/organizations/{identifier}?card_ids=...` and returns
    /// the parsed JSON body. Every request failure is retried per the client's
    /// [`RetryPolicy`]; the error of the last attempt is returned.
    ///
    /// # Errors
    ///
    /// - [`CrunchbaseError::NotFound`] on HTTP 404.
    /// - [`CrunchbaseError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`CrunchbaseError::Http`] on network failure or timeout after all attempts.
    /// - [`CrunchbaseError::Deserialize`] if the body is not valid JSON.
    pub async fn fetch_organization(
        &self,
        identifier: &str,
    ) -> Result<serde_json::Value, CrunchbaseError> {
        let url = self.organization_url(identifier)?;
        tracing::info!(
            identifier,
            cards = %self.card_ids.join(","),
            max_attempts = self.retry.max_attempts,
            "fetching organization from Crunchbase"
        );

        let body = retry_with_backoff(
            self.retry.max_attempts,
            self.retry.backoff_base_secs,
            || self.request_json(&url),
        )
        .await?;

        tracing::info!(identifier, "Crunchbase API call successful");
        Ok(body)
    }

    /// Builds `{base}/organizations/{identifier}` with the `card_ids` query.
    ///
    /// The identifier is pushed as a single path segment, so `/`, `?` and
    /// other reserved characters are percent-encoded.
    fn organization_url(&self, identifier: &str) -> Result<Url, CrunchbaseError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CrunchbaseError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "URL cannot have path segments".to_owned(),
            })?
            .pop_if_empty()
            .push("organizations")
            .push(identifier);
        url.query_pairs_mut()
            .append_pair("card_ids", &self.card_ids.join(","));
        Ok(url)
    }

    /// Sends one GET and classifies the outcome.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, CrunchbaseError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CrunchbaseError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(CrunchbaseError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CrunchbaseError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
