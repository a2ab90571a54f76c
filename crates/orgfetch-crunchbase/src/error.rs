use thiserror::Error;

/// Errors returned by the Crunchbase organization fetcher.
#[derive(Debug, Error)]
pub enum CrunchbaseError {
    /// Network, TLS, timeout, or body-read failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("organization not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// The key contains bytes that cannot be sent in an HTTP header.
    #[error("API key is not a valid header value")]
    InvalidApiKey(#[source] reqwest::header::InvalidHeaderValue),
}

/// Raised when the response does not have the nested-mapping shape the
/// extractor walks. Missing optional keys are never an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("unexpected response shape at {path}: expected {expected}, found {found}")]
    ShapeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}
