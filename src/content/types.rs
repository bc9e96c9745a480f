//! Types shared by the fetch, extract and orchestration stages

use thiserror::Error;

/// Raw response of a successful page fetch
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    /// `Content-Type` header, if the server sent one
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Why a single URL produced no context
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Request exceeded the per-page timeout
    #[error("timed out")]
    Timeout,

    /// Server answered with a non-2xx status
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Page had no paragraph text
    #[error("no extractable content")]
    NoExtractableContent,

    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("network error: {0}")]
    Network(String),

    /// URL is malformed, not http(s), or points at a private host
    #[error("unsafe URL: {0}")]
    UnsafeUrl(String),
}

/// Outcome of the fetch-extract-truncate unit for one candidate URL
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub url: String,
    pub outcome: Result<String, FetchError>,
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}
