// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for web search functionality

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Maximum number of candidate URLs taken from a single search.
///
/// Fixed rather than per-call so the fetch stage never fans out wider
/// than its worker pool.
pub const CANDIDATE_LIMIT: usize = 5;

/// Maximum accepted length of a search query, in characters
pub const MAX_QUERY_CHARS: usize = 500;

/// A single search result from a web search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Title of the search result
    pub title: String,
    /// Absolute http(s) URL of the search result
    pub url: String,
    /// Snippet/description of the search result
    pub snippet: String,
    /// Source provider (e.g., "duckduckgo")
    pub source: String,
}

/// A result record as scraped from a provider page, before validation
#[derive(Debug, Clone, Default)]
pub struct RawSearchHit {
    pub title: Option<String>,
    pub href: Option<String>,
    pub snippet: Option<String>,
}

impl SearchResult {
    /// Build a result from a raw hit.
    ///
    /// Returns `None` when the hit has no URL or the URL is not an
    /// absolute http(s) URL; such hits are skipped, never fatal.
    pub fn from_raw(raw: RawSearchHit, source: &str) -> Option<Self> {
        let href = raw.href?;
        let href = href.trim();
        let parsed = Url::parse(href).ok()?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return None;
        }

        Some(Self {
            title: raw.title.unwrap_or_default(),
            url: parsed.to_string(),
            snippet: raw.snippet.unwrap_or_default(),
            source: source.to_string(),
        })
    }
}

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    /// Rate limited locally before reaching the provider
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// API error from the search provider
    #[error("Search API error: {status} - {message}")]
    ApiError {
        /// HTTP status code (0 when no response was received)
        status: u16,
        /// Error message
        message: String,
    },

    /// Search request timed out
    #[error("Search timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// Invalid search query
    #[error("Invalid query: {reason}")]
    InvalidQuery {
        /// Reason the query is invalid
        reason: String,
    },

    /// Search is disabled by configuration
    #[error("Web search is disabled")]
    SearchDisabled,
}

/// Validate a caller-supplied query, returning the trimmed form
pub fn validate_query(query: &str) -> Result<&str, SearchError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(SearchError::InvalidQuery {
            reason: "query cannot be empty".to_string(),
        });
    }
    if trimmed.chars().count() > MAX_QUERY_CHARS {
        return Err(SearchError::InvalidQuery {
            reason: format!("query too long (max {} characters)", MAX_QUERY_CHARS),
        });
    }
    Ok(trimmed)
}
