// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! DuckDuckGo search provider
//!
//! Implements web search using DuckDuckGo's HTML interface.
//! No API key required.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::config::SearchConfig;
use super::provider::SearchProvider;
use super::types::{RawSearchHit, SearchError, SearchResult};

const SEARCH_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// DuckDuckGo search provider (no API key required)
pub struct DuckDuckGoProvider {
    client: Client,
    endpoint: String,
    timeout_ms: u64,
}

impl DuckDuckGoProvider {
    /// Create a new DuckDuckGo provider from search configuration
    pub fn new(config: &SearchConfig) -> Result<Self> {
        // Use a realistic browser User-Agent to avoid being blocked
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(SEARCH_USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            timeout_ms: config.request_timeout_ms,
        })
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("q", query)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    SearchError::ApiError {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        if !response.status().is_success() {
            return Err(SearchError::ApiError {
                status: response.status().as_u16(),
                message: "DuckDuckGo request failed".to_string(),
            });
        }

        let html = response.text().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout {
                    timeout_ms: self.timeout_ms,
                }
            } else {
                SearchError::ApiError {
                    status: 0,
                    message: e.to_string(),
                }
            }
        })?;

        Ok(parse_ddg_html(&html, num_results))
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }
}

/// Parse a DuckDuckGo HTML results page
///
/// Ads are skipped. Hits without a usable URL are dropped, so the result
/// may be shorter than the number of result blocks on the page.
pub fn parse_ddg_html(html: &str, max_results: usize) -> Vec<SearchResult> {
    let document = Html::parse_document(html);
    let (Ok(block_sel), Ok(link_sel), Ok(snippet_sel)) = (
        Selector::parse("div.result"),
        Selector::parse("a.result__a"),
        Selector::parse(".result__snippet"),
    ) else {
        return Vec::new();
    };

    let mut results = Vec::new();
    for block in document.select(&block_sel) {
        if results.len() >= max_results {
            break;
        }
        if block.value().classes().any(|c| c == "result--ad") {
            continue;
        }

        let link = block.select(&link_sel).next();
        let raw = RawSearchHit {
            title: link.map(element_text),
            href: link
                .and_then(|a| a.value().attr("href"))
                .and_then(extract_ddg_url),
            snippet: block.select(&snippet_sel).next().map(element_text),
        };

        match SearchResult::from_raw(raw, "duckduckgo") {
            Some(result) => results.push(result),
            None => debug!("Skipping DuckDuckGo hit without a usable URL"),
        }
    }

    results
}

/// Collapse the text of an element into a single whitespace-normalized line
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract the target URL from a DuckDuckGo redirect link
///
/// DDG links look like `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`.
/// Direct absolute links are returned unchanged.
fn extract_ddg_url(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href.to_string()
    };

    let parsed = Url::parse(&absolute).ok()?;
    if let Some((_, target)) = parsed.query_pairs().find(|(key, _)| key == "uddg") {
        return Some(target.into_owned());
    }

    if matches!(parsed.scheme(), "http" | "https") {
        Some(absolute)
    } else {
        None
    }
}
