//! Parallel fetch-extract-truncate over the candidate URLs
//!
//! Each URL gets its own task; a semaphore bounds how many are in flight.
//! Join handles are kept in input order, so `results[i]` always belongs to
//! `urls[i]` no matter which task finishes first.

use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use super::config::{FetchConfig, MAX_CONCURRENCY_CAP};
use super::extractor::extract_paragraphs;
use super::fetcher::{HttpPageFetcher, PageFetcher};
use super::truncate::{preview, truncate_words};
use super::types::{FetchError, FetchResult};
use crate::context::{ContextPage, PageContext};

/// Fans candidate URLs out to the fetch pipeline
pub struct FetchOrchestrator {
    fetcher: Arc<dyn PageFetcher>,
    permits: Arc<Semaphore>,
    word_limit: usize,
    preview_chars: usize,
}

impl FetchOrchestrator {
    /// Create an orchestrator using the HTTP fetcher
    pub fn new(config: &FetchConfig) -> anyhow::Result<Self> {
        let fetcher = Arc::new(HttpPageFetcher::new(config)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Create an orchestrator around any fetcher
    ///
    /// `max_concurrency` is clamped to `1..=MAX_CONCURRENCY_CAP`.
    pub fn with_fetcher(config: &FetchConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            permits: Arc::new(Semaphore::new(
                config.max_concurrency.clamp(1, MAX_CONCURRENCY_CAP),
            )),
            word_limit: config.word_limit,
            preview_chars: config.preview_chars,
        }
    }

    /// Words kept per page
    pub fn word_limit(&self) -> usize {
        self.word_limit
    }

    /// Fetch, extract and truncate every URL
    ///
    /// Waits for every task. The output has the same length and order as
    /// `urls`; failures stay in their slot as `Err`.
    pub async fn fetch_all(&self, urls: &[String]) -> Vec<FetchResult> {
        let handles: Vec<_> = urls
            .iter()
            .map(|url| {
                let fetcher = self.fetcher.clone();
                let permits = self.permits.clone();
                let url = url.clone();
                let word_limit = self.word_limit;
                tokio::spawn(async move {
                    // The semaphore is never closed
                    let _permit = permits.acquire_owned().await.ok();
                    fetch_one(fetcher.as_ref(), &url, word_limit).await
                })
            })
            .collect();

        let joined = join_all(handles).await;

        urls.iter()
            .zip(joined)
            .map(|(url, joined)| {
                let outcome = joined.unwrap_or_else(|e| {
                    Err(FetchError::Network(format!("fetch task aborted: {}", e)))
                });
                let result = FetchResult {
                    url: url.clone(),
                    outcome,
                };
                self.log_outcome(&result);
                result
            })
            .collect()
    }

    /// Successful pages only, in original URL order
    pub fn page_context(results: Vec<FetchResult>) -> PageContext {
        let pages = results
            .into_iter()
            .filter_map(|r| {
                r.outcome
                    .ok()
                    .map(|text| ContextPage { url: r.url, text })
            })
            .collect();
        PageContext::new(pages)
    }

    /// Convenience: `fetch_all` followed by `page_context`
    pub async fn gather(&self, urls: &[String]) -> PageContext {
        Self::page_context(self.fetch_all(urls).await)
    }

    fn log_outcome(&self, result: &FetchResult) {
        match &result.outcome {
            Ok(text) => {
                info!(
                    "Scraped content from {} ({} words):\n{}",
                    result.url,
                    text.split_whitespace().count(),
                    preview(text, self.preview_chars)
                );
            }
            Err(FetchError::HttpStatus(status)) => {
                error!("Failed to load page: {} (status code: {})", result.url, status);
            }
            Err(FetchError::NoExtractableContent) => {
                warn!("No <p> content found in page: {}", result.url);
            }
            Err(FetchError::Timeout) => {
                warn!("Timeout fetching {}", result.url);
            }
            Err(e) => {
                warn!("Fetch failed for {}: {}", result.url, e);
            }
        }
    }
}

async fn fetch_one(
    fetcher: &dyn PageFetcher,
    url: &str,
    word_limit: usize,
) -> Result<String, FetchError> {
    let page = fetcher.fetch(url).await?;
    let text = extract_paragraphs(&page.body, page.content_type.as_deref())?;
    Ok(truncate_words(&text, word_limit))
}
