// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search service orchestration
//!
//! Validates the query, applies the outgoing rate limit and turns provider
//! results into the ordered candidate URL list for the fetch stage.

use std::time::Instant;
use tracing::{debug, info, warn};

use super::config::SearchConfig;
use super::duckduckgo::DuckDuckGoProvider;
use super::provider::SearchProvider;
use super::rate_limiter::SearchRateLimiter;
use super::types::{validate_query, SearchError, CANDIDATE_LIMIT};

/// Search adapter used by the answer pipeline
pub struct SearchService {
    provider: Box<dyn SearchProvider>,
    rate_limiter: SearchRateLimiter,
    config: SearchConfig,
}

impl SearchService {
    /// Create a search service backed by DuckDuckGo
    pub fn new(config: SearchConfig) -> anyhow::Result<Self> {
        let provider = DuckDuckGoProvider::new(&config)?;
        Ok(Self::with_provider(config, Box::new(provider)))
    }

    /// Create a search service around an arbitrary provider
    pub fn with_provider(config: SearchConfig, provider: Box<dyn SearchProvider>) -> Self {
        let rate_limiter = SearchRateLimiter::new(config.rate_limit_per_minute);
        debug!("Search provider enabled: {}", provider.name());

        Self {
            provider,
            rate_limiter,
            config,
        }
    }

    /// Search and return up to [`CANDIDATE_LIMIT`] candidate URLs in rank order
    ///
    /// An empty vector means the provider found nothing; it is not an error.
    pub async fn search(&self, query: &str) -> Result<Vec<String>, SearchError> {
        if !self.config.enabled {
            return Err(SearchError::SearchDisabled);
        }

        let query = validate_query(query)?;
        self.rate_limiter.check()?;

        let start = Instant::now();
        let results = self.provider.search(query, CANDIDATE_LIMIT).await?;
        let urls: Vec<String> = results
            .into_iter()
            .take(CANDIDATE_LIMIT)
            .map(|r| r.url)
            .collect();

        if urls.is_empty() {
            warn!("No URLs returned by {} for '{}'", self.provider.name(), query);
            return Ok(urls);
        }

        info!(
            "URLs fetched from {} in {}ms: {:?}",
            self.provider.name(),
            start.elapsed().as_millis(),
            urls
        );

        Ok(urls)
    }

    /// Check if search is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Name of the configured provider
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }
}
