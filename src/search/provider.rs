// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search provider trait definition

use async_trait::async_trait;

use super::types::{SearchError, SearchResult};

/// Trait for implementing search providers
///
/// A provider turns a query into an ordered list of results, most relevant
/// first. Zero results is `Ok(vec![])`, never an error.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a web search
    ///
    /// # Arguments
    /// * `query` - The search query string
    /// * `num_results` - Maximum number of results to return
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError>;

    /// Get the provider name for logging
    fn name(&self) -> &'static str;
}
