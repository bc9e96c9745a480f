// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Top-level configuration for the answer pipeline

use std::env;

use crate::backend::BackendConfig;
use crate::content::FetchConfig;
use crate::search::SearchConfig;

/// Everything the pipeline needs, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub search: SearchConfig,
    /// Fetch settings; `fetch.word_limit` is replaced by [`Self::word_limit`]
    pub fetch: FetchConfig,
    pub backend: BackendConfig,
    /// Per-page word limit override (`CONTEXT_WORD_LIMIT`)
    pub context_word_limit: Option<usize>,
}

impl PipelineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            search: SearchConfig::from_env(),
            fetch: FetchConfig::from_env(),
            backend: BackendConfig::from_env()?,
            context_word_limit: env::var("CONTEXT_WORD_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok()),
        })
    }

    /// Words kept per page: the override, else the backend profile's limit
    pub fn word_limit(&self) -> usize {
        self.context_word_limit
            .unwrap_or_else(|| self.backend.profile.default_word_limit())
    }

    /// Fetch settings with the resolved word limit
    pub fn fetch_config(&self) -> FetchConfig {
        self.fetch.clone().with_word_limit(self.word_limit())
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), String> {
        self.search.validate().map_err(|e| format!("search: {}", e))?;
        self.fetch_config()
            .validate()
            .map_err(|e| format!("fetch: {}", e))?;
        self.backend.validate().map_err(|e| format!("backend: {}", e))?;
        Ok(())
    }
}
