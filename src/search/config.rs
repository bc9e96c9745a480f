// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for web search functionality

use std::env;

/// Default DuckDuckGo HTML endpoint
pub const DEFAULT_DDG_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Configuration for web search functionality
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Whether web search is enabled
    pub enabled: bool,
    /// DuckDuckGo HTML endpoint
    pub endpoint: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Rate limit (requests per minute)
    pub rate_limit_per_minute: u32,
}

impl SearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            // Set WEB_SEARCH_ENABLED=false to disable
            enabled: env::var("WEB_SEARCH_ENABLED")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(defaults.enabled),
            endpoint: env::var("DDG_ENDPOINT").unwrap_or(defaults.endpoint),
            request_timeout_ms: env::var("SEARCH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
            rate_limit_per_minute: env::var("SEARCH_RATE_LIMIT_PER_MINUTE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rate_limit_per_minute),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("Search endpoint must not be empty".to_string());
        }
        if self.request_timeout_ms == 0 {
            return Err("Search timeout must be greater than 0".to_string());
        }
        if self.rate_limit_per_minute == 0 {
            return Err("Rate limit must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_DDG_ENDPOINT.to_string(),
            request_timeout_ms: 10_000,
            rate_limit_per_minute: 30,
        }
    }
}
