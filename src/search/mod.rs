// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Web search module
//!
//! Turns a free-text query into a short, rank-ordered list of candidate
//! URLs for the fetch stage.
//!
//! Key features:
//! - DuckDuckGo HTML provider (no API key)
//! - Fixed candidate cap ([`CANDIDATE_LIMIT`])
//! - Outgoing rate limiting
//! - Hits without a usable URL are skipped, not fatal

pub mod config;
pub mod duckduckgo;
pub mod provider;
pub mod rate_limiter;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::SearchConfig;
pub use duckduckgo::DuckDuckGoProvider;
pub use provider::SearchProvider;
pub use service::SearchService;
pub use types::{SearchError, SearchResult, CANDIDATE_LIMIT};
