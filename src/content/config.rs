//! Configuration for page fetching
//!
//! Defines settings for HTTP fetching, client identities and content limits.

use std::env;

/// Browser User-Agent strings rotated across page requests
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_6) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/84.0.4147.105 Safari/537.36",
    "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:40.0) Gecko/20100101 Firefox/40.0",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:40.0) Gecko/20100101 Firefox/40.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

/// Upper bound on parallel page fetches
pub const MAX_CONCURRENCY_CAP: usize = 5;

/// Configuration for page fetching
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Pool of client identities (User-Agent values)
    pub user_agents: Vec<String>,
    /// Timeout per page fetch in milliseconds (default: 10000)
    pub timeout_ms: u64,
    /// Maximum fetches in flight (default: 5, capped at 5)
    pub max_concurrency: usize,
    /// Words kept per page after extraction (default: 400)
    pub word_limit: usize,
    /// Maximum response body bytes read per page (default: 5 MiB)
    pub max_body_bytes: usize,
    /// Characters of each page logged as a preview (default: 1000)
    pub preview_chars: usize,
    /// Refuse loopback, private and link-local hosts (default: true)
    pub block_private_hosts: bool,
}

impl FetchConfig {
    /// Load configuration from environment variables
    ///
    /// The word limit keeps its default; the pipeline config resolves it
    /// against the backend profile.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            user_agents: defaults.user_agents,
            timeout_ms: env::var("FETCH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_ms),
            max_concurrency: env::var("FETCH_MAX_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_concurrency)
                .min(MAX_CONCURRENCY_CAP),
            word_limit: defaults.word_limit,
            max_body_bytes: env::var("FETCH_MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
            preview_chars: defaults.preview_chars,
            block_private_hosts: env::var("FETCH_BLOCK_PRIVATE_HOSTS")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(defaults.block_private_hosts),
        }
    }

    /// Same configuration with a different word limit
    pub fn with_word_limit(mut self, word_limit: usize) -> Self {
        self.word_limit = word_limit;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.user_agents.is_empty() {
            return Err("user_agents must contain at least one entry".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be at least 1".to_string());
        }
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be at least 1".to_string());
        }
        if self.max_concurrency > MAX_CONCURRENCY_CAP {
            return Err(format!(
                "max_concurrency must be at most {}",
                MAX_CONCURRENCY_CAP
            ));
        }
        if self.word_limit == 0 {
            return Err("word_limit must be at least 1".to_string());
        }
        if self.max_body_bytes == 0 {
            return Err("max_body_bytes must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
            timeout_ms: 10_000,
            max_concurrency: MAX_CONCURRENCY_CAP,
            word_limit: 400,
            max_body_bytes: 5 * 1024 * 1024,
            preview_chars: 1000,
            block_private_hosts: true,
        }
    }
}
