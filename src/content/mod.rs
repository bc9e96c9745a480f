//! Page fetching and paragraph extraction
//!
//! Turns the candidate URLs from the search stage into per-page text
//! for the context assembler.
//!
//! ## Architecture
//!
//! ```text
//! URLs → FetchOrchestrator ─┬→ PageFetcher (UA rotation, timeout) → HTML
//!                           │        ↓
//!                           │   extract_paragraphs → truncate_words
//!                           ↓
//!                     PageContext (input order, successes only)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let orchestrator = FetchOrchestrator::new(&FetchConfig::from_env().with_word_limit(400))?;
//! let context = orchestrator.gather(&urls).await;
//! ```

pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod identity;
pub mod orchestrator;
pub mod truncate;
pub mod types;

pub use config::{FetchConfig, DEFAULT_USER_AGENTS, MAX_CONCURRENCY_CAP};
pub use extractor::{extract_paragraphs, is_non_text_content_type};
pub use fetcher::{HttpPageFetcher, PageFetcher};
pub use identity::{FixedUserAgent, IdentitySource, UserAgentPool};
pub use orchestrator::FetchOrchestrator;
pub use truncate::truncate_words;
pub use types::{FetchError, FetchResult, FetchedPage};
