// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Answer backends
//!
//! Two interchangeable clients share the [`AnswerBackend`] contract:
//! - [`LocalChatBackend`]: single-turn chat against a local Ollama model
//! - [`CloudGenerationBackend`]: Gemini `generateContent` with an API key
//!
//! The backend is chosen once from [`BackendConfig`]. Failures never
//! propagate; they come back as [`ModelAnswer::Failed`].

pub mod config;
pub mod gemini;
pub mod ollama;
pub mod types;

use async_trait::async_trait;
use std::sync::Arc;

use crate::context::ModelRequest;

pub use config::BackendConfig;
pub use gemini::CloudGenerationBackend;
pub use ollama::LocalChatBackend;
pub use types::{BackendProfile, ModelAnswer, INSUFFICIENT_CONTEXT_ANSWER};

/// A language-model service that answers framed prompts
#[async_trait]
pub trait AnswerBackend: Send + Sync {
    /// Send the request and return the whole answer or a whole error
    async fn answer(&self, request: &ModelRequest) -> ModelAnswer;

    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Profile whose prompt frame and word budget this backend expects
    fn profile(&self) -> BackendProfile;
}

/// Build the backend selected by configuration
pub fn build_backend(config: &BackendConfig) -> anyhow::Result<Arc<dyn AnswerBackend>> {
    let backend: Arc<dyn AnswerBackend> = match config.profile {
        BackendProfile::LocalChat => Arc::new(LocalChatBackend::new(config)?),
        BackendProfile::CloudGeneration => Arc::new(CloudGenerationBackend::new(config)?),
    };
    Ok(backend)
}
