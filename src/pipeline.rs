// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search-grounded question answering
//!
//! `get_answer` runs the stages strictly in sequence: search, parallel
//! fetch, context assembly, one backend call. Only search errors and
//! invalid queries surface as `Err`; page failures shrink the context and
//! backend failures come back inside the answer.

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

use crate::backend::{build_backend, AnswerBackend, ModelAnswer};
use crate::config::PipelineConfig;
use crate::content::FetchOrchestrator;
use crate::context::{ContextAssembler, ModelRequest, PageContext};
use crate::search::types::validate_query;
use crate::search::{SearchError, SearchService};

/// Errors that end a `get_answer` call
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Everything produced by one `get_answer` call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerReport {
    pub query: String,
    pub question: String,
    /// Candidate URLs in provider rank order
    pub urls: Vec<String>,
    /// Successfully extracted pages in URL order
    pub context: PageContext,
    pub request: ModelRequest,
    pub answer: ModelAnswer,
}

/// Wires search, fetch, assembly and the answer backend together
pub struct AnswerPipeline {
    search: SearchService,
    fetcher: FetchOrchestrator,
    assembler: ContextAssembler,
    backend: Arc<dyn AnswerBackend>,
}

impl AnswerPipeline {
    /// Assemble a pipeline from already-built stages
    ///
    /// The prompt frame follows the backend's profile.
    pub fn new(
        search: SearchService,
        fetcher: FetchOrchestrator,
        backend: Arc<dyn AnswerBackend>,
    ) -> Self {
        Self {
            search,
            fetcher,
            assembler: ContextAssembler::new(backend.profile()),
            backend,
        }
    }

    /// Build every stage from configuration
    pub fn from_config(config: &PipelineConfig) -> anyhow::Result<Self> {
        config.validate().map_err(|e| anyhow::anyhow!(e))?;

        let fetch = config.fetch_config();
        let search = SearchService::new(config.search.clone())?;
        let fetcher = FetchOrchestrator::new(&fetch)?;
        let backend = build_backend(&config.backend)?;
        info!(
            "Answer pipeline ready: search={}, backend={} ({}), word_limit={}",
            search.provider_name(),
            backend.name(),
            backend.profile(),
            fetch.word_limit
        );

        Ok(Self::new(search, fetcher, backend))
    }

    pub fn backend(&self) -> &dyn AnswerBackend {
        self.backend.as_ref()
    }

    pub fn fetcher(&self) -> &FetchOrchestrator {
        &self.fetcher
    }

    /// Answer `question` from the pages found for `search_query`
    ///
    /// A blank `question` falls back to the search query.
    pub async fn get_answer(
        &self,
        search_query: &str,
        question: &str,
    ) -> Result<AnswerReport, PipelineError> {
        let query = validate_query(search_query).map_err(|e| match e {
            SearchError::InvalidQuery { reason } => PipelineError::InvalidQuery(reason),
            other => PipelineError::Search(other),
        })?;
        let question = match question.trim() {
            "" => query,
            q => q,
        };

        let start = Instant::now();
        let urls = self.search.search(query).await?;
        let context = self.fetcher.gather(&urls).await;
        info!(
            "Extracted {} of {} pages for '{}'",
            context.len(),
            urls.len(),
            query
        );

        let request = self.assembler.assemble(question, &context);
        let answer = if request.is_insufficient_context() {
            warn!("No usable page content for '{}', skipping {}", query, self.backend.name());
            ModelAnswer::InsufficientContext
        } else {
            self.backend.answer(&request).await
        };
        info!(
            "Answered '{}' via {} in {}ms",
            question,
            self.backend.name(),
            start.elapsed().as_millis()
        );

        Ok(AnswerReport {
            query: query.to_string(),
            question: question.to_string(),
            urls,
            context,
            request,
            answer,
        })
    }
}
