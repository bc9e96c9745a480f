// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Context and model request types

use serde::{Deserialize, Serialize};

use crate::backend::BackendProfile;

/// Text shown in place of a prompt when no page produced usable content
pub const INSUFFICIENT_CONTEXT_PROMPT: &str =
    "No search results available. Please refine your query.";

/// Extracted, truncated text of one successfully fetched page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextPage {
    pub url: String,
    pub text: String,
}

/// Successful pages in search-rank order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageContext {
    pages: Vec<ContextPage>,
}

impl PageContext {
    pub fn new(pages: Vec<ContextPage>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[ContextPage] {
        &self.pages
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|p| p.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// No usable context
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Prompt ready for an answer backend, or the insufficient-context sentinel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ModelRequest {
    /// No page produced usable content; the backend must not be called
    InsufficientContext,
    /// Framed context plus question
    Prompt {
        profile: BackendProfile,
        question: String,
        prompt: String,
    },
}

impl ModelRequest {
    pub fn is_insufficient_context(&self) -> bool {
        matches!(self, ModelRequest::InsufficientContext)
    }

    /// The text that would be sent to the backend
    pub fn rendered(&self) -> &str {
        match self {
            ModelRequest::InsufficientContext => INSUFFICIENT_CONTEXT_PROMPT,
            ModelRequest::Prompt { prompt, .. } => prompt,
        }
    }
}
