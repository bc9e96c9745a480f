// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Context assembly
//!
//! Joins page texts and wraps them in the profile's instruction frame.

use tracing::debug;

use super::types::{ModelRequest, PageContext};
use crate::backend::BackendProfile;

/// Separator placed between page texts
pub const PAGE_SEPARATOR: &str = "\n\n---\n\n";

const STRICT_FRAME: &str = "Answer the question using only the context below.";
const ELABORATE_FRAME: &str = "Based on the context below, answer the question in detail. \
If necessary, provide examples, explanations, or references.";

/// Builds model requests for one backend profile
#[derive(Debug, Clone, Copy)]
pub struct ContextAssembler {
    profile: BackendProfile,
}

impl ContextAssembler {
    pub fn new(profile: BackendProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> BackendProfile {
        self.profile
    }

    /// Instruction line heading the prompt for this profile
    pub fn frame(&self) -> &'static str {
        match self.profile {
            BackendProfile::LocalChat => STRICT_FRAME,
            BackendProfile::CloudGeneration => ELABORATE_FRAME,
        }
    }

    /// Build the request for `question` over `context`
    ///
    /// An empty context yields [`ModelRequest::InsufficientContext`].
    pub fn assemble(&self, question: &str, context: &PageContext) -> ModelRequest {
        if context.is_empty() {
            return ModelRequest::InsufficientContext;
        }

        let pages = context.texts().collect::<Vec<_>>().join(PAGE_SEPARATOR);
        let prompt = format!(
            "{}\n\nContext:\n{}\n\nQuestion: {}\nAnswer:",
            self.frame(),
            pages,
            question
        );
        debug!(
            "Assembled {} prompt from {} pages ({} chars)",
            self.profile,
            context.len(),
            prompt.len()
        );

        ModelRequest::Prompt {
            profile: self.profile,
            question: question.to_string(),
            prompt,
        }
    }
}
