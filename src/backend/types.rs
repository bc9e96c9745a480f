// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Backend profile and answer types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Answer shown when no page produced usable content
pub const INSUFFICIENT_CONTEXT_ANSWER: &str =
    "Unable to generate a response due to lack of context.";

/// Which kind of answer backend the pipeline talks to
///
/// The profile fixes the payload shape, the prompt frame and the
/// per-page word budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendProfile {
    /// Locally hosted chat model (Ollama)
    #[serde(rename = "local")]
    LocalChat,
    /// Remote generation API (Gemini)
    #[serde(rename = "cloud")]
    CloudGeneration,
}

impl BackendProfile {
    /// Default words kept per page for this profile
    pub fn default_word_limit(self) -> usize {
        match self {
            BackendProfile::LocalChat => 400,
            BackendProfile::CloudGeneration => 4000,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BackendProfile::LocalChat => "local",
            BackendProfile::CloudGeneration => "cloud",
        }
    }
}

impl fmt::Display for BackendProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "ollama" => Ok(BackendProfile::LocalChat),
            "cloud" | "gemini" => Ok(BackendProfile::CloudGeneration),
            other => Err(format!(
                "unknown backend profile '{}'; expected 'local' or 'cloud'",
                other
            )),
        }
    }
}

/// Whole answer from a backend, or a whole error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "camelCase")]
pub enum ModelAnswer {
    /// Text generated by the model
    Text(String),
    /// The backend call failed; human-readable cause
    Failed(String),
    /// No backend call was made because there was no context
    InsufficientContext,
}

impl ModelAnswer {
    /// Displayable text for every variant
    pub fn display_text(&self) -> &str {
        match self {
            ModelAnswer::Text(text) | ModelAnswer::Failed(text) => text,
            ModelAnswer::InsufficientContext => INSUFFICIENT_CONTEXT_ANSWER,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ModelAnswer::Failed(_))
    }
}

impl fmt::Display for ModelAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}
