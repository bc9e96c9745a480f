// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Cloud generation backend over the Gemini `generateContent` API

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use super::config::BackendConfig;
use super::types::{BackendProfile, ModelAnswer};
use super::AnswerBackend;
use crate::context::ModelRequest;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

/// Client for a remote text generation API
pub struct CloudGenerationBackend {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl CloudGenerationBackend {
    /// Create a new CloudGenerationBackend
    ///
    /// A missing API key is reported per call as a failed answer.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        let endpoint = config.gemini_endpoint.trim_end_matches('/').to_string();
        info!(
            "Cloud generation backend configured: endpoint={}, model={}",
            endpoint, config.gemini_model
        );

        Ok(Self {
            client,
            endpoint,
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("GENAI_API_KEY is not set"))?;

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let url = self.url();
        debug!("Gemini generateContent POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("gemini returned {}: {}", status, text));
        }

        let generated: GenerateResponse = response.json().await?;
        generated
            .text()
            .ok_or_else(|| anyhow::anyhow!("no text in gemini response"))
    }
}

#[async_trait]
impl AnswerBackend for CloudGenerationBackend {
    async fn answer(&self, request: &ModelRequest) -> ModelAnswer {
        let ModelRequest::Prompt { prompt, .. } = request else {
            return ModelAnswer::InsufficientContext;
        };

        match self.generate(prompt).await {
            Ok(text) => ModelAnswer::Text(text),
            Err(e) => {
                let cause = format!("{:#}", e);
                error!("Error generating response from {}: {}", self.model, cause);
                ModelAnswer::Failed(format!(
                    "Error generating response from {}: {}",
                    self.model, cause
                ))
            }
        }
    }

    fn name(&self) -> &'static str {
        "gemini"
    }

    fn profile(&self) -> BackendProfile {
        BackendProfile::CloudGeneration
    }
}
