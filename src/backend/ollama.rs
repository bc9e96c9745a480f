// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Local chat backend over the Ollama chat API

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

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ChatResponseMessage>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Client for a locally hosted chat model
pub struct LocalChatBackend {
    client: Client,
    endpoint: String,
    model: String,
}

impl LocalChatBackend {
    /// Create a new LocalChatBackend
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        let endpoint = config.ollama_host.trim_end_matches('/').to_string();
        info!(
            "Local chat backend configured: endpoint={}, model={}",
            endpoint, config.ollama_model
        );

        Ok(Self {
            client,
            endpoint,
            model: config.ollama_model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let url = format!("{}/api/chat", self.endpoint);
        debug!("Ollama chat POST {}", url);

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("ollama returned {}: {}", status, text));
        }

        let chat: ChatResponse = response.json().await?;
        if let Some(err) = chat.error {
            return Err(anyhow::anyhow!("ollama error: {}", err));
        }
        chat.message
            .map(|m| m.content)
            .ok_or_else(|| anyhow::anyhow!("no message in ollama response"))
    }
}

#[async_trait]
impl AnswerBackend for LocalChatBackend {
    async fn answer(&self, request: &ModelRequest) -> ModelAnswer {
        let ModelRequest::Prompt { prompt, .. } = request else {
            return ModelAnswer::InsufficientContext;
        };

        match self.chat(prompt).await {
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
        "ollama"
    }

    fn profile(&self) -> BackendProfile {
        BackendProfile::LocalChat
    }
}
