// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for answer backends

use std::env;

use super::types::BackendProfile;

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "mistral";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Configuration for the answer backend, chosen once at startup
#[derive(Clone)]
pub struct BackendConfig {
    /// Which backend answers questions
    pub profile: BackendProfile,
    /// Ollama base URL
    pub ollama_host: String,
    /// Ollama model name
    pub ollama_model: String,
    /// Gemini API base URL
    pub gemini_endpoint: String,
    /// Gemini model name
    pub gemini_model: String,
    /// Gemini API key
    pub gemini_api_key: Option<String>,
    /// Timeout for one backend call in milliseconds
    pub request_timeout_ms: u64,
}

impl BackendConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();
        let profile = match env::var("ANSWER_BACKEND") {
            Ok(v) => v.parse()?,
            Err(_) => defaults.profile,
        };

        Ok(Self {
            profile,
            ollama_host: env::var("OLLAMA_HOST").unwrap_or(defaults.ollama_host),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            gemini_endpoint: env::var("GEMINI_ENDPOINT").unwrap_or(defaults.gemini_endpoint),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_api_key: env::var("GENAI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            request_timeout_ms: env::var("BACKEND_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
        })
    }

    /// Validate the configuration for the selected profile
    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout_ms == 0 {
            return Err("Backend timeout must be greater than 0".to_string());
        }
        match self.profile {
            BackendProfile::LocalChat => {
                if self.ollama_host.trim().is_empty() || self.ollama_model.trim().is_empty() {
                    return Err("Ollama host and model must be set".to_string());
                }
            }
            BackendProfile::CloudGeneration => {
                if self.gemini_api_key.is_none() {
                    return Err("GENAI_API_KEY is required for the cloud backend".to_string());
                }
                if self.gemini_endpoint.trim().is_empty() || self.gemini_model.trim().is_empty() {
                    return Err("Gemini endpoint and model must be set".to_string());
                }
            }
        }
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            profile: BackendProfile::LocalChat,
            ollama_host: DEFAULT_OLLAMA_HOST.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            gemini_endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_key: None,
            request_timeout_ms: 120_000,
        }
    }
}

// Keep the API key out of logs
impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("profile", &self.profile)
            .field("ollama_host", &self.ollama_host)
            .field("ollama_model", &self.ollama_model)
            .field("gemini_endpoint", &self.gemini_endpoint)
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}
