// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// tests/backend/test_gemini.rs - Cloud generation backend against a stand-in Gemini server

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use grounded_answer::backend::{
    build_backend, AnswerBackend, BackendConfig, BackendProfile, CloudGenerationBackend, ModelAnswer,
};
use grounded_answer::context::ModelRequest;
use serde_json::{json, Value};

use crate::support::{closed_port_url, spawn_server};

const API_KEY: &str = "test-key";

fn prompt(text: &str) -> ModelRequest {
    ModelRequest::Prompt {
        profile: BackendProfile::CloudGeneration,
        question: "q".to_string(),
        prompt: text.to_string(),
    }
}

fn config(endpoint: String) -> BackendConfig {
    BackendConfig {
        profile: BackendProfile::CloudGeneration,
        gemini_endpoint: endpoint,
        gemini_api_key: Some(API_KEY.to_string()),
        request_timeout_ms: 1_000,
        ..BackendConfig::default()
    }
}

/// Checks the key and echoes the model and prompt as two text parts
async fn generate(
    Path(model_action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some(API_KEY) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}})),
        );
    }
    let text = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": format!("{} | ", model_action)}, {"text": text}]},
                "finishReason": "STOP"
            }]
        })),
    )
}

fn router() -> Router {
    Router::new().route("/v1beta/models/:model_action", post(generate))
}

#[tokio::test]
async fn test_generate_content_answer() {
    let base = spawn_server(router()).await;
    let backend = CloudGenerationBackend::new(&config(base)).unwrap();

    let answer = backend.answer(&prompt("why is the sky blue?")).await;
    assert_eq!(
        answer,
        ModelAnswer::Text("gemini-2.0-flash:generateContent | why is the sky blue?".to_string())
    );
}

#[tokio::test]
async fn test_selected_through_build_backend() {
    let base = spawn_server(router()).await;
    let backend = build_backend(&config(base)).unwrap();
    assert_eq!(backend.name(), "gemini");
    assert!(!backend.answer(&prompt("hi")).await.is_failure());
}

#[tokio::test]
async fn test_rejected_key_becomes_failed_answer() {
    let base = spawn_server(router()).await;
    let mut config = config(base);
    config.gemini_api_key = Some("wrong".to_string());
    let backend = CloudGenerationBackend::new(&config).unwrap();

    let answer = backend.answer(&prompt("hi")).await;
    assert!(answer.is_failure());
    assert!(answer
        .display_text()
        .starts_with("Error generating response from gemini-2.0-flash: "));
    assert!(answer.display_text().contains("API key not valid"));
}

#[tokio::test]
async fn test_empty_candidates_becomes_failed_answer() {
    let router = Router::new().route(
        "/v1beta/models/:model_action",
        post(|| async { Json(json!({"candidates": []})) }),
    );
    let backend = CloudGenerationBackend::new(&config(spawn_server(router).await)).unwrap();
    let answer = backend.answer(&prompt("hi")).await;
    assert!(answer.display_text().contains("no text in gemini response"));
}

#[tokio::test]
async fn test_network_error_becomes_failed_answer() {
    let backend = CloudGenerationBackend::new(&config(closed_port_url().await)).unwrap();
    let answer = backend.answer(&prompt("hi")).await;
    assert!(answer.is_failure());
    assert!(answer.display_text().to_lowercase().contains("connect"), "{}", answer);
}
