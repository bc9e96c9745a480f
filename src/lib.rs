// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod backend;
pub mod cli;
pub mod config;
pub mod content;
pub mod context;
pub mod pipeline;
pub mod search;
pub mod utils;

// Re-export main types
pub use backend::{AnswerBackend, BackendConfig, BackendProfile, ModelAnswer};
pub use config::PipelineConfig;
pub use content::{FetchConfig, FetchOrchestrator};
pub use context::{ContextAssembler, ModelRequest, PageContext};
pub use pipeline::{AnswerPipeline, AnswerReport, PipelineError};
pub use search::{SearchConfig, SearchService};
