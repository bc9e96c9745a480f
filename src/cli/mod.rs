// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;

use crate::backend::BackendProfile;
use crate::config::PipelineConfig;
use crate::pipeline::{AnswerPipeline, AnswerReport};

/// Answer a question from live web search results
#[derive(Parser, Debug)]
#[command(name = "grounded-answer")]
#[command(version)]
#[command(about = "Answer questions from the text of top web search results", long_about = None)]
pub struct Cli {
    /// Query sent to the search provider
    #[arg(short, long)]
    pub search: String,

    /// Question asked of the model (defaults to the search query)
    #[arg(short, long, default_value = "")]
    pub question: String,

    /// Answer backend: local (Ollama) or cloud (Gemini)
    #[arg(short, long, env = "ANSWER_BACKEND")]
    pub backend: Option<BackendProfile>,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let mut config = PipelineConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    if let Some(profile) = cli.backend {
        config.backend.profile = profile;
    }

    let pipeline = AnswerPipeline::from_config(&config)?;
    let report = pipeline.get_answer(&cli.search, &cli.question).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &AnswerReport) {
    let separator = "=".repeat(60);
    println!("{}", separator);
    println!("Prompt:\n{}", report.request.rendered());
    println!("{}", separator);
    println!("Answer:\n{}", report.answer);
    if !report.context.is_empty() {
        println!("\nSources:");
        for page in report.context.pages() {
            println!("  - {}", page.url);
        }
    }
}
