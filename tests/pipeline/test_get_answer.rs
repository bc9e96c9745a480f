// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// tests/pipeline/test_get_answer.rs - End-to-end get_answer with mocked search and backend

use async_trait::async_trait;
use grounded_answer::backend::{AnswerBackend, BackendProfile, ModelAnswer};
use grounded_answer::content::{FetchError, FetchOrchestrator, FetchedPage, PageFetcher};
use grounded_answer::context::ModelRequest;
use grounded_answer::pipeline::{AnswerPipeline, PipelineError};
use grounded_answer::search::{SearchConfig, SearchError, SearchProvider, SearchResult, SearchService};
use mockall::mock;
use std::sync::Arc;

use crate::support::{local_fetch_config, pages_router, spawn_server};

mock! {
    pub Provider {}

    #[async_trait]
    impl SearchProvider for Provider {
        async fn search(
            &self,
            query: &str,
            num_results: usize,
        ) -> Result<Vec<SearchResult>, SearchError>;
        fn name(&self) -> &'static str;
    }
}

mock! {
    pub Fetcher {}

    #[async_trait]
    impl PageFetcher for Fetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
    }
}

mock! {
    pub Backend {}

    #[async_trait]
    impl AnswerBackend for Backend {
        async fn answer(&self, request: &ModelRequest) -> ModelAnswer;
        fn name(&self) -> &'static str;
        fn profile(&self) -> BackendProfile;
    }
}

fn hits(urls: &[String]) -> Vec<SearchResult> {
    urls.iter()
        .map(|url| SearchResult {
            title: "hit".to_string(),
            url: url.clone(),
            snippet: String::new(),
            source: "mock".to_string(),
        })
        .collect()
}

fn provider_returning(result: Result<Vec<SearchResult>, SearchError>) -> MockProvider {
    let mut provider = MockProvider::new();
    provider.expect_name().return_const("mock");
    provider
        .expect_search()
        .times(1)
        .return_once(move |_, _| result);
    provider
}

fn backend_base() -> MockBackend {
    let mut backend = MockBackend::new();
    backend.expect_name().return_const("mock-backend");
    backend
        .expect_profile()
        .return_const(BackendProfile::LocalChat);
    backend
}

fn service(provider: MockProvider) -> SearchService {
    SearchService::with_provider(SearchConfig::default(), Box::new(provider))
}

#[tokio::test]
async fn test_no_urls_skips_fetch_and_backend() {
    let mut fetcher = MockFetcher::new();
    fetcher.expect_fetch().never();
    let mut backend = backend_base();
    backend.expect_answer().never();

    let pipeline = AnswerPipeline::new(
        service(provider_returning(Ok(Vec::new()))),
        FetchOrchestrator::with_fetcher(&local_fetch_config(400), Arc::new(fetcher)),
        Arc::new(backend),
    );

    let report = pipeline.get_answer("x", "what is x?").await.unwrap();

    assert!(report.urls.is_empty());
    assert!(report.context.is_empty());
    assert_eq!(report.request, ModelRequest::InsufficientContext);
    assert_eq!(report.answer, ModelAnswer::InsufficientContext);
    assert_eq!(
        report.answer.display_text(),
        "Unable to generate a response due to lack of context."
    );
}

#[tokio::test]
async fn test_timeouts_excluded_and_order_kept() {
    let base = spawn_server(pages_router()).await;
    let urls: Vec<String> = ["page/first", "slow", "page/second", "slow", "page/third"]
        .iter()
        .map(|p| format!("{}/{}", base, p))
        .collect();

    let mut backend = backend_base();
    backend
        .expect_answer()
        .withf(|request| {
            let prompt = request.rendered();
            let first = prompt.find("about first");
            let second = prompt.find("about second");
            let third = prompt.find("about third");
            matches!((first, second, third), (Some(a), Some(b), Some(c)) if a < b && b < c)
                && prompt.contains("Question: which pages?")
                && !prompt.contains("too late")
        })
        .times(1)
        .returning(|_| ModelAnswer::Text("three pages".to_string()));

    let pipeline = AnswerPipeline::new(
        service(provider_returning(Ok(hits(&urls)))),
        FetchOrchestrator::new(&local_fetch_config(400)).unwrap(),
        Arc::new(backend),
    );

    let report = pipeline.get_answer("pages", "which pages?").await.unwrap();

    assert_eq!(report.urls, urls);
    let context_urls: Vec<&str> = report.context.pages().iter().map(|p| p.url.as_str()).collect();
    assert_eq!(context_urls, vec![urls[0].as_str(), urls[2].as_str(), urls[4].as_str()]);
    assert_eq!(report.answer, ModelAnswer::Text("three pages".to_string()));
}

#[tokio::test]
async fn test_page_without_paragraphs_excluded() {
    let base = spawn_server(pages_router()).await;
    let urls = vec![
        format!("{}/no-paragraphs", base),
        format!("{}/page/kept", base),
    ];

    let mut backend = backend_base();
    backend
        .expect_answer()
        .withf(|request| !request.rendered().contains("only divs"))
        .times(1)
        .returning(|_| ModelAnswer::Text("ok".to_string()));

    let pipeline = AnswerPipeline::new(
        service(provider_returning(Ok(hits(&urls)))),
        FetchOrchestrator::new(&local_fetch_config(400)).unwrap(),
        Arc::new(backend),
    );

    let report = pipeline.get_answer("kept", "").await.unwrap();

    assert_eq!(report.context.len(), 1);
    assert_eq!(report.context.pages()[0].url, urls[1]);
    assert_eq!(report.question, "kept");
}

#[tokio::test]
async fn test_all_pages_failing_never_calls_backend() {
    let urls = vec![
        "https://a.example/".to_string(),
        "https://b.example/".to_string(),
        "https://c.example/".to_string(),
    ];
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch()
        .times(3)
        .returning(|_| Err(FetchError::Timeout));
    let mut backend = backend_base();
    backend.expect_answer().never();

    let pipeline = AnswerPipeline::new(
        service(provider_returning(Ok(hits(&urls)))),
        FetchOrchestrator::with_fetcher(&local_fetch_config(400), Arc::new(fetcher)),
        Arc::new(backend),
    );

    let report = pipeline.get_answer("query", "question").await.unwrap();
    assert_eq!(report.urls.len(), 3);
    assert_eq!(report.answer, ModelAnswer::InsufficientContext);
}

#[tokio::test]
async fn test_search_error_is_terminal() {
    let mut backend = backend_base();
    backend.expect_answer().never();
    let mut fetcher = MockFetcher::new();
    fetcher.expect_fetch().never();

    let pipeline = AnswerPipeline::new(
        service(provider_returning(Err(SearchError::Timeout { timeout_ms: 10_000 }))),
        FetchOrchestrator::with_fetcher(&local_fetch_config(400), Arc::new(fetcher)),
        Arc::new(backend),
    );

    let err = pipeline.get_answer("query", "question").await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Search(SearchError::Timeout { timeout_ms: 10_000 })
    ));
}

#[tokio::test]
async fn test_invalid_query_rejected_before_search() {
    let mut provider = MockProvider::new();
    provider.expect_name().return_const("mock");
    provider.expect_search().never();
    let mut backend = backend_base();
    backend.expect_answer().never();

    let pipeline = AnswerPipeline::new(
        service(provider),
        FetchOrchestrator::new(&local_fetch_config(400)).unwrap(),
        Arc::new(backend),
    );

    let too_long = "q".repeat(501);
    for query in ["", "   ", too_long.as_str()] {
        let err = pipeline.get_answer(query, "question").await.unwrap_err();
        assert!(matches!(err, PipelineError::InvalidQuery(_)), "{:?}", query);
    }
}

#[tokio::test]
async fn test_backend_failure_returned_in_report() {
    let urls = vec!["https://ok.example/".to_string()];
    let mut fetcher = MockFetcher::new();
    fetcher.expect_fetch().times(1).returning(|url| {
        Ok(FetchedPage {
            url: url.to_string(),
            status: 200,
            content_type: Some("text/html".to_string()),
            body: b"<p>useful text</p>".to_vec(),
        })
    });
    let mut backend = backend_base();
    backend.expect_answer().times(1).returning(|_| {
        ModelAnswer::Failed("Error generating response from mistral: connection refused".to_string())
    });

    let pipeline = AnswerPipeline::new(
        service(provider_returning(Ok(hits(&urls)))),
        FetchOrchestrator::with_fetcher(&local_fetch_config(400), Arc::new(fetcher)),
        Arc::new(backend),
    );

    let report = pipeline.get_answer("query", "question").await.unwrap();
    assert!(report.answer.is_failure());
    assert!(report.answer.display_text().contains("connection refused"));
    assert_eq!(report.context.pages()[0].text, "useful text");
}
