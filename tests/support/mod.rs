// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// tests/support/mod.rs - In-process HTTP servers shared by the integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect},
    routing::get,
    Router,
};
use futures::stream::{self, StreamExt};
use grounded_answer::content::FetchConfig;
use std::time::Duration;
use tokio::net::TcpListener;

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a port nothing is listening on
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Fetch settings that allow loopback targets and time out quickly
pub fn local_fetch_config(word_limit: usize) -> FetchConfig {
    FetchConfig {
        timeout_ms: 500,
        word_limit,
        block_private_hosts: false,
        ..FetchConfig::default()
    }
}

/// Stand-in web site
///
/// - `/page/:name` article with two paragraphs mentioning `name`
/// - `/long` a single 1000-word paragraph
/// - `/no-paragraphs` markup without any `<p>`
/// - `/missing` 404
/// - `/slow` answers after 3 seconds
/// - `/pdf` a non-HTML body
/// - `/ua` echoes the request User-Agent inside a paragraph
/// - `/stalled-binary` octet-stream body whose second chunk arrives after 3 seconds
/// - `/redirect` redirects to `/page/moved`
/// - `/redirect-loop` redirects to itself
/// - `/redirect-ftp` redirects to an `ftp://` URL
pub fn pages_router() -> Router {
    Router::new()
        .route("/page/:name", get(article))
        .route("/long", get(long_article))
        .route("/no-paragraphs", get(no_paragraphs))
        .route("/missing", get(missing))
        .route("/slow", get(slow))
        .route("/pdf", get(pdf))
        .route("/ua", get(echo_user_agent))
        .route("/stalled-binary", get(stalled_binary))
        .route("/redirect", get(|| async { Redirect::temporary("/page/moved") }))
        .route("/redirect-loop", get(|| async { Redirect::temporary("/redirect-loop") }))
        .route(
            "/redirect-ftp",
            get(|| async { Redirect::temporary("ftp://files.example/archive") }),
        )
}

async fn article(Path(name): Path<String>) -> Html<String> {
    Html(format!(
        "<html><head><title>{name}</title></head><body>\
         <nav>menu</nav>\
         <p>First paragraph about {name}.</p>\
         <div><p>Second paragraph about {name}.</p></div>\
         </body></html>"
    ))
}

async fn long_article() -> Html<String> {
    let words: Vec<String> = (0..1000).map(|i| format!("w{}", i)).collect();
    Html(format!("<html><body><p>{}</p></body></html>", words.join(" ")))
}

async fn no_paragraphs() -> Html<&'static str> {
    Html("<html><body><div>only divs</div><span>and spans</span></body></html>")
}

async fn missing() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn slow() -> Html<&'static str> {
    tokio::time::sleep(Duration::from_secs(3)).await;
    Html("<p>too late</p>")
}

async fn pdf() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/pdf")],
        b"%PDF-1.4 <p>not html</p>".to_vec(),
    )
}

async fn echo_user_agent(headers: HeaderMap) -> Html<String> {
    let agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none")
        .to_string();
    Html(format!("<p>{}</p>", agent))
}

async fn stalled_binary() -> impl IntoResponse {
    let first = stream::once(async { Ok::<_, std::io::Error>(vec![0u8; 1024]) });
    let rest = stream::once(async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        Ok::<_, std::io::Error>(vec![0u8; 1024])
    });
    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        Body::from_stream(first.chain(rest)),
    )
}
