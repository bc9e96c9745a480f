//! HTML content extraction
//!
//! Extracts paragraph text from web pages using CSS selectors.

use scraper::{Html, Selector};

use super::types::FetchError;

/// Content-type prefixes that never carry article text
const NON_TEXT_TYPES: &[&str] = &[
    "image/",
    "audio/",
    "video/",
    "font/",
    "application/pdf",
    "application/zip",
    "application/octet-stream",
];

/// Whether a `Content-Type` value can never hold paragraph text
pub fn is_non_text_content_type(content_type: &str) -> bool {
    let ct = content_type.trim().to_ascii_lowercase();
    NON_TEXT_TYPES.iter().any(|prefix| ct.starts_with(prefix))
}

/// Extract paragraph text from a fetched body
///
/// Every `<p>` element's text is collected in document order and joined
/// with newlines. Parsing never fails: html5ever recovers from malformed
/// markup the way a browser does.
///
/// # Errors
/// `NoExtractableContent` when the content type is binary, the page has no
/// `<p>` elements, or all paragraphs are blank.
pub fn extract_paragraphs(body: &[u8], content_type: Option<&str>) -> Result<String, FetchError> {
    if content_type.is_some_and(is_non_text_content_type) {
        return Err(FetchError::NoExtractableContent);
    }

    let html = String::from_utf8_lossy(body);
    let document = Html::parse_document(&html);
    let selector = Selector::parse("p").map_err(|_| FetchError::NoExtractableContent)?;

    let paragraphs: Vec<String> = document
        .select(&selector)
        .map(|p| p.text().collect::<String>())
        .collect();

    if paragraphs.is_empty() || paragraphs.iter().all(|p| p.trim().is_empty()) {
        return Err(FetchError::NoExtractableContent);
    }

    Ok(paragraphs.join("\n"))
}
