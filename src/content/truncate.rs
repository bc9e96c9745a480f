//! Word-budget truncation of extracted page text

/// Keep at most `word_limit` whitespace-delimited words, in order.
///
/// Words are re-joined with single spaces, so the result of truncating an
/// already-truncated text is unchanged.
pub fn truncate_words(text: &str, word_limit: usize) -> String {
    text.split_whitespace()
        .take(word_limit)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First `max_chars` characters of `text`, cut on a char boundary
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
