//! Review text helpers.

/// Default number of review words kept per book
pub const DEFAULT_MAX_WORDS: usize = 300;

/// First `max_words` whitespace-delimited words, joined by single spaces.
pub fn limit_text_length(text: Option<&str>, max_words: usize) -> String {
    text.map(|t| {
        t.split_whitespace()
            .take(max_words)
            .collect::<Vec<_>>()
            .join(" ")
    })
    .unwrap_or_default()
}
