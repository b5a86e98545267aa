//! Keyword-overlap genre assignment.
//!
//! Each genre owns a keyword list. Input text is split on whitespace into a
//! word set; the genre sharing the most words with it wins. Ties go to the
//! genre declared first in `GENRE_KEYWORDS`, and no overlap at all gives
//! `UNKNOWN_GENRE`.

use std::collections::HashSet;

pub const UNKNOWN_GENRE: &str = "Unknown";

/// Genre -> keywords, in tie-break order
pub const GENRE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Fiction",
        &["novel", "story", "thriller", "romance", "mystery", "narrative", "fantasy", "fiction"],
    ),
    (
        "Non-Fiction",
        &[
            "biography", "memoir", "self-help", "life", "true", "religion", "cooking", "sports",
            "travel", "body", "fitness", "relationships", "music", "criticism", "philosophy",
        ],
    ),
    (
        "Academic",
        &[
            "research", "study", "academic", "analysis", "paper", "theory", "history",
            "economics", "computers", "science", "education", "art", "medical", "psychology",
        ],
    ),
    (
        "Children's/Young Adult",
        &["children", "young", "teen", "kid", "juvenile"],
    ),
    ("Poetry/Drama", &["poem", "poetry", "drama", "play", "verse"]),
];

/// Unique whitespace-separated words of `text`
pub fn extract_keywords(text: &str) -> HashSet<&str> {
    text.split_whitespace().collect()
}

fn best_genre(words: &HashSet<&str>) -> &'static str {
    let mut best = UNKNOWN_GENRE;
    let mut best_count = 0;
    for (genre, keywords) in GENRE_KEYWORDS {
        let count = keywords.iter().filter(|k| words.contains(*k)).count();
        // Strictly greater keeps the earlier genre on ties
        if count > best_count {
            best = *genre;
            best_count = count;
        }
    }
    best
}

/// Genre for free text, matched as-is (case-sensitive).
pub fn assign_genre_from_keywords(text: Option<&str>) -> &'static str {
    match text {
        Some(text) => best_genre(&extract_keywords(text)),
        None => UNKNOWN_GENRE,
    }
}

/// Genre for a categories field such as "Juvenile Fiction".
pub fn assign_genre_from_categories(categories: Option<&str>) -> &'static str {
    match categories {
        Some(text) => {
            let lowered = text.to_lowercase();
            best_genre(&extract_keywords(&lowered))
        }
        None => UNKNOWN_GENRE,
    }
}

/// Same as `assign_genre_from_categories`, for a list of categories.
pub fn assign_genre_from_category_list<S: AsRef<str>>(categories: &[S]) -> &'static str {
    let joined = categories
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(" ");
    assign_genre_from_categories(Some(&joined))
}
