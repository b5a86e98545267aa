//! Combined-feature dataset construction.

use crate::author::clean_author;
use crate::combine::combine_features;
use crate::genre::reverse_one_hot_encoding;
use crate::text::{limit_text_length, DEFAULT_MAX_WORDS};
use anyhow::{Context, Result};
use data_loader::parser::{parse_raw_books, write_books};
use data_loader::{Book, RawBookRecord};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// Turns clustered dataset rows into combined-feature rows.
///
/// Rows are processed in parallel with Rayon; output order always matches
/// input order.
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    max_words: usize,
}

impl FeatureBuilder {
    pub fn new() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
        }
    }

    /// Number of review words kept per book (default: 300)
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }

    /// Build one combined-feature row
    pub fn build_one(&self, record: &RawBookRecord) -> Book {
        let authors = clean_author(record.authors.as_deref());
        let reviews = limit_text_length(record.processed_text.as_deref(), self.max_words);
        let genre_label = reverse_one_hot_encoding(&record.genre_flags);

        let combined_features = combine_features(
            record.title.as_deref(),
            Some(&authors),
            Some(&genre_label),
            Some(&reviews),
        )
        .to_lowercase();

        Book {
            title: record.title.clone().unwrap_or_default(),
            authors,
            avg_score: record.avg_score,
            sentiment_score: record.sentiment_score,
            cluster_label: record.cluster_label.clone(),
            genre_label,
            combined_features,
        }
    }

    /// Build every row in parallel
    pub fn build(&self, records: &[RawBookRecord]) -> Vec<Book> {
        records.par_iter().map(|r| self.build_one(r)).collect()
    }

    /// Read the clustered dataset, build features and write the combined CSV.
    ///
    /// The output file is overwritten unconditionally. Returns the number of
    /// rows written.
    pub fn run(&self, input: &Path, output: &Path) -> Result<usize> {
        let start = Instant::now();

        let records = parse_raw_books(input)
            .with_context(|| format!("Failed to read clustered dataset {}", input.display()))?;
        let books = self.build(&records);

        write_books(output, &books)
            .with_context(|| format!("Failed to write combined features {}", output.display()))?;

        tracing::info!(
            "Built combined features for {} books in {:?} -> {:?}",
            books.len(),
            start.elapsed(),
            output
        );
        Ok(books.len())
    }
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        Self::new()
    }
}
