//! Core domain types for the book datasets.
//!
//! Two row shapes flow through the system:
//! - `RawBookRecord`: one row of the clustered dataset, before feature building
//! - `Book`: one row of the combined-feature CSV the recommender reads
//!
//! `BookCatalog` is the read-only, in-memory view of the combined-feature CSV.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Row position of a book in the combined-feature CSV.
///
/// There is no explicit primary key; the position doubles as the row index
/// of the TF-IDF matrix built over the catalog.
pub type BookRow = usize;

/// Column prefix marking one-hot genre columns in the clustered dataset
pub const GENRE_PREFIX: &str = "genre_";

// =============================================================================
// Combined-feature rows
// =============================================================================

/// One book as stored in the combined-feature CSV.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    /// Comma-joined author names ("" when the source list could not be parsed)
    pub authors: String,
    pub avg_score: Option<f64>,
    /// VADER compound score in [-1, 1]
    pub sentiment_score: Option<f64>,
    /// Label assigned by the offline clustering step
    pub cluster_label: String,
    pub genre_label: String,
    /// Lower-cased "{title}. Written by {author}. Genre: {genre}. Reviews: {reviews}"
    pub combined_features: String,
}

// =============================================================================
// Clustered dataset rows
// =============================================================================

/// A single one-hot genre cell, kept in header order.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreFlag {
    /// Full column name, e.g. `genre_Fiction`
    pub column: String,
    /// Raw cell text, e.g. `1`, `0`, `1.0`, `True`
    pub value: String,
}

impl GenreFlag {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// One row of the clustered dataset consumed by the feature builder.
///
/// Text fields are `None` when the CSV cell is empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawBookRecord {
    pub title: Option<String>,
    /// Python list literal, e.g. `['Jane Austen']`
    pub authors: Option<String>,
    pub avg_score: Option<f64>,
    pub sentiment_score: Option<f64>,
    pub cluster_label: String,
    pub genre_flags: Vec<GenreFlag>,
    /// Lemmatized review text (`all_texts_processed`)
    pub processed_text: Option<String>,
}

// =============================================================================
// Aggregates for exploratory plots
// =============================================================================

/// Share of each genre label within each cluster.
///
/// `proportions[g][c]` is the fraction of books in `clusters[c]` whose genre
/// label is `genres[g]`; every non-empty column sums to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreClusterTable {
    pub genres: Vec<String>,
    pub clusters: Vec<String>,
    pub proportions: Vec<Vec<f64>>,
}

// =============================================================================
// BookCatalog
// =============================================================================

/// In-memory catalog of the combined-feature CSV.
///
/// Books keep file order, so `books[i]` lines up with row `i` of any matrix
/// built from `combined_features()`.
#[derive(Debug)]
pub struct BookCatalog {
    pub(crate) books: Vec<Book>,
    /// Rows belonging to each cluster label, ascending
    pub(crate) cluster_index: HashMap<String, Vec<BookRow>>,
    /// Content hash of all rows, used as the dataset version
    pub(crate) fingerprint: u64,
}

impl BookCatalog {
    /// Get a book by row position
    pub fn get_book(&self, row: BookRow) -> Option<&Book> {
        self.books.get(row)
    }

    /// All books in file order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Rows whose cluster label matches `label` exactly
    pub fn rows_in_cluster(&self, label: &str) -> &[BookRow] {
        self.cluster_index
            .get(label)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_cluster(&self, label: &str) -> bool {
        self.cluster_index.contains_key(label)
    }

    /// Dataset version; changes whenever any row changes
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Combined feature text of every book, in row order
    pub fn combined_features(&self) -> Vec<&str> {
        self.books
            .iter()
            .map(|b| b.combined_features.as_str())
            .collect()
    }
}
