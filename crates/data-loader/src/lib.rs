//! # Data Loader Crate
//!
//! This crate handles reading, writing and indexing the book datasets.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Book, RawBookRecord, BookCatalog)
//! - **parser**: Parse the clustered dataset and the combined-feature CSV
//! - **index**: Build the cluster index, dataset fingerprint and aggregates
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::BookCatalog;
//! use std::path::Path;
//!
//! let catalog = BookCatalog::load_from_file(Path::new("datasets/books_combined_features.csv"))?;
//!
//! for label in catalog.clusters() {
//!     println!("cluster {}: {} books", label, catalog.rows_in_cluster(&label).len());
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    BookRow,
    // Core types
    Book,
    BookCatalog,
    GenreClusterTable,
    GenreFlag,
    RawBookRecord,
    // Constants
    GENRE_PREFIX,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book(title: &str) -> Book {
        Book {
            title: title.to_string(),
            authors: "Someone".to_string(),
            avg_score: Some(3.9),
            sentiment_score: Some(0.1),
            cluster_label: "0".to_string(),
            genre_label: "Fiction".to_string(),
            combined_features: format!("{}. written by someone.", title.to_lowercase()),
        }
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = BookCatalog::from_books(Vec::new());

        assert!(catalog.is_empty());
        assert!(catalog.clusters().is_empty());
        assert!(catalog.get_book(0).is_none());
        assert!(catalog.genre_counts().is_empty());
    }

    #[test]
    fn test_get_book_by_row() {
        let catalog = BookCatalog::from_books(vec![sample_book("Emma"), sample_book("Dune")]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get_book(1).unwrap().title, "Dune");
        assert_eq!(
            catalog.combined_features(),
            vec!["emma. written by someone.", "dune. written by someone."]
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("combined.csv");
        parser::write_books(&path, &[sample_book("Emma")]).unwrap();

        let catalog = BookCatalog::load_from_file(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.clusters(), vec!["0"]);
    }
}
