//! BookCatalog building and indexing logic.
//!
//! - Primary store: books in file order (row position = identity)
//! - Secondary index: cluster label -> rows
//! - Dataset fingerprint for cache keys
//! - Aggregates used by the exploratory plots

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};
use std::path::Path;

impl BookCatalog {
    /// Load and validate the combined-feature CSV.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        tracing::info!("Loading combined-feature dataset from {:?}", path);

        let books = parser::parse_books(path)?;
        let catalog = Self::from_books(books);
        catalog.validate()?;

        tracing::info!(
            "Loaded {} books in {} clusters",
            catalog.len(),
            catalog.cluster_index.len()
        );
        Ok(catalog)
    }

    /// Build a catalog from books already in memory
    pub fn from_books(books: Vec<Book>) -> Self {
        let mut cluster_index: HashMap<String, Vec<BookRow>> = HashMap::new();
        for (row, book) in books.iter().enumerate() {
            cluster_index
                .entry(book.cluster_label.clone())
                .or_default()
                .push(row);
        }

        let fingerprint = compute_fingerprint(&books);
        Self {
            books,
            cluster_index,
            fingerprint,
        }
    }

    /// Distinct cluster labels.
    ///
    /// Sorted numerically when every label is an integer, lexicographically
    /// otherwise.
    pub fn clusters(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.cluster_index.keys().cloned().collect();
        sort_labels(&mut labels);
        labels
    }

    /// Number of books per genre label, most common first (ties by name)
    pub fn genre_counts(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for book in &self.books {
            *counts.entry(book.genre_label.as_str()).or_insert(0) += 1;
        }

        let mut counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(genre, count)| (genre.to_string(), count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }

    /// Share of each genre label within each cluster
    pub fn cluster_genre_proportions(&self) -> GenreClusterTable {
        let clusters = self.clusters();

        let mut per_genre: BTreeMap<&str, HashMap<&str, usize>> = BTreeMap::new();
        for book in &self.books {
            *per_genre
                .entry(book.genre_label.as_str())
                .or_default()
                .entry(book.cluster_label.as_str())
                .or_insert(0) += 1;
        }

        let genres: Vec<String> = per_genre.keys().map(|g| g.to_string()).collect();
        let proportions = per_genre
            .values()
            .map(|by_cluster| {
                clusters
                    .iter()
                    .map(|cluster| {
                        let total = self.rows_in_cluster(cluster).len();
                        let count = by_cluster.get(cluster.as_str()).copied().unwrap_or(0);
                        if total == 0 {
                            0.0
                        } else {
                            count as f64 / total as f64
                        }
                    })
                    .collect()
            })
            .collect();

        GenreClusterTable {
            genres,
            clusters,
            proportions,
        }
    }

    /// Validate data integrity
    ///
    /// Sentiment scores, when present, must be compound scores in [-1, 1].
    pub fn validate(&self) -> Result<()> {
        for book in &self.books {
            if let Some(score) = book.sentiment_score {
                if !(-1.0..=1.0).contains(&score) {
                    return Err(DataLoadError::InvalidValue {
                        field: "sentiment_score".to_string(),
                        value: score.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn compute_fingerprint(books: &[Book]) -> u64 {
    let mut hasher = DefaultHasher::new();
    books.len().hash(&mut hasher);
    for book in books {
        book.title.hash(&mut hasher);
        book.authors.hash(&mut hasher);
        book.avg_score.map(f64::to_bits).hash(&mut hasher);
        book.sentiment_score.map(f64::to_bits).hash(&mut hasher);
        book.cluster_label.hash(&mut hasher);
        book.genre_label.hash(&mut hasher);
        book.combined_features.hash(&mut hasher);
    }
    hasher.finish()
}

fn sort_labels(labels: &mut [String]) {
    let all_numeric = labels.iter().all(|l| l.parse::<i64>().is_ok());
    if all_numeric {
        labels.sort_by(|a, b| {
            let a: i64 = a.parse().unwrap_or_default();
            let b: i64 = b.parse().unwrap_or_default();
            a.cmp(&b)
        });
    } else {
        labels.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, cluster: &str, genre: &str) -> Book {
        Book {
            title: title.to_string(),
            authors: String::new(),
            avg_score: Some(4.0),
            sentiment_score: Some(0.5),
            cluster_label: cluster.to_string(),
            genre_label: genre.to_string(),
            combined_features: title.to_lowercase(),
        }
    }

    #[test]
    fn test_cluster_index_keeps_row_order() {
        let catalog = BookCatalog::from_books(vec![
            book("A", "1", "Fiction"),
            book("B", "0", "Fiction"),
            book("C", "1", "Academic"),
        ]);

        assert_eq!(catalog.rows_in_cluster("1"), &[0, 2]);
        assert_eq!(catalog.rows_in_cluster("0"), &[1]);
        assert!(catalog.rows_in_cluster("7").is_empty());
        assert!(catalog.has_cluster("0"));
        assert!(!catalog.has_cluster("7"));
    }

    #[test]
    fn test_clusters_sort_numerically() {
        let catalog = BookCatalog::from_books(vec![
            book("A", "10", "Fiction"),
            book("B", "2", "Fiction"),
            book("C", "1", "Fiction"),
        ]);
        assert_eq!(catalog.clusters(), vec!["1", "2", "10"]);
    }

    #[test]
    fn test_clusters_sort_lexicographically_for_text_labels() {
        let catalog = BookCatalog::from_books(vec![
            book("A", "romance", "Fiction"),
            book("B", "history", "Fiction"),
            book("C", "10", "Fiction"),
        ]);
        assert_eq!(catalog.clusters(), vec!["10", "history", "romance"]);
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = BookCatalog::from_books(vec![book("A", "1", "Fiction")]);
        let b = BookCatalog::from_books(vec![book("A", "1", "Fiction")]);
        let c = BookCatalog::from_books(vec![book("A", "2", "Fiction")]);

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_genre_counts() {
        let catalog = BookCatalog::from_books(vec![
            book("A", "0", "Fiction"),
            book("B", "0", "Academic"),
            book("C", "1", "Fiction"),
        ]);
        assert_eq!(
            catalog.genre_counts(),
            vec![("Fiction".to_string(), 2), ("Academic".to_string(), 1)]
        );
    }

    #[test]
    fn test_cluster_genre_proportions_columns_sum_to_one() {
        let catalog = BookCatalog::from_books(vec![
            book("A", "0", "Fiction"),
            book("B", "0", "Academic"),
            book("C", "1", "Fiction"),
        ]);

        let table = catalog.cluster_genre_proportions();
        assert_eq!(table.genres, vec!["Academic", "Fiction"]);
        assert_eq!(table.clusters, vec!["0", "1"]);
        assert_eq!(table.proportions[0], vec![0.5, 0.0]);
        assert_eq!(table.proportions[1], vec![0.5, 1.0]);
    }

    #[test]
    fn test_validate_rejects_out_of_range_sentiment() {
        let mut bad = book("A", "0", "Fiction");
        bad.sentiment_score = Some(1.5);
        let catalog = BookCatalog::from_books(vec![bad]);

        assert!(matches!(
            catalog.validate(),
            Err(DataLoadError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_load_from_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("combined.csv");
        let mut bad = book("A", "0", "Fiction");
        bad.sentiment_score = Some(-1.5);
        parser::write_books(&path, &[bad]).unwrap();

        assert!(matches!(
            BookCatalog::load_from_file(&path),
            Err(DataLoadError::InvalidValue { .. })
        ));
    }
}
