//! Benchmarks for TF-IDF matching
//!
//! Run with: cargo bench --package matcher
//!
//! Uses a synthetic catalog so no dataset is required.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{Book, BookCatalog};
use matcher::{QueryContext, TfidfSource, TfidfVectorizer};
use std::sync::Arc;

const WORDS: &[&str] = &[
    "space", "mars", "dragon", "romance", "mystery", "detective", "war", "history", "kingdom",
    "magic", "school", "ocean", "pirate", "robot", "galaxy", "poetry", "family", "murder",
    "journey", "empire", "science", "cooking", "travel", "music", "love", "betrayal",
];

fn synthetic_catalog(size: usize) -> Arc<BookCatalog> {
    let books = (0..size)
        .map(|i| {
            let review: Vec<&str> = (0..40).map(|j| WORDS[(i * 7 + j * 13) % WORDS.len()]).collect();
            Book {
                title: format!("Book {i}"),
                authors: format!("Author {}", i % 97),
                avg_score: Some(3.0 + (i % 20) as f64 / 10.0),
                sentiment_score: Some(0.1),
                cluster_label: (i % 6).to_string(),
                genre_label: "Fiction".to_string(),
                combined_features: format!(
                    "book {i}. written by author {}. genre: fiction. reviews: {}",
                    i % 97,
                    review.join(" ")
                ),
            }
        })
        .collect();
    Arc::new(BookCatalog::from_books(books))
}

fn bench_fit(c: &mut Criterion) {
    let catalog = synthetic_catalog(5_000);
    let documents = catalog.combined_features();

    c.bench_function("tfidf_fit_transform_5k", |b| {
        b.iter(|| black_box(TfidfVectorizer::new().fit_transform(black_box(&documents))))
    });
}

fn bench_get_candidates(c: &mut Criterion) {
    let source = TfidfSource::new(synthetic_catalog(5_000)).expect("Failed to build source");
    let context = QueryContext::new("a space pirate journey across the galaxy");

    c.bench_function("tfidf_get_candidates_5k", |b| {
        b.iter(|| black_box(source.get_candidates(black_box(&context))))
    });
}

criterion_group!(benches, bench_fit, bench_get_candidates);
criterion_main!(benches);
