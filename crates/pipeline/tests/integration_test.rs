//! Integration tests for the pipeline.
//!
//! These tests verify that the TF-IDF source and the filters work together
//! in a realistic scenario.

use data_loader::{Book, BookCatalog};
use matcher::{QueryContext, TfidfSource};
use pipeline::filters::*;
use pipeline::FilterPipeline;
use std::sync::Arc;

fn create_test_setup() -> (Arc<BookCatalog>, TfidfSource) {
    let book = |title: &str, cluster: &str, text: &str| Book {
        title: title.to_string(),
        authors: "Someone".to_string(),
        avg_score: Some(4.0),
        sentiment_score: Some(0.3),
        cluster_label: cluster.to_string(),
        genre_label: "Fiction".to_string(),
        combined_features: text.to_string(),
    };

    let catalog = Arc::new(BookCatalog::from_books(vec![
        book("Red Planet", "0", "space opera adventure on mars"),
        book("Paris Nights", "1", "a quiet romance in paris"),
        book("Ringworld", "1", "space adventure around a ring world"),
        book("Pastry", "2", "french pastry cookbook"),
    ]));
    let source = TfidfSource::new(catalog.clone()).expect("source should build");
    (catalog, source)
}

fn standard_pipeline(catalog: Arc<BookCatalog>) -> FilterPipeline {
    FilterPipeline::new()
        .add_filter(ClusterFilter::new(catalog))
        .add_filter(MinimumSimilarityFilter::new(0.2))
}

#[test]
fn test_full_pipeline() {
    let (catalog, source) = create_test_setup();
    let pipeline = standard_pipeline(catalog);
    let context = QueryContext::new("adventure in space");

    let candidates = source.get_candidates(&context);
    assert_eq!(candidates.len(), 4);

    let filtered = pipeline.apply(candidates, &context).unwrap();
    let rows: Vec<usize> = filtered.iter().map(|c| c.row).collect();

    // Both space adventures survive, in row order
    assert_eq!(rows, vec![0, 2]);
    assert!(filtered.iter().all(|c| c.score > 0.2));
}

#[test]
fn test_pipeline_with_cluster() {
    let (catalog, source) = create_test_setup();
    let pipeline = standard_pipeline(catalog);
    let context = QueryContext::new("adventure in space").with_cluster("1");

    let filtered = pipeline
        .apply(source.get_candidates(&context), &context)
        .unwrap();

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].row, 2);
}

#[test]
fn test_pipeline_nonsense_query() {
    let (catalog, source) = create_test_setup();
    let pipeline = standard_pipeline(catalog);
    let context = QueryContext::new("zzzz qqqq");

    let filtered = pipeline
        .apply(source.get_candidates(&context), &context)
        .unwrap();
    assert!(filtered.is_empty());
}

#[test]
fn test_pipeline_unknown_cluster() {
    let (catalog, source) = create_test_setup();
    let pipeline = standard_pipeline(catalog);
    let context = QueryContext::new("adventure").with_cluster("42");

    assert!(pipeline
        .apply(source.get_candidates(&context), &context)
        .is_err());
}
