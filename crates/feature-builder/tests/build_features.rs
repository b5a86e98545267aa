//! End-to-end feature building over a small clustered dataset.

use data_loader::BookCatalog;
use feature_builder::FeatureBuilder;
use std::fs;

const CLUSTERED_CSV: &str = "\
title,authors,avg_score,sentiment_score,cluster_label,genre_Fiction,genre_Academic,all_texts_processed
Dune,['Frank Herbert'],4.5,0.8,1,1,0,spice desert worm
A Brief History of Time,\"['Stephen Hawking', 'Leonard Mlodinow']\",4.2,0.4,0,0,1,universe black hole
Untitled,not a list,,,0,0,0,
";

#[test]
fn test_build_features_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cluster_dataset.csv");
    let output = dir.path().join("books_combined_features.csv");
    fs::write(&input, CLUSTERED_CSV).unwrap();

    let rows = FeatureBuilder::new().run(&input, &output).unwrap();
    assert_eq!(rows, 3);

    let catalog = BookCatalog::load_from_file(&output).unwrap();
    let books = catalog.books();

    assert_eq!(books[0].genre_label, "Fiction");
    assert_eq!(books[0].authors, "Frank Herbert");
    assert_eq!(
        books[0].combined_features,
        "dune. written by frank herbert. genre: fiction. reviews: spice desert worm"
    );

    assert_eq!(books[1].genre_label, "Academic");
    assert_eq!(books[1].authors, "Stephen Hawking, Leonard Mlodinow");

    assert_eq!(books[2].authors, "");
    assert_eq!(books[2].genre_label, "");
    assert_eq!(books[2].avg_score, None);
    assert_eq!(
        books[2].combined_features,
        "untitled. written by . genre: . reviews: "
    );

    assert_eq!(catalog.clusters(), vec!["0", "1"]);
}

#[test]
fn test_output_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cluster_dataset.csv");
    let output = dir.path().join("out.csv");
    fs::write(&input, CLUSTERED_CSV).unwrap();
    fs::write(&output, "stale contents that are much longer than anything else\n".repeat(100))
        .unwrap();

    FeatureBuilder::new().run(&input, &output).unwrap();
    let written = fs::read_to_string(&output).unwrap();

    assert!(written.starts_with("title,authors,avg_score"));
    assert!(!written.contains("stale"));
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = FeatureBuilder::new()
        .run(&dir.path().join("missing.csv"), &dir.path().join("out.csv"))
        .unwrap_err();

    assert!(err.to_string().contains("Failed to read clustered dataset"));
}
