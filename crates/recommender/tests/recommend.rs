//! End-to-end recommendation scenarios against a mocked completion endpoint.

use data_loader::{Book, BookCatalog};
use llm_client::{SummaryClient, SummaryConfig, FALLBACK_SUMMARY};
use mockito::{Matcher, Server, ServerGuard};
use recommender::{BookRecommender, RecommenderConfig};
use serde_json::json;
use std::sync::Arc;

fn book(title: &str, authors: &str, cluster: &str, text: &str) -> Book {
    Book {
        title: title.to_string(),
        authors: authors.to_string(),
        avg_score: Some(4.1),
        sentiment_score: Some(0.6543),
        cluster_label: cluster.to_string(),
        genre_label: "Fiction".to_string(),
        combined_features: text.to_string(),
    }
}

fn three_books() -> Arc<BookCatalog> {
    Arc::new(BookCatalog::from_books(vec![
        book("Red Planet", "Robert A. Heinlein", "0", "space opera adventure on mars"),
        book("Paris in Love", "Eloisa James", "1", "a quiet romance in paris"),
        book("French Pastry", "", "2", "a cookbook of french pastry"),
    ]))
}

fn completion(content: &str) -> String {
    json!({
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

fn recommender(server: &ServerGuard, catalog: Arc<BookCatalog>) -> BookRecommender {
    let summaries =
        SummaryClient::new(SummaryConfig::new("sk-test").with_base_url(server.url())).unwrap();
    BookRecommender::new(catalog, summaries, RecommenderConfig::default()).unwrap()
}

#[tokio::test]
async fn test_adventure_in_space() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("Red Planet".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion("A soldier's war on Mars."))
        .expect(1)
        .create_async()
        .await;

    let recommender = recommender(&server, three_books());
    let results = recommender.recommend("adventure in space", None).await.unwrap();

    assert!(!results.is_empty() && results.len() <= 2);
    assert_eq!(results[0].title, "Red Planet");
    assert_eq!(results[0].rank, 1);
    assert!(results.iter().all(|r| r.similarity > 0.2));
    assert_eq!(results[0].summary.text, "A soldier's war on Mars.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_nonsense_query_makes_no_summary_calls() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let recommender = recommender(&server, three_books());
    let results = recommender.recommend("xyzzy plugh", None).await.unwrap();

    assert!(results.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cluster_filter_limits_results() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion("Summary."))
        .create_async()
        .await;

    let recommender = recommender(&server, three_books());

    let in_cluster = recommender
        .recommend("romance in paris", Some("1"))
        .await
        .unwrap();
    assert_eq!(in_cluster.len(), 1);
    assert_eq!(in_cluster[0].cluster_label, "1");

    let other_cluster = recommender
        .recommend("romance in paris", Some("0"))
        .await
        .unwrap();
    assert!(other_cluster.is_empty());
}

#[tokio::test]
async fn test_repeated_query_uses_caches() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion("Summary."))
        .expect(1)
        .create_async()
        .await;

    let recommender = recommender(&server, three_books());
    let first = recommender.recommend("space opera", None).await.unwrap();
    let second = recommender.recommend("Space Opera", None).await.unwrap();

    assert_eq!(first.len(), second.len());
    assert_eq!(first[0].title, second[0].title);
    assert_eq!(recommender.cached_queries().await, 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_summary_failure_does_not_abort() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .create_async()
        .await;

    let recommender = recommender(&server, three_books());
    let results = recommender.recommend("mars adventure", None).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].summary.text, FALLBACK_SUMMARY);
    assert!(results[0].summary.error.is_some());
}
