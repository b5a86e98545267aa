//! # Recommendation Orchestrator
//!
//! This module coordinates the recommendation pipeline for one query:
//! 1. Score every book against the query (TF-IDF, on the blocking pool)
//! 2. Apply filters (cluster, minimum similarity)
//! 3. Rank and keep the top results
//! 4. Fetch a generated summary for each result, in rank order
//!
//! Steps 1-3 are memoized per (dataset fingerprint, query, cluster);
//! summaries are memoized by the summary client.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::sync::RwLock;
use tracing::{debug, info};

use data_loader::{BookCatalog, BookRow};
use llm_client::{Summary, SummaryClient};
use matcher::{Candidate, QueryContext, TfidfSource};
use pipeline::FilterPipeline;
use pipeline::filters::{ClusterFilter, MinimumSimilarityFilter};

use crate::config::RecommenderConfig;

/// Final recommendation returned to the user
#[derive(Debug, Clone)]
pub struct BookRecommendation {
    /// 1-based position in the result list
    pub rank: usize,
    pub row: BookRow,
    pub title: String,
    pub authors: String,
    pub avg_score: Option<f64>,
    pub sentiment_score: Option<f64>,
    pub cluster_label: String,
    pub genre_label: String,
    pub similarity: f64,
    pub summary: Summary,
}

/// (dataset fingerprint, lower-cased query, cluster)
type QueryKey = (u64, String, Option<String>);

/// Main orchestrator that coordinates the recommendation pipeline
pub struct BookRecommender {
    catalog: Arc<BookCatalog>,
    source: Arc<TfidfSource>,
    filter_pipeline: Arc<FilterPipeline>,
    summaries: SummaryClient,
    query_cache: RwLock<HashMap<QueryKey, Vec<Candidate>>>,
    config: RecommenderConfig,
}

impl BookRecommender {
    /// Fit the TF-IDF model over the catalog and assemble the pipeline
    pub fn new(
        catalog: Arc<BookCatalog>,
        summaries: SummaryClient,
        config: RecommenderConfig,
    ) -> Result<Self> {
        let source = Arc::new(
            TfidfSource::with_max_features(catalog.clone(), config.max_features)
                .context("Failed to build TF-IDF model")?,
        );
        let filter_pipeline = Arc::new(
            FilterPipeline::new()
                .add_filter(ClusterFilter::new(catalog.clone()))
                .add_filter(MinimumSimilarityFilter::new(config.min_similarity)),
        );

        Ok(Self {
            catalog,
            source,
            filter_pipeline,
            summaries,
            query_cache: RwLock::new(HashMap::new()),
            config,
        })
    }

    pub fn catalog(&self) -> &Arc<BookCatalog> {
        &self.catalog
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Cluster labels available for filtering
    pub fn clusters(&self) -> Vec<String> {
        self.catalog.clusters()
    }

    /// Main entry point: recommendations for a free-text query
    ///
    /// # Arguments
    /// * `query` - What the user is looking for
    /// * `cluster` - Restrict results to this cluster label
    ///
    /// # Returns
    /// At most `top_k` recommendations, best first. An empty or unmatched
    /// query gives an empty list; an unknown cluster is an error.
    pub async fn recommend(
        &self,
        query: &str,
        cluster: Option<&str>,
    ) -> Result<Vec<BookRecommendation>> {
        let start_time = Instant::now();

        if query.trim().is_empty() {
            debug!("Empty query, nothing to recommend");
            return Ok(Vec::new());
        }

        let mut context = QueryContext::new(query);
        if let Some(cluster) = cluster {
            context = context.with_cluster(cluster);
        }

        let ranked = self.ranked_candidates(&context).await?;
        info!("Selected {} books for '{}'", ranked.len(), query);

        let recommendations = self.attach_summaries(ranked).await;

        info!(
            "Total time to recommend for '{}': {:.2?}",
            query,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Scored, filtered and ranked candidates, from cache when available
    pub async fn ranked_candidates(&self, context: &QueryContext) -> Result<Vec<Candidate>> {
        let key: QueryKey = (
            self.catalog.fingerprint(),
            context.normalized_query(),
            context.cluster.clone(),
        );
        if let Some(cached) = self.query_cache.read().await.get(&key) {
            debug!("Query cache hit");
            return Ok(cached.clone());
        }

        let candidates = self.generate_candidates(context).await?;
        let filtered = self.apply_filters(candidates, context)?;
        let ranked = self.rank_and_select(filtered);

        self.query_cache.write().await.insert(key, ranked.clone());
        Ok(ranked)
    }

    /// Score every book on the blocking pool
    async fn generate_candidates(&self, context: &QueryContext) -> Result<Vec<Candidate>> {
        let source = self.source.clone();
        let context = context.clone();
        let candidates = tokio::task::spawn_blocking(move || source.get_candidates(&context))
            .await
            .context("Candidate scoring task panicked")?;

        debug!("Generated {} candidates", candidates.len());
        Ok(candidates)
    }

    /// Apply the filter pipeline to candidates
    fn apply_filters(
        &self,
        candidates: Vec<Candidate>,
        context: &QueryContext,
    ) -> Result<Vec<Candidate>> {
        let filtered = self
            .filter_pipeline
            .apply(candidates, context)
            .context("Failed to apply filters")?;
        debug!("Filtering complete, {} candidates remain", filtered.len());
        Ok(filtered)
    }

    /// Sort by similarity DESC and keep the top `top_k`.
    ///
    /// The sort is stable, so equal scores keep catalog order.
    fn rank_and_select(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates.truncate(self.config.top_k);
        candidates
    }

    /// One summary request per result, sequentially in rank order
    async fn attach_summaries(&self, ranked: Vec<Candidate>) -> Vec<BookRecommendation> {
        let mut recommendations = Vec::with_capacity(ranked.len());
        for candidate in ranked {
            let Some(book) = self.catalog.get_book(candidate.row) else {
                continue;
            };
            let summary = self.summaries.summarize(&book.title, &book.authors).await;

            recommendations.push(BookRecommendation {
                rank: recommendations.len() + 1,
                row: candidate.row,
                title: book.title.clone(),
                authors: book.authors.clone(),
                avg_score: book.avg_score,
                sentiment_score: book.sentiment_score,
                cluster_label: book.cluster_label.clone(),
                genre_label: book.genre_label.clone(),
                similarity: candidate.score,
                summary,
            });
        }
        recommendations
    }

    /// Number of memoized queries
    pub async fn cached_queries(&self) -> usize {
        self.query_cache.read().await.len()
    }
}
