//! TF-IDF candidate source.
//!
//! Fits the vectorizer once over every book's combined feature text and
//! scores each query against all rows.

use crate::tfidf::{TfidfMatrix, TfidfModel, TfidfVectorizer, DEFAULT_MAX_FEATURES};
use crate::types::{Candidate, QueryContext};
use anyhow::{ensure, Result};
use data_loader::BookCatalog;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument};

/// Scores catalog rows by cosine similarity to the query text.
pub struct TfidfSource {
    /// Shared catalog (read-only, so no Mutex needed)
    catalog: Arc<BookCatalog>,
    model: TfidfModel,
    /// Row `i` is the vector of catalog row `i`
    matrix: TfidfMatrix,
}

impl TfidfSource {
    /// Fit with the default vocabulary cap of 5000 terms
    pub fn new(catalog: Arc<BookCatalog>) -> Result<Self> {
        Self::with_max_features(catalog, DEFAULT_MAX_FEATURES)
    }

    pub fn with_max_features(catalog: Arc<BookCatalog>, max_features: usize) -> Result<Self> {
        let start = Instant::now();
        let documents = catalog.combined_features();
        let (model, matrix) = TfidfVectorizer::new()
            .with_max_features(Some(max_features))
            .fit_transform(&documents);

        ensure!(
            matrix.len() == catalog.len(),
            "TF-IDF matrix has {} rows but the catalog has {} books",
            matrix.len(),
            catalog.len()
        );

        tracing::info!(
            "Built TF-IDF matrix: {} rows x {} terms in {:?}",
            matrix.len(),
            model.vocabulary_size(),
            start.elapsed()
        );

        Ok(Self {
            catalog,
            model,
            matrix,
        })
    }

    pub fn catalog(&self) -> &Arc<BookCatalog> {
        &self.catalog
    }

    pub fn model(&self) -> &TfidfModel {
        &self.model
    }

    /// Score every row against the query, in row order.
    ///
    /// The query is lower-cased before vectorizing; a query with no known
    /// terms scores 0 everywhere.
    #[instrument(skip(self, context), fields(query = %context.query))]
    pub fn get_candidates(&self, context: &QueryContext) -> Vec<Candidate> {
        let query = self.model.transform(&context.normalized_query());
        debug!("Query vector has {} non-zero terms", query.nnz());

        let candidates: Vec<Candidate> = self
            .matrix
            .similarities(&query)
            .into_iter()
            .enumerate()
            .map(|(row, score)| Candidate::new(row, score))
            .collect();

        debug!("Scored {} candidates", candidates.len());
        candidates
    }
}
