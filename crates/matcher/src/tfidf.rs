//! TF-IDF vectorizer.
//!
//! Weights follow the common smoothed formulation:
//! - `idf(t) = ln((1 + n) / (1 + df(t))) + 1`
//! - row weight = raw term count × idf, then L2-normalized
//!
//! The vocabulary keeps the `max_features` terms with the highest total count
//! across the corpus (ties alphabetical). Term indices are alphabetical.

use crate::similarity::SparseVector;
use crate::tokenizer::tokenize;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Fits a `TfidfModel` over a corpus.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: Option<usize>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self {
            max_features: Some(DEFAULT_MAX_FEATURES),
        }
    }

    /// Configure the vocabulary cap (default: 5000, `None` = unbounded)
    pub fn with_max_features(mut self, max_features: Option<usize>) -> Self {
        self.max_features = max_features;
        self
    }

    /// Learn vocabulary and idf weights
    pub fn fit(&self, documents: &[&str]) -> TfidfModel {
        let tokenized: Vec<Vec<String>> = documents.par_iter().map(|d| tokenize(d)).collect();

        // BTreeMap keeps terms alphabetical
        let mut term_counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for tokens in &tokenized {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in tokens {
                let entry = term_counts.entry(token.as_str()).or_insert((0, 0));
                entry.0 += 1;
                if seen.insert(token.as_str()) {
                    entry.1 += 1;
                }
            }
        }

        let mut kept: Vec<(&str, usize, usize)> = term_counts
            .into_iter()
            .map(|(term, (count, df))| (term, count, df))
            .collect();
        if let Some(limit) = self.max_features {
            if kept.len() > limit {
                // Stable sort on an alphabetical list keeps ties alphabetical
                kept.sort_by(|a, b| b.1.cmp(&a.1));
                kept.truncate(limit);
                kept.sort_by(|a, b| a.0.cmp(b.0));
            }
        }

        let n = documents.len() as f64;
        let terms: Vec<String> = kept.iter().map(|(term, _, _)| term.to_string()).collect();
        let idf: Vec<f64> = kept
            .iter()
            .map(|(_, _, df)| ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();
        let vocabulary = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        tracing::debug!(
            "Fitted TF-IDF over {} documents, {} terms",
            documents.len(),
            terms.len()
        );

        TfidfModel {
            vocabulary,
            terms,
            idf,
        }
    }

    /// Fit and transform the same corpus
    pub fn fit_transform(&self, documents: &[&str]) -> (TfidfModel, TfidfMatrix) {
        let model = self.fit(documents);
        let matrix = model.transform_all(documents);
        (model, matrix)
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Fitted vocabulary and idf weights.
#[derive(Debug, Clone)]
pub struct TfidfModel {
    vocabulary: HashMap<String, usize>,
    /// Terms by index
    terms: Vec<String>,
    idf: Vec<f64>,
}

impl TfidfModel {
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn term(&self, idx: usize) -> Option<&str> {
        self.terms.get(idx).map(String::as_str)
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|idx| self.idf[idx])
    }

    /// Unit-norm tf-idf vector of one document; unknown terms are ignored
    pub fn transform(&self, document: &str) -> SparseVector {
        let entries = tokenize(document)
            .iter()
            .filter_map(|token| self.vocabulary.get(token.as_str()))
            .map(|&idx| (idx, self.idf[idx]))
            .collect();
        SparseVector::from_entries(entries).normalized()
    }

    /// Transform a batch in parallel, keeping row order
    pub fn transform_all(&self, documents: &[&str]) -> TfidfMatrix {
        TfidfMatrix {
            rows: documents.par_iter().map(|d| self.transform(d)).collect(),
        }
    }
}

/// One unit-norm row per document.
#[derive(Debug, Clone, Default)]
pub struct TfidfMatrix {
    rows: Vec<SparseVector>,
}

impl TfidfMatrix {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, idx: usize) -> Option<&SparseVector> {
        self.rows.get(idx)
    }

    /// Cosine similarity of `query` against every row
    pub fn similarities(&self, query: &SparseVector) -> Vec<f64> {
        self.rows.par_iter().map(|row| row.cosine(query)).collect()
    }
}
