//! Recommender tuning knobs.

use matcher::DEFAULT_MAX_FEATURES;

#[derive(Debug, Clone, PartialEq)]
pub struct RecommenderConfig {
    /// TF-IDF vocabulary cap
    pub max_features: usize,
    /// Results must score strictly above this
    pub min_similarity: f64,
    /// Results returned per query
    pub top_k: usize,
}

impl RecommenderConfig {
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn with_min_similarity(mut self, min_similarity: f64) -> Self {
        self.min_similarity = min_similarity;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            min_similarity: 0.2,
            top_k: 2,
        }
    }
}
