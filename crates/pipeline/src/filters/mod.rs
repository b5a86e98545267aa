//! Filter implementations for the candidate pipeline.

pub mod cluster;
pub mod minimum_similarity;

// Re-export for convenience
pub use cluster::ClusterFilter;
pub use minimum_similarity::MinimumSimilarityFilter;
