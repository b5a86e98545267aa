//! Filtering of scored book candidates.
//!
//! Candidates arrive from the matcher with one cosine score per catalog row.
//! Filters then narrow them down in order:
//! 1. ClusterFilter keeps rows from the selected cluster (if any)
//! 2. MinimumSimilarityFilter drops weak matches
//!
//! Ranking and truncation happen afterwards in the recommender.
//!
//! See [`FilterPipeline`] for composing them.

pub mod traits;
pub mod filters;
pub mod filter_pipeline;

pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
