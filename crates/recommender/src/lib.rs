//! Book recommender.
//!
//! This crate contains the orchestrator that answers a free-text query:
//! TF-IDF scoring, cluster and similarity filters, ranking, then one
//! generated summary per result.

pub mod config;
pub mod orchestrator;

pub use config::RecommenderConfig;
pub use orchestrator::{BookRecommendation, BookRecommender};
