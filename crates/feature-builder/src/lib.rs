//! Offline dataset preparation.
//!
//! - **preprocess**: lemmatize raw reviews, score sentiment, assign keyword genres
//! - **builder**: turn the clustered dataset into the combined-feature CSV
//!
//! The remaining modules hold the per-field transformations the builder
//! applies to every row.
//!
//! ## Example Usage
//! ```ignore
//! use feature_builder::FeatureBuilder;
//!
//! let rows = FeatureBuilder::new()
//!     .with_max_words(300)
//!     .run(Path::new("datasets/cluster_dataset.csv"), Path::new("books_combined_features.csv"))?;
//! ```

pub mod author;
pub mod builder;
pub mod combine;
pub mod genre;
pub mod preprocess;
pub mod text;

pub use author::clean_author;
pub use builder::FeatureBuilder;
pub use combine::combine_features;
pub use genre::reverse_one_hot_encoding;
pub use preprocess::{ProcessedReview, ReviewPreprocessor};
pub use text::{limit_text_length, DEFAULT_MAX_WORDS};
