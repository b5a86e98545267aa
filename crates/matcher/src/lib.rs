//! # Matcher Crate
//!
//! Text matching between free-text queries and the book catalog.
//!
//! ## Components
//!
//! - **tokenizer**: lower-case word tokens with English stop words removed
//! - **tfidf**: vectorizer fitted once over all combined feature texts
//! - **similarity**: sparse vectors and cosine similarity
//! - **source**: `TfidfSource`, which scores every catalog row against a query
//!
//! ## Example Usage
//!
//! ```ignore
//! use matcher::{QueryContext, TfidfSource};
//! use std::sync::Arc;
//!
//! let source = TfidfSource::new(Arc::new(catalog))?;
//! let candidates = source.get_candidates(&QueryContext::new("adventure in space"));
//! ```

pub mod similarity;
pub mod source;
pub mod tfidf;
pub mod tokenizer;
pub mod types;

pub use similarity::SparseVector;
pub use source::TfidfSource;
pub use tfidf::{TfidfMatrix, TfidfModel, TfidfVectorizer, DEFAULT_MAX_FEATURES};
pub use tokenizer::tokenize;
pub use types::{Candidate, QueryContext};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_creation() {
        let candidate = Candidate::new(4, 0.85);
        assert_eq!(candidate.row, 4);
        assert_eq!(candidate.score, 0.85);
    }

    #[test]
    fn test_query_context() {
        let context = QueryContext::new("Space Opera").with_cluster("3");
        assert_eq!(context.normalized_query(), "space opera");
        assert_eq!(context.cluster.as_deref(), Some("3"));
    }
}
