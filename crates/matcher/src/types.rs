//! Types shared by the matcher and the filter pipeline.

use data_loader::BookRow;

/// A book scored against the current query.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Row in the catalog (and in the TF-IDF matrix)
    pub row: BookRow,
    /// Cosine similarity in [0, 1]
    pub score: f64,
}

impl Candidate {
    pub fn new(row: BookRow, score: f64) -> Self {
        Self { row, score }
    }
}

/// One recommendation request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryContext {
    /// Free-text query as typed by the user
    pub query: String,
    /// Restrict results to this cluster label
    pub cluster: Option<String>,
}

impl QueryContext {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            cluster: None,
        }
    }

    pub fn with_cluster(mut self, cluster: impl Into<String>) -> Self {
        self.cluster = Some(cluster.into());
        self
    }

    /// Query as fed to the vectorizer
    pub fn normalized_query(&self) -> String {
        self.query.to_lowercase()
    }
}
