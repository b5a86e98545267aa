//! Filter restricting results to one cluster.
//!
//! Cluster labels come from the offline clustering step; matching is exact
//! string equality on the label.

use crate::traits::Filter;
use anyhow::{bail, Result};
use data_loader::BookCatalog;
use matcher::{Candidate, QueryContext};
use std::sync::Arc;

/// Keeps candidates whose book belongs to the query's cluster.
///
/// Passes everything through when the query has no cluster; an unknown
/// label is an error rather than an empty result.
pub struct ClusterFilter {
    catalog: Arc<BookCatalog>,
}

impl ClusterFilter {
    pub fn new(catalog: Arc<BookCatalog>) -> Self {
        Self { catalog }
    }
}

impl Filter for ClusterFilter {
    fn name(&self) -> &str {
        "ClusterFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, context: &QueryContext) -> Result<Vec<Candidate>> {
        let Some(label) = context.cluster.as_deref() else {
            return Ok(candidates);
        };
        if !self.catalog.has_cluster(label) {
            bail!("unknown cluster '{}'", label);
        }

        Ok(candidates
            .into_iter()
            .filter(|candidate| {
                self.catalog
                    .get_book(candidate.row)
                    .is_some_and(|book| book.cluster_label == label)
            })
            .collect())
    }
}
