//! The `Filter` seam between scoring and ranking.

use anyhow::Result;
use matcher::{Candidate, QueryContext};

/// A step that narrows scored candidates for one query.
///
/// Implementations consume the candidate list and return the survivors in
/// their original order. An `Err` aborts the whole query.
pub trait Filter: Send + Sync {
    /// Short name used in debug logs
    fn name(&self) -> &str;

    fn apply(&self, candidates: Vec<Candidate>, context: &QueryContext) -> Result<Vec<Candidate>>;
}
