//! Filter dropping weak matches.

use crate::traits::Filter;
use anyhow::Result;
use matcher::{Candidate, QueryContext};

/// Keeps candidates scoring strictly above `min_score`.
pub struct MinimumSimilarityFilter {
    min_score: f64,
}

impl MinimumSimilarityFilter {
    pub fn new(min_score: f64) -> Self {
        Self { min_score }
    }
}

impl Filter for MinimumSimilarityFilter {
    fn name(&self) -> &str {
        "MinimumSimilarityFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, _context: &QueryContext) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .filter(|candidate| candidate.score > self.min_score)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        let filter = MinimumSimilarityFilter::new(0.2);
        let candidates = vec![
            Candidate::new(0, 0.2),
            Candidate::new(1, 0.2000001),
            Candidate::new(2, 0.0),
            Candidate::new(3, 0.95),
        ];

        let filtered = filter.apply(candidates, &QueryContext::new("q")).unwrap();
        assert_eq!(filtered.iter().map(|c| c.row).collect::<Vec<_>>(), vec![1, 3]);
    }
}
