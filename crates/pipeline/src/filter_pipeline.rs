//! Ordered chain of candidate filters.

use crate::traits::Filter;
use anyhow::Result;
use matcher::{Candidate, QueryContext};

/// Runs each filter over the output of the previous one.
///
/// ```ignore
/// let filters = FilterPipeline::new()
///     .add_filter(ClusterFilter::new(catalog.clone()))
///     .add_filter(MinimumSimilarityFilter::new(0.2));
/// let kept = filters.apply(scored, &QueryContext::new("space opera"))?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Append a filter; filters run in insertion order
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Filter `candidates` for `context`, failing fast on the first filter error.
    pub fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &QueryContext,
    ) -> Result<Vec<Candidate>> {
        self.filters
            .iter()
            .try_fold(candidates, |remaining, filter| {
                let before = remaining.len();
                let kept = filter.apply(remaining, context)?;
                tracing::debug!("{}: {} -> {} candidates", filter.name(), before, kept.len());
                Ok::<_, anyhow::Error>(kept)
            })
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::MinimumSimilarityFilter;

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let context = QueryContext::new("mars");

        let candidates = vec![Candidate::new(0, 0.9), Candidate::new(1, 0.1)];

        let filtered = pipeline.apply(candidates.clone(), &context).unwrap();
        assert_eq!(filtered, candidates);
    }

    #[test]
    fn test_single_filter() {
        let pipeline = FilterPipeline::new().add_filter(MinimumSimilarityFilter::new(0.5));
        let context = QueryContext::new("mars");

        let candidates = vec![Candidate::new(0, 0.9), Candidate::new(1, 0.1)];

        let filtered = pipeline.apply(candidates, &context).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].row, 0);
        assert_eq!(pipeline.filter_names(), vec!["MinimumSimilarityFilter"]);
    }

    struct Failing;

    impl Filter for Failing {
        fn name(&self) -> &str {
            "Failing"
        }

        fn apply(&self, _: Vec<Candidate>, _: &QueryContext) -> Result<Vec<Candidate>> {
            anyhow::bail!("boom")
        }
    }

    #[test]
    fn test_error_stops_pipeline() {
        let pipeline = FilterPipeline::new()
            .add_filter(Failing)
            .add_filter(MinimumSimilarityFilter::new(0.0));

        let err = pipeline
            .apply(vec![Candidate::new(0, 1.0)], &QueryContext::new("x"))
            .unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
