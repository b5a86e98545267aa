//! VADER sentiment scoring.

use rayon::prelude::*;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Compound polarity scorer.
pub struct SentimentAnalyzer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Compound score in [-1, 1]; missing text scores 0.
    pub fn score(&self, text: Option<&str>) -> f64 {
        let Some(text) = text else {
            return 0.0;
        };
        self.analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
            .clamp(-1.0, 1.0)
    }

    /// Score a batch in parallel, one analyzer per worker.
    pub fn score_all(texts: &[Option<String>]) -> Vec<f64> {
        tracing::info!("Scoring sentiment for {} texts", texts.len());
        texts
            .par_iter()
            .map_init(SentimentAnalyzer::new, |analyzer, text| {
                analyzer.score(text.as_deref())
            })
            .collect()
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_text_is_neutral() {
        let analyzer = SentimentAnalyzer::new();
        assert_eq!(analyzer.score(None), 0.0);
    }

    #[test]
    fn test_polarity_direction() {
        let analyzer = SentimentAnalyzer::new();
        let positive = analyzer.score(Some("A wonderful, beautiful and moving story. I loved it!"));
        let negative = analyzer.score(Some("Terrible, boring and awful. I hated it."));

        assert!(positive > 0.5, "positive score was {positive}");
        assert!(negative < -0.5, "negative score was {negative}");
    }

    #[test]
    fn test_scores_are_bounded() {
        let analyzer = SentimentAnalyzer::new();
        for text in ["", "ok", "GREAT GREAT GREAT!!!", "worst worst worst"] {
            let score = analyzer.score(Some(text));
            assert!((-1.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn test_score_all_keeps_order() {
        let texts = vec![
            Some("I love this book".to_string()),
            None,
            Some("I hate this book".to_string()),
        ];
        let scores = SentimentAnalyzer::score_all(&texts);

        assert_eq!(scores.len(), 3);
        assert!(scores[0] > 0.0);
        assert_eq!(scores[1], 0.0);
        assert!(scores[2] < 0.0);
    }
}
