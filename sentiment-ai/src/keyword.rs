//! Deterministic keyword-based analyzer for tests and offline operation.

use crate::traits::analyzer::Analyzer;
use crate::types::analysis::{Analysis, Label};
use crate::Error;
use async_trait::async_trait;

const POSITIVE_KEYWORDS: &[&str] = &[
    "amazing",
    "awesome",
    "best",
    "enjoyed",
    "excellent",
    "fantastic",
    "good",
    "great",
    "loved",
    "perfect",
    "wonderful",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "awful",
    "bad",
    "boring",
    "disappointing",
    "horrible",
    "poor",
    "rude",
    "terrible",
    "waste",
    "worst",
];

/// Scores text from fixed positive/negative keyword lists.
///
/// The score is the signed fraction of keyword hits: `(positive - negative) /
/// (positive + negative)`, so it always falls within [-1.0, 1.0]. Text with no
/// keyword hits (including empty text) scores neutral.
#[derive(Debug, Default)]
pub struct KeywordAnalyzer;

impl KeywordAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn count_hits(text: &str, keywords: &[&str]) -> usize {
        keywords.iter().filter(|kw| text.contains(*kw)).count()
    }
}

#[async_trait]
impl Analyzer for KeywordAnalyzer {
    async fn analyze(&self, text: &str) -> Result<Analysis, Error> {
        let lowered = text.to_lowercase();

        let positive = Self::count_hits(&lowered, POSITIVE_KEYWORDS);
        let negative = Self::count_hits(&lowered, NEGATIVE_KEYWORDS);

        if positive == 0 && negative == 0 {
            return Ok(Analysis::neutral());
        }

        let score = (positive as f64 - negative as f64) / (positive + negative) as f64;
        let label = if score > 0.0 {
            Label::Positive
        } else if score < 0.0 {
            Label::Negative
        } else {
            Label::Neutral
        };

        Ok(Analysis::new(label, score, None))
    }

    fn analyzer_id(&self) -> &str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn positive_review_scores_positive() {
        let analyzer = KeywordAnalyzer::new();
        let analysis = analyzer
            .analyze("This was an amazing trip, loved every moment")
            .await
            .unwrap();

        assert_eq!(analysis.label, Label::Positive);
        assert!(analysis.score > 0.2);
        assert_eq!(analysis.class(), 1);
    }

    #[tokio::test]
    async fn negative_review_scores_negative() {
        let analyzer = KeywordAnalyzer::new();
        let analysis = analyzer
            .analyze("Terrible experience, a complete waste of money")
            .await
            .unwrap();

        assert_eq!(analysis.label, Label::Negative);
        assert!(analysis.score < -0.2);
        assert_eq!(analysis.class(), -1);
    }

    #[tokio::test]
    async fn text_without_keywords_is_neutral() {
        let analyzer = KeywordAnalyzer::new();
        let analysis = analyzer.analyze("The venue opened at seven").await.unwrap();

        assert_eq!(analysis.label, Label::Neutral);
        assert_eq!(analysis.score, 0.0);
    }

    #[tokio::test]
    async fn empty_text_is_neutral() {
        let analyzer = KeywordAnalyzer::new();
        let analysis = analyzer.analyze("").await.unwrap();

        assert_eq!(analysis.label, Label::Neutral);
        assert_eq!(analysis.score, 0.0);
    }

    #[tokio::test]
    async fn balanced_keywords_are_neutral() {
        let analyzer = KeywordAnalyzer::new();
        let analysis = analyzer
            .analyze("Great music but terrible seating")
            .await
            .unwrap();

        assert_eq!(analysis.label, Label::Neutral);
        assert_eq!(analysis.score, 0.0);
    }

    #[tokio::test]
    async fn score_stays_within_bounds_for_keyword_heavy_text() {
        let analyzer = KeywordAnalyzer::new();
        let analysis = analyzer
            .analyze("amazing awesome excellent fantastic great good loved wonderful perfect best")
            .await
            .unwrap();

        assert!((-1.0..=1.0).contains(&analysis.score));
        assert_eq!(analysis.score, 1.0);
    }
}
