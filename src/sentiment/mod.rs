pub mod client;

pub use client::*;

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::SentimentLabels;

/// One label of a sentiment distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Oracle returning a score for every label it knows
pub trait DistributionOracle {
    fn score_distribution(
        &self,
        text: &str,
    ) -> impl Future<Output = AnalysisResult<Vec<LabelScore>>> + Send;
}

/// Oracle returning only its best label
pub trait LabelOracle {
    fn best_label(&self, text: &str) -> impl Future<Output = AnalysisResult<String>> + Send;
}

/// Highest-scoring label; on ties the earliest label wins
pub fn dominant_label(scores: &[LabelScore]) -> Option<&str> {
    let mut best: Option<&LabelScore> = None;
    for candidate in scores {
        if best.is_none_or(|b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best.map(|b| b.label.as_str())
}

/// Runs both oracles on the same text and keeps their labels side by side
///
/// No reconciliation happens between the two labels.
#[derive(Debug, Clone)]
pub struct SentimentAnnotator<A, B> {
    primary: A,
    secondary: B,
}

impl<A, B> SentimentAnnotator<A, B>
where
    A: DistributionOracle + Sync,
    B: LabelOracle + Sync,
{
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }

    pub async fn annotate(&self, text: &str) -> AnalysisResult<SentimentLabels> {
        if text.trim().is_empty() {
            return Err(AnalysisError::annotation_failure(
                "cannot score empty text",
            ));
        }

        let distribution = self.primary.score_distribution(text).await?;
        let primary = dominant_label(&distribution)
            .ok_or_else(|| AnalysisError::annotation_failure("empty sentiment distribution"))?
            .to_string();

        let secondary = self.secondary.best_label(text).await?;

        Ok(SentimentLabels { primary, secondary })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Scores text by a fixed keyword table
    pub(crate) struct KeywordOracle;

    impl DistributionOracle for KeywordOracle {
        async fn score_distribution(&self, text: &str) -> AnalysisResult<Vec<LabelScore>> {
            if text.contains("falha") {
                return Err(AnalysisError::annotation_failure("unscorable"));
            }
            let positive = if text.contains("bom") { 0.9 } else { 0.1 };
            Ok(vec![
                LabelScore {
                    label: "positive".to_string(),
                    score: positive,
                },
                LabelScore {
                    label: "neutral".to_string(),
                    score: 0.5,
                },
            ])
        }
    }

    impl LabelOracle for KeywordOracle {
        async fn best_label(&self, text: &str) -> AnalysisResult<String> {
            Ok(if text.contains("bom") {
                "Positive".to_string()
            } else {
                "Neutral".to_string()
            })
        }
    }

    fn score(label: &str, score: f64) -> LabelScore {
        LabelScore {
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn test_dominant_label() {
        let scores = vec![score("negative", 0.2), score("positive", 0.7), score("neutral", 0.1)];
        assert_eq!(dominant_label(&scores), Some("positive"));
        assert_eq!(dominant_label(&[]), None);
    }

    #[test]
    fn test_dominant_label_tie_keeps_first() {
        let scores = vec![score("neutral", 0.5), score("positive", 0.5)];
        assert_eq!(dominant_label(&scores), Some("neutral"));
    }

    #[tokio::test]
    async fn test_annotator_combines_both_oracles() {
        let annotator = SentimentAnnotator::new(KeywordOracle, KeywordOracle);
        let labels = annotator.annotate("foi muito bom").await.unwrap();
        assert_eq!(labels.primary, "positive");
        assert_eq!(labels.secondary, "Positive");
    }

    #[tokio::test]
    async fn test_annotator_rejects_empty_text() {
        let annotator = SentimentAnnotator::new(KeywordOracle, KeywordOracle);
        let err = annotator.annotate("  ").await.unwrap_err();
        assert!(matches!(err, AnalysisError::AnnotationFailure { .. }));
    }
}
