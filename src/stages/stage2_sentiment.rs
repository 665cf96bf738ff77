use tracing::{info, warn};

use crate::models::AnalyzedRecord;
use crate::sentiment::{DistributionOracle, LabelOracle, SentimentAnnotator};

/// Result of Stage 2 sentiment labelling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stage2Result {
    pub scored: usize,
    pub failed: usize,
}

/// Execute Stage 2: attach both sentiment labels to each record
///
/// Records are scored one at a time in transcript order. A record whose text
/// cannot be scored keeps empty sentiment fields.
pub async fn execute_stage2<A, B>(
    records: &mut [AnalyzedRecord],
    annotator: &SentimentAnnotator<A, B>,
) -> Stage2Result
where
    A: DistributionOracle + Sync,
    B: LabelOracle + Sync,
{
    let mut result = Stage2Result::default();

    for record in records.iter_mut() {
        match annotator.annotate(&record.utterance.cleaned_text).await {
            Ok(labels) => {
                record.set_sentiment(labels);
                result.scored += 1;
            }
            Err(e) => {
                warn!("Line {}: sentiment skipped: {}", record.line_number, e);
                result.failed += 1;
            }
        }
    }

    info!(
        "Stage 2: {} scored, {} without sentiment",
        result.scored, result.failed
    );

    result
}
